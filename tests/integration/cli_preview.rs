use predicates::prelude::*;
use test_support::{cmd_bin, fixture_path, tempdir};

fn preview(args: &[&str]) -> serde_json::Value {
  let out = cmd_bin("treemap-view").args(args).output().unwrap();
  assert!(
    out.status.success(),
    "treemap-view failed: {}",
    String::from_utf8_lossy(&out.stderr)
  );
  serde_json::from_slice(&out.stdout).unwrap()
}

#[test]
fn day_request_is_widened_and_tree_is_shaped() {
  let table = fixture_path("search_engines_by_period.json");
  let v = preview(&[
    "--period",
    "day",
    "--date",
    "2024-03-10",
    "--table",
    table.to_str().unwrap(),
    "--translation",
    "nb_visits=Visits",
  ]);

  assert_eq!(v["visualization"], "infoviz-treemap");
  assert_eq!(v["footer_icon"], "treemap/images/treemap-icon.png");
  assert_eq!(v["template"], "treemap/_dataTableViz_treemap.twig");
  assert_eq!(v["metric"], "nb_visits");
  assert_eq!(v["request"]["date"], "2024-03-09,2024-03-10");
  assert_eq!(v["request"]["columns"], "nb_visits");
  assert_eq!(v["has_data"], true);

  let tree = &v["tree"];
  assert_eq!(tree["name"], "Visits");
  assert_eq!(tree["data"]["$area"], 42.0);
  let children = tree["children"].as_array().unwrap();
  assert_eq!(children.len(), 3);
  assert_eq!(children[0]["name"], "Google");
  assert_eq!(children[0]["data"]["evolution"], 50.0);
  assert_eq!(children[1]["data"]["evolution"], -20.0);
  assert!(children[2]["data"].get("evolution").is_none());
  assert_eq!(children[2]["data"]["idSubtable"], 3);
}

#[test]
fn range_period_keeps_date() {
  let v = preview(&["--query", "period=range&date=2024-03-01,2024-03-10"]);
  assert_eq!(v["request"]["date"], "2024-03-01,2024-03-10");
  assert!(v.get("tree").is_none());
}

#[test]
fn encoded_query_pair_is_decoded() {
  let v = preview(&["--query", "period=range&date=2024-03-01%2C2024-03-10"]);
  assert_eq!(v["request"]["date"], "2024-03-01,2024-03-10");
}

#[test]
fn keyword_dates_use_today_override() {
  let v = preview(&[
    "--period",
    "month",
    "--date",
    "today",
    "--today-override",
    "2024-03-31",
  ]);
  assert_eq!(v["request"]["date"], "2024-02-29,today");
}

#[test]
fn no_evolution_leaves_date_and_properties() {
  let v = preview(&["--period", "week", "--date", "2024-03-10", "--no-evolution"]);
  assert_eq!(v["request"]["date"], "2024-03-10");
  assert_eq!(v["client_properties"]["show_evolution_values"], false);
}

#[test]
fn label_only_columns_fail_with_message() {
  cmd_bin("treemap-view")
    .args(["--period", "day", "--date", "2024-03-10", "--columns", "label"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("no metric available"));
}

#[test]
fn missing_date_in_evolution_mode_fails() {
  cmd_bin("treemap-view")
    .args(["--period", "day"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid request parameters"));
}

#[test]
fn out_writes_file() {
  let td = tempdir();
  let target = td.path().join("preview.json");
  cmd_bin("treemap-view")
    .args([
      "--period",
      "year",
      "--date",
      "2024-02-29",
      "--out",
      target.to_str().unwrap(),
    ])
    .assert()
    .success()
    .stdout(predicate::str::is_empty());

  let v: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&target).unwrap()).unwrap();
  assert_eq!(v["request"]["date"], "2023-02-28,2024-02-29");
}
