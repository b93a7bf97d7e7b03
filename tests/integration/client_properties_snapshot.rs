use chrono::NaiveDate;
use treemap_view::cli::EffectiveConfig;
use treemap_view::pipeline::run_preview;
use treemap_view::request::ReportRequest;

#[test]
fn preview_request_and_client_properties_snapshot() {
  let cfg = EffectiveConfig {
    request: ReportRequest::from_query("module=Referrers&period=day&date=2024-03-10&availableWidth=800&availableHeight=600")
      .unwrap(),
    columns: vec!["label".into(), "nb_actions".into(), "nb_visits".into()],
    translations: Default::default(),
    show_evolution_values: true,
    table: None,
    out: "-".into(),
    today: None,
  };

  let out = run_preview(&cfg, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()).unwrap();

  insta::assert_json_snapshot!(out.client_properties, @r###"
  {
    "filter_offset": 0,
    "max_graph_elements": false,
    "show_evolution_values": true,
    "subtable_controller_action": null
  }
  "###);

  insta::assert_json_snapshot!(out.request, @r###"
  {
    "period": "day",
    "date": "2024-03-09,2024-03-10",
    "filter_offset": 0,
    "availableWidth": 800,
    "availableHeight": 600,
    "columns": "nb_actions",
    "module": "Referrers"
  }
  "###);
}
