use treemap_view::generator::{TreemapDataGenerator, OTHERS_LABEL};
use treemap_view::table::{DataTable, PeriodTables, ReportTable, Row};
use treemap_view::visualization::is_there_data_to_display;

fn table_of(counts: &[usize]) -> ReportTable {
  let map: PeriodTables = counts
    .iter()
    .enumerate()
    .map(|(i, n)| {
      let rows = (0..*n).map(|r| Row::new(format!("row {r}")).with_column("nb_visits", 1)).collect();
      (format!("period {i}"), DataTable::new(rows))
    })
    .collect();
  ReportTable::ByPeriod(map)
}

#[test]
fn latest_period_decides_presence() {
  assert!(!is_there_data_to_display(&table_of(&[5, 0])));
  assert!(is_there_data_to_display(&table_of(&[0, 2])));
  assert!(is_there_data_to_display(&table_of(&[1])));
}

#[test]
fn single_fixture_has_data() {
  let table: ReportTable = test_support::read_fixture_json("search_engines_single.json");
  assert!(is_there_data_to_display(&table));
  assert_eq!(table.current().unwrap().row_count(), 3);
}

#[test]
fn empty_latest_period_fixture_has_no_data_and_empty_tree() {
  let table: ReportTable = test_support::read_fixture_json("empty_latest_period.json");
  assert!(!is_there_data_to_display(&table));

  let mut generator = TreemapDataGenerator::new("nb_visits", "Visits");
  generator.show_evolution_values();
  let tree = generator.generate(&table);
  assert!(tree.children.is_empty());
  assert_eq!(tree.data.area, 0.0);
}

#[test]
fn small_viewport_folds_nodes() {
  let table: ReportTable = test_support::read_fixture_json("search_engines_single.json");
  let mut generator = TreemapDataGenerator::new("nb_visits", "Visits");
  // 60 * 80 / 2400 = 2 nodes
  generator.set_available_dimensions(Some(60), Some(80));

  let tree = generator.generate(&table);
  let names: Vec<&str> = tree.children.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, vec!["Google", OTHERS_LABEL]);
  assert_eq!(tree.children[1].data.area, 12.0);
  assert_eq!(tree.data.area, 42.0);
}
