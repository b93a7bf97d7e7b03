// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Report tables as loaded for the treemap: a single table or an ordered per-period map of tables
// role: model/types
// inputs: JSON produced by the data-loading collaborator
// outputs: ReportTable variants with row access and current/previous period selection
// invariants:
// - PeriodTables preserves insertion order; "current" is the last entry, "previous" the one before it
// - an empty per-period map has no current table
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
  pub label: String,
  #[serde(default)]
  pub columns: BTreeMap<String, serde_json::Value>,
  #[serde(default, rename = "idsubdatatable", skip_serializing_if = "Option::is_none")]
  pub subtable_id: Option<u64>,
}

impl Row {
  pub fn new(label: impl Into<String>) -> Self {
    Self {
      label: label.into(),
      ..Self::default()
    }
  }

  pub fn with_column(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
    self.columns.insert(name.into(), value.into());
    self
  }

  pub fn with_subtable(mut self, id: u64) -> Self {
    self.subtable_id = Some(id);
    self
  }

  /// Finite numeric value of `column`; numeric strings are accepted.
  pub fn metric(&self, column: &str) -> Option<f64> {
    let value = match self.columns.get(column)? {
      serde_json::Value::Number(n) => n.as_f64(),
      serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
      _ => None,
    };

    value.filter(|v| v.is_finite())
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataTable {
  pub rows: Vec<Row>,
}

impl DataTable {
  pub fn new(rows: Vec<Row>) -> Self {
    Self { rows }
  }

  pub fn row_count(&self) -> usize {
    self.rows.len()
  }

  pub fn find(&self, label: &str) -> Option<&Row> {
    self.rows.iter().find(|r| r.label == label)
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodTable {
  pub period: String,
  pub table: DataTable,
}

/// Child tables keyed by period label, in load order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PeriodTables {
  entries: Vec<PeriodTable>,
}

impl PeriodTables {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn push(&mut self, period: impl Into<String>, table: DataTable) {
    self.entries.push(PeriodTable {
      period: period.into(),
      table,
    });
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn iter(&self) -> impl Iterator<Item = &PeriodTable> {
    self.entries.iter()
  }

  pub fn last(&self) -> Option<&PeriodTable> {
    self.entries.last()
  }

  pub fn previous(&self) -> Option<&PeriodTable> {
    let n = self.entries.len();
    if n < 2 {
      return None;
    }
    self.entries.get(n - 2)
  }
}

impl<P: Into<String>> FromIterator<(P, DataTable)> for PeriodTables {
  fn from_iter<I: IntoIterator<Item = (P, DataTable)>>(iter: I) -> Self {
    let mut out = PeriodTables::new();
    for (period, table) in iter {
      out.push(period, table);
    }
    out
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportTable {
  Single(DataTable),
  /// Produced when the date parameter was widened to several periods.
  ByPeriod(PeriodTables),
}

impl ReportTable {
  /// The table holding the most recent period's data.
  pub fn current(&self) -> Option<&DataTable> {
    match self {
      ReportTable::Single(t) => Some(t),
      ReportTable::ByPeriod(map) => map.last().map(|e| &e.table),
    }
  }

  /// The period before the current one, when more than one was loaded.
  pub fn previous(&self) -> Option<&DataTable> {
    match self {
      ReportTable::Single(_) => None,
      ReportTable::ByPeriod(map) => map.previous().map(|e| &e.table),
    }
  }
}
