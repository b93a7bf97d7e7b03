// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Shape a loaded report table into the node tree consumed by the client-side treemap widget
// role: rendering/data-shaping
// inputs: ReportTable, selected metric, row offset, available dimensions, evolution flag
// outputs: TreemapNode tree (serde JSON)
// invariants:
// - root $area equals the sum of its children's $area
// - children count never exceeds max_elements(); the overflow is folded into one "Others" node
// - evolution is only present in evolution mode and when a non-zero past value exists
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::Serialize;
use tracing::debug;

use crate::table::{DataTable, ReportTable, Row};

/// Smallest rectangle (px²) worth rendering a node for.
pub const MIN_NODE_AREA: u64 = 2400;
pub const ROOT_ID: &str = "treemap-root";
pub const OTHERS_LABEL: &str = "Others";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeData {
  #[serde(rename = "$area")]
  pub area: f64,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub evolution: Option<f64>,
  #[serde(rename = "idSubtable", skip_serializing_if = "Option::is_none")]
  pub subtable_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreemapNode {
  pub id: String,
  pub name: String,
  pub data: NodeData,
  pub children: Vec<TreemapNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreemapDataGenerator {
  metric: String,
  metric_translation: String,
  initial_row_offset: u32,
  available_width: Option<u32>,
  available_height: Option<u32>,
  show_evolution_values: bool,
}

impl TreemapDataGenerator {
  pub fn new(metric: impl Into<String>, metric_translation: impl Into<String>) -> Self {
    Self {
      metric: metric.into(),
      metric_translation: metric_translation.into(),
      initial_row_offset: 0,
      available_width: None,
      available_height: None,
      show_evolution_values: false,
    }
  }

  pub fn metric(&self) -> &str {
    &self.metric
  }

  pub fn metric_translation(&self) -> &str {
    &self.metric_translation
  }

  pub fn set_initial_row_offset(&mut self, offset: u32) {
    self.initial_row_offset = offset;
  }

  pub fn set_available_dimensions(&mut self, width: Option<u32>, height: Option<u32>) {
    self.available_width = width;
    self.available_height = height;
  }

  /// Switch node coloring to evolution percentages.
  pub fn show_evolution_values(&mut self) {
    self.show_evolution_values = true;
  }

  pub fn evolution_enabled(&self) -> bool {
    self.show_evolution_values
  }

  /// Node cap derived from the rendering area; `None` when dimensions are unknown.
  pub fn max_elements(&self) -> Option<usize> {
    let (w, h) = (self.available_width?, self.available_height?);
    let area = u64::from(w) * u64::from(h);

    Some(((area / MIN_NODE_AREA) as usize).max(1))
  }

  pub fn generate(&self, table: &ReportTable) -> TreemapNode {
    let empty = DataTable::default();
    let current = table.current().unwrap_or(&empty);
    let previous = if self.show_evolution_values { table.previous() } else { None };

    let mut children: Vec<TreemapNode> = current
      .rows
      .iter()
      .enumerate()
      .filter_map(|(idx, row)| self.node_for_row(idx, row, previous))
      .collect();

    if let Some(max) = self.max_elements() {
      if children.len() > max {
        let tail = children.split_off(max - 1);
        children.push(self.others_node(current, previous, &tail));
      }
    }

    let total = children.iter().fold(0.0, |acc, c| acc + c.data.area);
    debug!(metric = %self.metric, nodes = children.len(), total, "generated treemap");

    TreemapNode {
      id: ROOT_ID.to_string(),
      name: self.metric_translation.clone(),
      data: NodeData {
        area: total,
        evolution: None,
        subtable_id: None,
      },
      children,
    }
  }

  fn node_for_row(&self, idx: usize, row: &Row, previous: Option<&DataTable>) -> Option<TreemapNode> {
    let value = row.metric(&self.metric)?;
    if value <= 0.0 {
      return None;
    }

    let evolution = previous
      .and_then(|p| p.find(&row.label))
      .and_then(|past| past.metric(&self.metric))
      .and_then(|past| evolution_percent(past, value));

    Some(TreemapNode {
      id: format!("treemap-node-{}", self.initial_row_offset as usize + idx),
      name: row.label.clone(),
      data: NodeData {
        area: value,
        evolution,
        subtable_id: row.subtable_id,
      },
      children: Vec::new(),
    })
  }

  fn others_node(&self, current: &DataTable, previous: Option<&DataTable>, folded: &[TreemapNode]) -> TreemapNode {
    let area = folded.iter().fold(0.0, |acc, n| acc + n.data.area);

    let evolution = previous.and_then(|p| {
      let past = folded
        .iter()
        .filter_map(|n| p.find(&n.name))
        .filter_map(|r| r.metric(&self.metric))
        .fold(0.0, |acc, v| acc + v);
      evolution_percent(past, area)
    });

    TreemapNode {
      id: format!("treemap-node-{}", self.initial_row_offset as usize + current.row_count()),
      name: OTHERS_LABEL.to_string(),
      data: NodeData {
        area,
        evolution,
        subtable_id: None,
      },
      children: Vec::new(),
    }
  }
}

fn evolution_percent(past: f64, current: f64) -> Option<f64> {
  if past == 0.0 {
    return None;
  }
  let pct = (current - past) / past * 100.0;

  Some((pct * 100.0).round() / 100.0)
}
