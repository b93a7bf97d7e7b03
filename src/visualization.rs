// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Treemap request adapter: metric selection, evolution date widening, data presence check
// role: processing/adapter
// inputs: ReportRequest, TreemapConfig, loaded ReportTable, a "today" anchor for keyword dates
// outputs: Adapted ReportRequest plus a configured TreemapDataGenerator; presence flag
// invariants:
// - the selected metric is never the label column
// - range periods leave the request untouched
// - the returned request is a new value; the caller's request is never mutated
// errors: NoMetricAvailable; InvalidRequest for missing/unparseable period or date in evolution mode
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{TreemapConfig, LABEL_COLUMN};
use crate::error::{Error, Result};
use crate::generator::TreemapDataGenerator;
use crate::period::comparison_date;
use crate::request::ReportRequest;
use crate::table::ReportTable;

pub const ID: &str = "infoviz-treemap";
pub const FOOTER_ICON: &str = "treemap/images/treemap-icon.png";
pub const FOOTER_ICON_TITLE: &str = "Treemap";
pub const TEMPLATE_FILE: &str = "treemap/_dataTableViz_treemap.twig";

/// First column that is not the label column.
///
/// Only the first two entries are considered: the label column, when present,
/// is expected to lead the list.
pub fn metric_to_graph<S: AsRef<str>>(columns: &[S]) -> Result<String> {
  let no_metric = || Error::NoMetricAvailable {
    columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
  };

  let first = columns.first().ok_or_else(no_metric)?.as_ref();
  if first != LABEL_COLUMN {
    return Ok(first.to_string());
  }

  columns
    .get(1)
    .map(|c| c.as_ref().to_string())
    .ok_or_else(no_metric)
}

/// True when the most recent period holds at least one row.
pub fn is_there_data_to_display(table: &ReportTable) -> bool {
  table.current().map(|t| t.row_count() != 0).unwrap_or(false)
}

/// Request after adaptation, with the generator that will shape its data.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
  pub metric: String,
  pub request: ReportRequest,
  pub generator: TreemapDataGenerator,
}

#[derive(Debug, Clone, Copy)]
pub struct Treemap {
  today: NaiveDate,
}

impl Treemap {
  /// `today` anchors keyword dates such as `today` and `yesterday`.
  pub fn new(today: NaiveDate) -> Self {
    Self { today }
  }

  pub fn before_load_data_table(&self, request: &ReportRequest, properties: &TreemapConfig) -> Result<PreparedRequest> {
    let metric = metric_to_graph(&properties.columns_to_display)?;
    let translation = properties.translation_for(&metric).to_string();
    debug!(%metric, %translation, "selected treemap metric");

    let mut generator = TreemapDataGenerator::new(metric.clone(), translation);
    generator.set_initial_row_offset(request.filter_offset);
    generator.set_available_dimensions(request.available_width, request.available_height);

    let request = self.handle_evolution_values(request.clone(), properties, &mut generator)?;

    Ok(PreparedRequest {
      metric,
      request,
      generator,
    })
  }

  /// Widen `date` to `previous,current` so both periods get loaded.
  pub fn handle_evolution_values(
    &self,
    mut request: ReportRequest,
    properties: &TreemapConfig,
    generator: &mut TreemapDataGenerator,
  ) -> Result<ReportRequest> {
    // no previous period exists for an arbitrary range
    if request.is_range_period() {
      return Ok(request);
    }

    if !properties.show_evolution_values {
      return Ok(request);
    }

    let period = request.period()?;
    let date = request.date()?;
    let widened = comparison_date(date, period, self.today).map_err(|e| match e {
      Error::NoPreviousPeriod { .. } => Error::invalid("date", e.to_string()),
      other => other,
    })?;
    debug!(%period, from = %date, to = %widened, "widened date for evolution values");

    request.date = Some(widened);
    generator.show_evolution_values();

    Ok(request)
  }

  /// Restrict the loaded columns to the graphed metric.
  pub fn before_generic_filters(&self, properties: &mut TreemapConfig) -> Result<()> {
    let metric = metric_to_graph(&properties.columns_to_display)?;
    properties.custom_parameters.insert("columns".to_string(), metric);
    Ok(())
  }
}
