// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Run the treemap view end to end for one request: configure, adapt, load table, check presence, shape tree
// role: processing/orchestrator
// inputs: EffectiveConfig, effective today
// outputs: Preview JSON {metric, request, client_properties, has_data?, tree?}
// side_effects: Reads the table JSON file when one is given
// invariants:
// - the outbound request carries columns=<metric> next to the adapted date
// - has_data and tree are present iff a table was supplied
// errors: Adapter errors and table read/parse errors, with the table path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::cli::EffectiveConfig;
use crate::config::TreemapConfig;
use crate::generator::TreemapNode;
use crate::request::ReportRequest;
use crate::table::ReportTable;
use crate::visualization::{self, Treemap};

#[derive(Debug, Serialize)]
pub struct PreviewOutput {
  pub visualization: &'static str,
  pub footer_icon: &'static str,
  pub footer_icon_title: &'static str,
  pub template: &'static str,
  pub metric: String,
  pub request: ReportRequest,
  pub client_properties: serde_json::Map<String, serde_json::Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub has_data: Option<bool>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub tree: Option<TreemapNode>,
}

pub fn build_view_config(cfg: &EffectiveConfig) -> TreemapConfig {
  let mut properties = TreemapConfig {
    show_evolution_values: cfg.show_evolution_values,
    columns_to_display: cfg.columns.clone(),
    translations: cfg.translations.clone(),
    filter_offset: cfg.request.filter_offset,
    ..TreemapConfig::default()
  };
  properties.configure_visualization();
  properties
}

pub fn load_table(path: &Path) -> Result<ReportTable> {
  let raw = std::fs::read_to_string(path).with_context(|| format!("reading table {}", path.display()))?;
  let table: ReportTable =
    serde_json::from_str(&raw).with_context(|| format!("parsing table JSON {}", path.display()))?;

  Ok(table)
}

pub fn run_preview(cfg: &EffectiveConfig, today: NaiveDate) -> Result<PreviewOutput> {
  let treemap = Treemap::new(today);
  let mut properties = build_view_config(cfg);

  let prepared = treemap
    .before_load_data_table(&cfg.request, &properties)
    .context("preparing treemap request")?;
  treemap.before_generic_filters(&mut properties)?;

  let mut request = prepared.request;
  request.extra.extend(properties.custom_parameters.clone());

  let (has_data, tree) = match &cfg.table {
    Some(path) => {
      let table = load_table(path)?;
      let has_data = visualization::is_there_data_to_display(&table);
      info!(table = %path.display(), has_data, "loaded report table");
      (Some(has_data), Some(prepared.generator.generate(&table)))
    }
    None => (None, None),
  };

  Ok(PreviewOutput {
    visualization: visualization::ID,
    footer_icon: visualization::FOOTER_ICON,
    footer_icon_title: visualization::FOOTER_ICON_TITLE,
    template: visualization::TEMPLATE_FILE,
    metric: prepared.metric,
    request,
    client_properties: properties.client_side_properties(),
    has_data,
    tree,
  })
}
