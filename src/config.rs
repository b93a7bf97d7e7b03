// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Typed view properties for the treemap visualization and the client-side property whitelist
// role: config/types
// outputs: TreemapConfig (serde), MaxGraphElements, client_side_properties JSON object
// invariants:
// - client_side_properties only ever contains keys from CLIENT_SIDE_PROPERTIES, in that order
// - configure_visualization is idempotent
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Properties forwarded to the client-side treemap widget.
pub const CLIENT_SIDE_PROPERTIES: [&str; 4] = [
  "filter_offset",
  "max_graph_elements",
  "show_evolution_values",
  "subtable_controller_action",
];

pub const LABEL_COLUMN: &str = "label";

/// Upper bound on rendered nodes; `false` on the wire when unlimited.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum MaxGraphElements {
  #[default]
  Unlimited,
  Limit(u32),
}

impl Serialize for MaxGraphElements {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    match self {
      MaxGraphElements::Unlimited => serializer.serialize_bool(false),
      MaxGraphElements::Limit(n) => serializer.serialize_u32(*n),
    }
  }
}

impl<'de> Deserialize<'de> for MaxGraphElements {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
      Flag(bool),
      Count(u32),
    }

    match Raw::deserialize(deserializer)? {
      Raw::Flag(false) => Ok(MaxGraphElements::Unlimited),
      Raw::Flag(true) => Err(serde::de::Error::custom(
        "max_graph_elements must be false or a positive integer",
      )),
      Raw::Count(n) => Ok(MaxGraphElements::Limit(n)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreemapConfig {
  /// Color nodes by the evolution percent of the metric instead of by series color.
  pub show_evolution_values: bool,
  pub max_graph_elements: MaxGraphElements,
  pub columns_to_display: Vec<String>,
  pub translations: BTreeMap<String, String>,
  pub allow_multi_select_series_picker: bool,
  pub show_pagination_control: bool,
  pub show_offset_information: bool,
  pub show_flatten_table: bool,
  pub datatable_js_type: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub subtable_controller_action: Option<String>,
  pub filter_offset: u32,
  pub custom_parameters: BTreeMap<String, String>,
}

impl Default for TreemapConfig {
  fn default() -> Self {
    Self {
      show_evolution_values: true,
      max_graph_elements: MaxGraphElements::Unlimited,
      columns_to_display: vec![LABEL_COLUMN.to_string(), "nb_visits".to_string()],
      translations: BTreeMap::new(),
      allow_multi_select_series_picker: false,
      show_pagination_control: true,
      show_offset_information: true,
      show_flatten_table: true,
      datatable_js_type: "DataTable".to_string(),
      subtable_controller_action: None,
      filter_offset: 0,
      custom_parameters: BTreeMap::new(),
    }
  }
}

impl TreemapConfig {
  /// Defaults with the treemap-specific configuration already applied.
  pub fn configured() -> Self {
    let mut cfg = Self::default();
    cfg.configure_visualization();
    cfg
  }

  pub fn configure_visualization(&mut self) {
    // element count is derived from the available width/height instead
    self.max_graph_elements = MaxGraphElements::Unlimited;

    self.datatable_js_type = "TreemapDataTable".to_string();
    self.show_pagination_control = false;
    self.show_offset_information = false;
    self.show_flatten_table = false;
  }

  /// Display name for `column`, falling back to the column id when untranslated.
  pub fn translation_for<'a>(&'a self, column: &'a str) -> &'a str {
    match self.translations.get(column) {
      Some(t) if !t.is_empty() => t.as_str(),
      _ => column,
    }
  }

  /// The whitelisted property bag handed to the client renderer.
  pub fn client_side_properties(&self) -> serde_json::Map<String, serde_json::Value> {
    let all = serde_json::to_value(self).unwrap_or_default();
    let mut out = serde_json::Map::new();

    for key in CLIENT_SIDE_PROPERTIES {
      let value = all.get(key).cloned().unwrap_or(serde_json::Value::Null);
      out.insert(key.to_string(), value);
    }

    out
  }
}
