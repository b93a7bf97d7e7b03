// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Explicit report request parameters read by the treemap adapter and forwarded to data loading
// role: model/request
// inputs: name=value pairs or a query string
// outputs: ReportRequest with typed accessors; outbound parameter list
// invariants:
// - unknown parameters are preserved verbatim and in name order
// - filter_offset defaults to 0; available dimensions default to None
// errors: InvalidRequest naming the parameter when a numeric value does not parse
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::period::Period;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportRequest {
  #[serde(skip_serializing_if = "Option::is_none")]
  pub period: Option<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub date: Option<String>,
  pub filter_offset: u32,
  #[serde(rename = "availableWidth", skip_serializing_if = "Option::is_none")]
  pub available_width: Option<u32>,
  #[serde(rename = "availableHeight", skip_serializing_if = "Option::is_none")]
  pub available_height: Option<u32>,
  #[serde(flatten)]
  pub extra: BTreeMap<String, String>,
}

impl ReportRequest {
  pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
  where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
  {
    let mut req = ReportRequest::default();

    for (k, v) in pairs {
      let (key, value) = (k.as_ref(), v.as_ref());
      match key {
        "period" => req.period = Some(value.to_string()),
        "date" => req.date = Some(value.to_string()),
        "filter_offset" => req.filter_offset = parse_number(key, value)?.unwrap_or(0),
        "availableWidth" => req.available_width = parse_number(key, value)?,
        "availableHeight" => req.available_height = parse_number(key, value)?,
        _ => {
          req.extra.insert(key.to_string(), value.to_string());
        }
      }
    }

    Ok(req)
  }

  /// Parse an `application/x-www-form-urlencoded` query such as `a=1&b=2`.
  pub fn from_query(query: &str) -> Result<Self> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query.trim_start_matches('?'))
      .map_err(|e| Error::invalid("query", format!("is not form-urlencoded ({e})")))?;

    Self::from_pairs(pairs)
  }

  pub fn is_range_period(&self) -> bool {
    self.period.as_deref() == Some(Period::Range.as_str())
  }

  pub fn period(&self) -> Result<Period> {
    match self.period.as_deref() {
      Some(p) => p.parse(),
      None => Err(Error::invalid("period", "is missing")),
    }
  }

  pub fn date(&self) -> Result<&str> {
    match self.date.as_deref().map(str::trim) {
      Some(d) if !d.is_empty() => Ok(d),
      _ => Err(Error::invalid("date", "is missing")),
    }
  }

  /// Parameter list handed to the data-loading collaborator.
  pub fn to_params(&self) -> Vec<(String, String)> {
    let mut out: Vec<(String, String)> = Vec::new();

    if let Some(p) = &self.period {
      out.push(("period".into(), p.clone()));
    }
    if let Some(d) = &self.date {
      out.push(("date".into(), d.clone()));
    }
    out.push(("filter_offset".into(), self.filter_offset.to_string()));
    if let Some(w) = self.available_width {
      out.push(("availableWidth".into(), w.to_string()));
    }
    if let Some(h) = self.available_height {
      out.push(("availableHeight".into(), h.to_string()));
    }
    for (k, v) in &self.extra {
      out.push((k.clone(), v.clone()));
    }

    out
  }
}

fn parse_number(param: &str, value: &str) -> Result<Option<u32>> {
  let value = value.trim();
  if value.is_empty() {
    return Ok(None);
  }

  value
    .parse::<u32>()
    .map(Some)
    .map_err(|_| Error::invalid(param, format!("`{value}` is not a non-negative integer")))
}
