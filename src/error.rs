// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Library error type shared by metric selection, period arithmetic and request adaptation
// role: errors
// outputs: Error enum and Result alias
// invariants: Every failure names the offending parameter or period; no panics in library code
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
  /// `columns_to_display` holds no column besides `label`.
  #[error("no metric available: columns to display {columns:?} contain no metric column")]
  NoMetricAvailable { columns: Vec<String> },

  #[error("invalid request parameters: `{param}` {reason}")]
  InvalidRequest { param: String, reason: String },

  #[error("no previous period can be computed for period `{period}` and date `{date}`")]
  NoPreviousPeriod { period: String, date: String },
}

impl Error {
  pub(crate) fn invalid(param: &str, reason: impl Into<String>) -> Self {
    Error::InvalidRequest {
      param: param.to_string(),
      reason: reason.into(),
    }
  }
}
