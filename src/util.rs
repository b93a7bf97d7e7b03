// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Utilities for the "today" anchor, logging setup, output writing, and man page rendering
// role: utilities/helpers
// inputs: Optional date override; output target; clap CommandFactory
// outputs: Effective today, initialized tracing subscriber, written JSON, man page text
// side_effects: init_logging installs a global subscriber; write_output writes stdout or a file
// invariants:
// - effective_today returns the override verbatim when present
// - write_output creates missing parent directories of a file target
// errors: IO errors bubble with the target path as context
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::CommandFactory;
use tracing_subscriber::{EnvFilter, fmt};

/// Returns the effective "today" given an optional override.
///
/// Centralizes test determinism so keyword dates never call `Local::now()`
/// on their own.
pub fn effective_today(override_today: Option<NaiveDate>) -> NaiveDate {
  override_today.unwrap_or_else(|| Local::now().date_naive())
}

/// Install a stderr `tracing` subscriber honoring `RUST_LOG` (default `warn`).
pub fn init_logging() {
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
  let _ = fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init();
}

/// Pretty-print `value` to stdout when `out` is "-", otherwise to the file at `out`.
pub fn write_output(out: &str, value: &serde_json::Value) -> Result<()> {
  let body = serde_json::to_string_pretty(value)?;

  if out == "-" {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", body)?;
    return Ok(());
  }

  let path = Path::new(out);
  if let Some(parent) = path.parent() {
    if !parent.as_os_str().is_empty() {
      std::fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
  }
  std::fs::write(path, body + "\n").with_context(|| format!("writing {}", path.display()))?;

  Ok(())
}

/// Render a section-1 man page for a clap `CommandFactory` implementor.
/// Returns the troff content as a UTF-8 string.
pub fn render_man_page<T: CommandFactory>() -> Result<String> {
  let cmd = T::command();
  let man = clap_mangen::Man::new(cmd);
  let mut buf: Vec<u8> = Vec::new();

  man.render(&mut buf)?;

  Ok(String::from_utf8_lossy(&buf).to_string())
}
