use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use clap::Parser;
use serde::{Deserialize, Serialize};

use crate::period::DATE_FORMAT;
use crate::request::ReportRequest;

#[derive(Parser, Debug)]
#[command(
    name = "treemap-view",
    version,
    about = "Preview the treemap view for a report request: adapted request, client properties and node tree",
    long_about = None
)]
pub struct Cli {
  /// Request query string, form-urlencoded, e.g. "period=day&date=2024-03-01%2C2024-03-07"
  #[arg(long)]
  pub query: Option<String>,

  /// Extra request parameter (repeatable), e.g. --param availableWidth=800
  #[arg(long = "param", value_name = "NAME=VALUE")]
  pub params: Vec<String>,

  /// Reporting period: day, week, month, year or range
  #[arg(long)]
  pub period: Option<String>,

  /// Report date (YYYY-MM-DD, today, yesterday, or start,end)
  #[arg(long)]
  pub date: Option<String>,

  /// Columns to display, in order; the first non-label column is graphed
  #[arg(long, value_delimiter = ',', default_value = "label,nb_visits")]
  pub columns: Vec<String>,

  /// Display name for a column (repeatable), e.g. --translation nb_visits=Visits
  #[arg(long = "translation", value_name = "COLUMN=NAME")]
  pub translations: Vec<String>,

  /// Color nodes by series instead of by evolution percent
  #[arg(long)]
  pub no_evolution: bool,

  /// Report table JSON ({"single": [...]} or {"by_period": [...]}) to shape into a tree
  #[arg(long)]
  pub table: Option<PathBuf>,

  /// Output file (default stdout "-")
  #[arg(long, default_value = "-")]
  pub out: String,

  /// Emit a troff man page to stdout (internal; for packaging)
  #[arg(long, hide = true)]
  pub gen_man: bool,

  /// Override "today" for keyword dates (hidden; tests only)
  #[arg(long = "today-override", hide = true)]
  pub today_override: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveConfig {
  pub request: ReportRequest,
  pub columns: Vec<String>,
  pub translations: BTreeMap<String, String>,
  pub show_evolution_values: bool,
  pub table: Option<PathBuf>,
  pub out: String,
  pub today: Option<NaiveDate>,
}

fn split_pair<'a>(flag: &str, raw: &'a str) -> Result<(&'a str, &'a str)> {
  match raw.split_once('=') {
    Some((k, v)) if !k.trim().is_empty() => Ok((k.trim(), v)),
    _ => bail!("invalid --{flag} `{raw}`, expected NAME=VALUE"),
  }
}

pub fn normalize(cli: Cli) -> Result<EffectiveConfig> {
  let mut pairs: Vec<(String, String)> = Vec::new();

  if let Some(q) = &cli.query {
    let parsed = ReportRequest::from_query(q).context("parsing --query")?;
    pairs.extend(parsed.to_params());
  }

  for raw in &cli.params {
    let (k, v) = split_pair("param", raw)?;
    pairs.push((k.to_string(), v.to_string()));
  }

  // Explicit flags win over --query/--param
  if let Some(p) = &cli.period {
    pairs.push(("period".into(), p.clone()));
  }
  if let Some(d) = &cli.date {
    pairs.push(("date".into(), d.clone()));
  }

  let request = ReportRequest::from_pairs(pairs).context("reading request parameters")?;

  let mut translations = BTreeMap::new();
  for raw in &cli.translations {
    let (k, v) = split_pair("translation", raw)?;
    translations.insert(k.to_string(), v.to_string());
  }

  let today = match cli.today_override.as_deref() {
    Some(s) => Some(
      NaiveDate::parse_from_str(s.trim(), DATE_FORMAT)
        .with_context(|| format!("parsing --today-override `{s}`"))?,
    ),
    None => None,
  };

  let columns: Vec<String> = cli
    .columns
    .iter()
    .map(|c| c.trim().to_string())
    .filter(|c| !c.is_empty())
    .collect();

  Ok(EffectiveConfig {
    request,
    columns,
    translations,
    show_evolution_values: !cli.no_evolution,
    table: cli.table,
    out: cli.out,
    today,
  })
}
