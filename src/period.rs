// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Reporting periods and "one period earlier" date arithmetic for evolution comparisons
// role: model/time
// inputs: Period names, request date strings (YYYY-MM-DD, keywords, start,end pairs), a "today" anchor
// outputs: Period enum; previous-period date strings formatted as YYYY-MM-DD
// invariants:
// - previous_date never returns a date on or after the input date
// - month/year shifts clamp the day to the target month's length
// - range periods and lastN/previousN dates have no previous period
// errors: InvalidRequest for unparseable input; NoPreviousPeriod when no comparison exists
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

static RELATIVE_DATE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(last|previous)[0-9]*$").expect("relative date pattern compiles"));

#[derive(Copy, Clone, Eq, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Period {
  Day,
  Week,
  Month,
  Year,
  Range,
}

impl Period {
  pub fn as_str(&self) -> &'static str {
    match self {
      Period::Day => "day",
      Period::Week => "week",
      Period::Month => "month",
      Period::Year => "year",
      Period::Range => "range",
    }
  }
}

impl fmt::Display for Period {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for Period {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    match s {
      "day" => Ok(Period::Day),
      "week" => Ok(Period::Week),
      "month" => Ok(Period::Month),
      "year" => Ok(Period::Year),
      "range" => Ok(Period::Range),
      other => Err(Error::invalid(
        "period",
        format!("`{other}` is not one of day, week, month, year, range"),
      )),
    }
  }
}

/// Resolve a single request date (no comma pair) against `today`.
pub fn resolve_date(raw: &str, today: NaiveDate) -> Result<NaiveDate> {
  match raw.trim() {
    "today" | "now" => Ok(today),
    "yesterday" => today
      .pred_opt()
      .ok_or_else(|| Error::invalid("date", "`yesterday` is out of range")),
    s => NaiveDate::parse_from_str(s, DATE_FORMAT)
      .map_err(|e| Error::invalid("date", format!("`{s}` is not a YYYY-MM-DD date ({e})"))),
  }
}

/// Shift `date` back by one `period` of the same granularity.
pub fn sub_period(date: NaiveDate, period: Period) -> Result<NaiveDate> {
  let shifted = match period {
    Period::Day => date.pred_opt(),
    Period::Week => date.checked_sub_signed(chrono::Duration::days(7)),
    Period::Month => subtract_months(date, 1),
    Period::Year => subtract_months(date, 12),
    Period::Range => None,
  };

  shifted.ok_or_else(|| Error::NoPreviousPeriod {
    period: period.to_string(),
    date: date.format(DATE_FORMAT).to_string(),
  })
}

/// Date string for the period immediately before the one named by `date`.
///
/// `date` is either a single date (`2024-03-10`, `today`, `yesterday`) or a
/// `start,end` pair, in which case both ends move back by one period.
pub fn previous_date(date: &str, period: Period, today: NaiveDate) -> Result<String> {
  let raw = date.trim();

  if raw.is_empty() {
    return Err(Error::invalid("date", "is empty"));
  }

  if period == Period::Range || RELATIVE_DATE.is_match(raw) {
    return Err(Error::NoPreviousPeriod {
      period: period.to_string(),
      date: raw.to_string(),
    });
  }

  if let Some((start, end)) = raw.split_once(',') {
    let prev_start = sub_period(resolve_date(start, today)?, period)?;
    let prev_end = sub_period(resolve_date(end, today)?, period)?;

    return Ok(format!(
      "{},{}",
      prev_start.format(DATE_FORMAT),
      prev_end.format(DATE_FORMAT)
    ));
  }

  let prev = sub_period(resolve_date(raw, today)?, period)?;

  Ok(prev.format(DATE_FORMAT).to_string())
}

/// The `previous,current` pair requested when evolution values are shown.
///
/// For a `start,end` input the result spans from the shifted start to the
/// original end, so the loaded range covers both periods.
pub fn comparison_date(date: &str, period: Period, today: NaiveDate) -> Result<String> {
  let current = date.trim();
  let previous = previous_date(current, period, today)?;

  match (previous.split_once(','), current.split_once(',')) {
    (Some((prev_start, _)), Some((_, end))) => Ok(format!("{},{}", prev_start, end.trim())),
    _ => Ok(format!("{},{}", previous, current)),
  }
}

fn last_day_of_month(year: i32, month: u32) -> Option<u32> {
  // First day of next month, minus one day
  let (ny, nm) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
  let first_next = NaiveDate::from_ymd_opt(ny, nm, 1)?;

  Some(first_next.pred_opt()?.day())
}

fn subtract_months(date: NaiveDate, n: i32) -> Option<NaiveDate> {
  let total = (date.year() * 12 + date.month() as i32 - 1) - n;
  let y = total.div_euclid(12);
  let m = (total.rem_euclid(12) + 1) as u32;
  let d = date.day().min(last_day_of_month(y, m)?);

  NaiveDate::from_ymd_opt(y, m, d)
}
