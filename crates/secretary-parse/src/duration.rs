//! Duration phrases: "for 2 hours", "lasts 1 hour 30 minutes", "for 45 min".

use std::sync::LazyLock;

use chrono::TimeDelta;
use regex::Regex;

use crate::span::Found;

const LEAD: &str = r"(?:for|lasts|lasting|duration(?:\s+of)?)";
const HOUR_UNIT: &str = r"(?:hours|hour|hrs|hr|h)";
const MINUTE_UNIT: &str = r"(?:minutes|minute|mins|min|m)";

static HOURS_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(
    r"(?i)\b{LEAD}\s+(?P<hours>\d{{1,6}})\s*{HOUR_UNIT}\b(?:\s*(?:and\s+)?(?P<mins>\d{{1,6}})\s*{MINUTE_UNIT}\b)?"
  ))
  .expect("valid hour duration regex")
});

static MINUTES_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(&format!(
    r"(?i)\b{LEAD}\s+(?P<mins>\d{{1,6}})\s*{MINUTE_UNIT}\b"
  ))
  .expect("valid minute duration regex")
});

/// Locate the first duration phrase. Hour forms are tried before the
/// minutes-only form.
pub fn find_duration(text: &str) -> Option<Found<TimeDelta>> {
  if let Some(caps) = HOURS_RE.captures(text) {
    let hours: i64 = caps["hours"].parse().ok()?;
    let mins: i64 = match caps.name("mins") {
      Some(m) => m.as_str().parse().ok()?,
      None => 0,
    };
    let total = TimeDelta::try_hours(hours)?.checked_add(&TimeDelta::try_minutes(mins)?)?;
    return Some(Found::new(total, caps.get(0)?.range()));
  }

  let caps = MINUTES_RE.captures(text)?;
  let mins: i64 = caps["mins"].parse().ok()?;
  Some(Found::new(TimeDelta::try_minutes(mins)?, caps.get(0)?.range()))
}

/// Extract one duration phrase and return it with the remaining text.
///
/// When no phrase is present the text comes back unchanged.
pub fn parse_duration(text: &str) -> (Option<TimeDelta>, String) {
  match find_duration(text) {
    Some(found) => {
      let rest = found.residual(text);
      (Some(found.value), rest)
    }
    None => (None, text.to_owned()),
  }
}
