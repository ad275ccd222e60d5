//! Temporal normaliser: resolves the date and time an utterance refers to.
//!
//! Pipeline, first success wins:
//!   raw &str
//!     ├─ parse_relative()   "in N minutes/hours/days/weeks"
//!     └─ parse_absolute()
//!          ├─ date: day word → weekday → numeric date (later tiers override)
//!          └─ time: HH:MM → part-of-day word → default 10:00
//!
//! Every extractor is a pure function of `(text, now)` returning a [`Found`]
//! with the byte span it matched. Nothing here fails: a phrase that cannot be
//! resolved (e.g. `31.02`) is simply "not found".

use std::sync::LazyLock;

use chrono::{
  Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday,
};
use regex::{Captures, Regex};

use crate::{
  lexicon::{
    self, DAY_WORDS, DEFAULT_CLOCK, DEFAULT_EVENT_MINUTES, EVENT_WEEKDAYS,
    LEADING_WEEKDAYS, PARTS_OF_DAY, RelativeUnit,
  },
  span::{Found, collapse_whitespace},
};

// ─── Patterns ────────────────────────────────────────────────────────────────

pub(crate) static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"(?i)\bin\s+(\d{1,9})\s*(minutes|minute|mins|min|hours|hour|hrs|hr|h|days|day|weeks|week|wks|wk)\b",
  )
  .expect("valid relative offset regex")
});

pub(crate) static DAY_WORD_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\b(day\s+after\s+tomorrow|tomorrow|today|tonight)\b")
    .expect("valid day word regex")
});

pub(crate) static ON_WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
  let names = lexicon::weekday_alternation(EVENT_WEEKDAYS);
  Regex::new(&format!(r"(?i)\bon\s+({names})\b")).expect("valid weekday regex")
});

pub(crate) static LEADING_WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
  let names = lexicon::weekday_alternation(LEADING_WEEKDAYS);
  Regex::new(&format!(r"(?i)^\s*({names})\b")).expect("valid weekday regex")
});

pub(crate) static DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\b(\d{1,2})[./](\d{1,2})(?:[./](\d{2,4}))?\b")
    .expect("valid numeric date regex")
});

pub(crate) static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\b([01]?\d|2[0-3]):([0-5]\d)\b").expect("valid clock regex")
});

static PART_OF_DAY_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\b(morning|afternoon|evening|tonight|night)\b")
    .expect("valid part-of-day regex")
});

// ─── Slot ────────────────────────────────────────────────────────────────────

/// A resolved start with its provisional end (start + 30 minutes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
  pub start: NaiveDateTime,
  pub end:   NaiveDateTime,
}

impl Slot {
  fn starting_at(start: NaiveDateTime) -> Option<Self> {
    let end = start.checked_add_signed(TimeDelta::minutes(DEFAULT_EVENT_MINUTES))?;
    Some(Self { start, end })
  }
}

/// Resolve the time slot an utterance refers to, if any.
///
/// A relative offset takes priority; when one is present absolute parsing is
/// skipped entirely.
pub fn parse_slot(text: &str, now: NaiveDateTime) -> Option<Slot> {
  if let Some(found) = parse_relative(text, now) {
    return Some(found.value);
  }
  parse_absolute(text, now)
}

// ─── Relative offsets ────────────────────────────────────────────────────────

/// `in N <unit>` → `now + N * unit`.
pub fn parse_relative(text: &str, now: NaiveDateTime) -> Option<Found<Slot>> {
  let caps = RELATIVE_RE.captures(text)?;
  let n: i64 = caps[1].parse().ok()?;
  let offset = match RelativeUnit::from_word(&caps[2])? {
    RelativeUnit::Minutes => TimeDelta::try_minutes(n)?,
    RelativeUnit::Hours => TimeDelta::try_hours(n)?,
    RelativeUnit::Days => TimeDelta::try_days(n)?,
    RelativeUnit::Weeks => TimeDelta::try_weeks(n)?,
  };
  let slot = Slot::starting_at(now.checked_add_signed(offset)?)?;
  Some(Found::new(slot, whole_match(&caps)))
}

// ─── Absolute dates and times ────────────────────────────────────────────────

/// Resolve a named or numeric date plus a clock time.
///
/// When only a time is present the date is today. When only a date is
/// present the time is 10:00. With neither, there is no slot.
pub fn parse_absolute(text: &str, now: NaiveDateTime) -> Option<Slot> {
  let today = now.date();
  let mut date: Option<NaiveDate> = None;

  if let Some(found) = find_day_word(text, today) {
    date = Some(found.value);
  }
  if let Some(found) = find_event_weekday(text) {
    date = Some(resolve_weekday(now, found.value));
  }
  if let Some(found) = find_numeric_date(text, now) {
    date = Some(found.value);
  }

  let time = find_clock_time(text)
    .or_else(|| find_part_of_day(text))
    .map(|found| found.value);

  let start = match (date, time) {
    (_, Some(time)) => date.unwrap_or(today).and_time(time),
    (Some(date), None) => date.and_time(lexicon::clock(DEFAULT_CLOCK)),
    (None, None) => return None,
  };
  Slot::starting_at(start)
}

/// "today", "tomorrow", "day after tomorrow", "tonight".
pub fn find_day_word(text: &str, today: NaiveDate) -> Option<Found<NaiveDate>> {
  let caps = DAY_WORD_RE.captures(text)?;
  let word = collapse_whitespace(&caps[1].to_lowercase());
  let offset = DAY_WORDS
    .iter()
    .find(|(name, _)| *name == word)
    .map(|&(_, days)| days)?;
  let date = today.checked_add_signed(TimeDelta::days(offset))?;
  Some(Found::new(date, whole_match(&caps)))
}

/// A weekday introduced by "on", or a weekday as the first word. The leading
/// form wins when both are present.
pub fn find_event_weekday(text: &str) -> Option<Found<Weekday>> {
  let mut found = None;
  for re in [&*ON_WEEKDAY_RE, &*LEADING_WEEKDAY_RE] {
    if let Some(caps) = re.captures(text)
      && let Some(weekday) = lexicon::lookup_weekday(EVENT_WEEKDAYS, &caps[1])
    {
      found = Some(Found::new(weekday, whole_match(&caps)));
    }
  }
  found
}

/// The next occurrence of `weekday` strictly after `now`'s date.
///
/// If `now` already falls on that weekday the result is a full week ahead.
pub fn resolve_weekday(now: NaiveDateTime, weekday: Weekday) -> NaiveDate {
  let current = now.weekday().num_days_from_monday() as i64;
  let target = weekday.num_days_from_monday() as i64;
  let mut ahead = (target - current).rem_euclid(7);
  if ahead == 0 {
    ahead = 7;
  }
  now.date() + TimeDelta::days(ahead)
}

/// `D.M`, `D.M.YY`, or `D.M.YYYY` (slashes also accepted).
///
/// Only the first numeric date in the text is considered; an impossible
/// calendar date means "no date".
pub fn find_numeric_date(text: &str, now: NaiveDateTime) -> Option<Found<NaiveDate>> {
  let caps = DATE_RE.captures(text)?;
  let date = date_from_captures(&caps, now)?;
  Some(Found::new(date, whole_match(&caps)))
}

/// Build a date from day/month and an optional year.
///
/// Two-digit years map to `2000 + value`. Without a year, the current year is
/// used unless that day has already passed, in which case it rolls forward.
pub fn resolve_numeric_date(
  day: u32,
  month: u32,
  year: Option<i32>,
  now: NaiveDateTime,
) -> Option<NaiveDate> {
  let year = match year {
    Some(y) if y < 100 => 2000 + y,
    Some(y) => y,
    None if (month, day) < (now.month(), now.day()) => now.year() + 1,
    None => now.year(),
  };
  NaiveDate::from_ymd_opt(year, month, day)
}

pub(crate) fn date_from_captures(caps: &Captures<'_>, now: NaiveDateTime) -> Option<NaiveDate> {
  let day: u32 = caps.get(1)?.as_str().parse().ok()?;
  let month: u32 = caps.get(2)?.as_str().parse().ok()?;
  let year = match caps.get(3) {
    Some(m) => Some(m.as_str().parse::<i32>().ok()?),
    None => None,
  };
  resolve_numeric_date(day, month, year, now)
}

/// The first `HH:MM` in the text.
pub fn find_clock_time(text: &str) -> Option<Found<NaiveTime>> {
  let caps = TIME_RE.captures(text)?;
  let hour: u32 = caps[1].parse().ok()?;
  let minute: u32 = caps[2].parse().ok()?;
  let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
  Some(Found::new(time, whole_match(&caps)))
}

/// "morning", "afternoon", "evening", "tonight", "night".
pub fn find_part_of_day(text: &str) -> Option<Found<NaiveTime>> {
  let caps = PART_OF_DAY_RE.captures(text)?;
  let word = caps[1].to_lowercase();
  let time = PARTS_OF_DAY
    .iter()
    .find(|(name, _)| *name == word)
    .map(|&(_, hm)| lexicon::clock(hm))?;
  Some(Found::new(time, whole_match(&caps)))
}

fn whole_match(caps: &Captures<'_>) -> std::ops::Range<usize> {
  caps.get(0).map_or(0..0, |m| m.range())
}
