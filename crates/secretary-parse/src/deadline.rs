//! Deadline phrases: "by friday", "by 12.05", "by 12.05.2025".
//!
//! A deadline always lands on 23:59:00 of the resolved day.

use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::{
  lexicon::{self, DEADLINE_WEEKDAYS, END_OF_DAY_CLOCK, EVENT_WEEKDAYS},
  span::Found,
  temporal::{self, ON_WEEKDAY_RE},
};

static BY_WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
  let names = lexicon::weekday_alternation(DEADLINE_WEEKDAYS);
  Regex::new(&format!(r"(?i)\bby\s+({names})\b")).expect("valid deadline weekday regex")
});

static BY_DATE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)\bby\s+(\d{1,2})[./](\d{1,2})(?:[./](\d{2,4}))?\b")
    .expect("valid deadline date regex")
});

/// `date` at 23:59:00.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
  date.and_time(lexicon::clock(END_OF_DAY_CLOCK))
}

/// Resolve a "by <weekday>" or "by <date>" deadline.
///
/// A weekday resolves to its next occurrence strictly after `now`, the same
/// way event weekdays do. An impossible date means "no deadline".
pub fn find_deadline(text: &str, now: NaiveDateTime) -> Option<Found<NaiveDateTime>> {
  if let Some(caps) = BY_WEEKDAY_RE.captures(text)
    && let Some(weekday) = lexicon::lookup_weekday(DEADLINE_WEEKDAYS, &caps[1])
  {
    let date = temporal::resolve_weekday(now, weekday);
    return Some(Found::new(end_of_day(date), caps.get(0)?.range()));
  }

  let caps = BY_DATE_RE.captures(text)?;
  let date = temporal::date_from_captures(&caps, now)?;
  Some(Found::new(end_of_day(date), caps.get(0)?.range()))
}

pub fn parse_deadline(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
  find_deadline(text, now).map(|found| found.value)
}

/// Does the text carry a "by <weekday>" or "by <date>" phrase?
pub fn has_deadline_phrase(text: &str) -> bool {
  BY_WEEKDAY_RE.is_match(text) || BY_DATE_RE.is_match(text)
}

/// An "on <weekday>" mention read as a deadline, for tasks that name a day
/// without saying "by".
pub fn weekday_deadline(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
  let caps = ON_WEEKDAY_RE.captures(text)?;
  let weekday = lexicon::lookup_weekday(EVENT_WEEKDAYS, &caps[1])?;
  Some(end_of_day(temporal::resolve_weekday(now, weekday)))
}
