//! Display formats for dates and times, and the two sentinel clock times.

use chrono::{NaiveDate, NaiveDateTime};

use crate::lexicon::{self, DEFAULT_CLOCK, END_OF_DAY_CLOCK};

/// `dd.mm.yyyy`
pub fn format_date(date: NaiveDate) -> String { date.format("%d.%m.%Y").to_string() }

/// `dd.mm.yyyy HH:MM`
pub fn format_datetime(at: NaiveDateTime) -> String {
  at.format("%d.%m.%Y %H:%M").to_string()
}

/// `HH:MM`
pub fn format_clock(at: NaiveDateTime) -> String { at.format("%H:%M").to_string() }

/// `dd.mm HH:MM`
pub fn format_day_clock(at: NaiveDateTime) -> String {
  at.format("%d.%m %H:%M").to_string()
}

/// `HH:MM-HH:MM` for an interval, `HH:MM` for a point.
pub fn format_clock_range(start: NaiveDateTime, end: Option<NaiveDateTime>) -> String {
  match end {
    Some(end) if end > start => format!("{}-{}", format_clock(start), format_clock(end)),
    _ => format_clock(start),
  }
}

/// A deadline normalised to the end of its day (23:59:00).
pub fn is_end_of_day(at: NaiveDateTime) -> bool { at.time() == lexicon::clock(END_OF_DAY_CLOCK) }

/// The time assumed when only a day was named (10:00:00).
pub fn is_default_morning(at: NaiveDateTime) -> bool { at.time() == lexicon::clock(DEFAULT_CLOCK) }
