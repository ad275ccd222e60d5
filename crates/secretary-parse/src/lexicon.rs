//! Word lists and fixed clock constants for the supported input language.

use chrono::{NaiveTime, Weekday};

// ─── Keywords ────────────────────────────────────────────────────────────────

/// Nouns that mark an utterance as an event. A trailing plural `s` is also
/// accepted.
pub const EVENT_NOUNS: &[&str] = &[
  "meeting",
  "call",
  "sync",
  "standup",
  "briefing",
  "interview",
  "demo",
  "appointment",
  "lunch",
  "dinner",
];

/// Verbs that mark an utterance as a task.
pub const TASK_VERBS: &[&str] = &[
  "write",
  "prepare",
  "check",
  "review",
  "buy",
  "send",
  "collect",
  "configure",
  "sort",
  "submit",
  "finish",
  "complete",
  "fix",
  "pay",
  "clean",
  "order",
];

// ─── Weekdays ────────────────────────────────────────────────────────────────

/// Weekday names accepted after "on" or at the very start of an event
/// mention. Includes the clipped calendar forms ("tues", "thurs").
pub const EVENT_WEEKDAYS: &[(&str, Weekday)] = &[
  ("monday", Weekday::Mon),
  ("mon", Weekday::Mon),
  ("tuesday", Weekday::Tue),
  ("tues", Weekday::Tue),
  ("tue", Weekday::Tue),
  ("wednesday", Weekday::Wed),
  ("wed", Weekday::Wed),
  ("thursday", Weekday::Thu),
  ("thurs", Weekday::Thu),
  ("thur", Weekday::Thu),
  ("thu", Weekday::Thu),
  ("friday", Weekday::Fri),
  ("fri", Weekday::Fri),
  ("saturday", Weekday::Sat),
  ("sat", Weekday::Sat),
  ("sunday", Weekday::Sun),
  ("sun", Weekday::Sun),
];

/// Weekday names recognised as the first word of an utterance. Clipped
/// forms that double as ordinary words ("sat", "sun", "wed", "mon") only
/// count after "on".
pub const LEADING_WEEKDAYS: &[(&str, Weekday)] = &[
  ("monday", Weekday::Mon),
  ("tuesday", Weekday::Tue),
  ("tues", Weekday::Tue),
  ("wednesday", Weekday::Wed),
  ("thursday", Weekday::Thu),
  ("thurs", Weekday::Thu),
  ("friday", Weekday::Fri),
  ("saturday", Weekday::Sat),
  ("sunday", Weekday::Sun),
];

/// Weekday names accepted after "by" in a deadline. Full names and the
/// three-letter forms only; kept apart from [`EVENT_WEEKDAYS`] on purpose.
pub const DEADLINE_WEEKDAYS: &[(&str, Weekday)] = &[
  ("monday", Weekday::Mon),
  ("mon", Weekday::Mon),
  ("tuesday", Weekday::Tue),
  ("tue", Weekday::Tue),
  ("wednesday", Weekday::Wed),
  ("wed", Weekday::Wed),
  ("thursday", Weekday::Thu),
  ("thu", Weekday::Thu),
  ("friday", Weekday::Fri),
  ("fri", Weekday::Fri),
  ("saturday", Weekday::Sat),
  ("sat", Weekday::Sat),
  ("sunday", Weekday::Sun),
  ("sun", Weekday::Sun),
];

pub fn lookup_weekday(table: &[(&str, Weekday)], word: &str) -> Option<Weekday> {
  let word = word.to_lowercase();
  table
    .iter()
    .find(|(name, _)| *name == word)
    .map(|&(_, weekday)| weekday)
}

/// Regex alternation over a weekday table, longest names first.
pub fn weekday_alternation(table: &[(&str, Weekday)]) -> String {
  let mut names: Vec<&str> = table.iter().map(|&(name, _)| name).collect();
  names.sort_by_key(|name| std::cmp::Reverse(name.len()));
  names.join("|")
}

// ─── Relative day words ──────────────────────────────────────────────────────

/// Day words and how many days after today they point to.
pub const DAY_WORDS: &[(&str, i64)] = &[
  ("day after tomorrow", 2),
  ("tomorrow", 1),
  ("today", 0),
  ("tonight", 0),
];

// ─── Clock constants ─────────────────────────────────────────────────────────

/// Part-of-day words and the fixed clock time each one stands for.
pub const PARTS_OF_DAY: &[(&str, (u32, u32))] = &[
  ("morning", (10, 0)),
  ("afternoon", (14, 0)),
  ("evening", (19, 0)),
  ("tonight", (19, 0)),
  ("night", (23, 0)),
];

/// Time assumed when only a day was named.
pub const DEFAULT_CLOCK: (u32, u32) = (10, 0);

/// Time a deadline is normalised to.
pub const END_OF_DAY_CLOCK: (u32, u32) = (23, 59);

/// Length of an event whose end was not stated.
pub const DEFAULT_EVENT_MINUTES: i64 = 30;

pub fn clock((hour, minute): (u32, u32)) -> NaiveTime {
  NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

// ─── Relative units ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeUnit {
  Minutes,
  Hours,
  Days,
  Weeks,
}

impl RelativeUnit {
  pub fn from_word(word: &str) -> Option<Self> {
    let word = word.to_lowercase();
    match word.as_str() {
      "minute" | "minutes" | "min" | "mins" => Some(Self::Minutes),
      "hour" | "hours" | "hr" | "hrs" | "h" => Some(Self::Hours),
      "day" | "days" => Some(Self::Days),
      "week" | "weeks" | "wk" | "wks" => Some(Self::Weeks),
      _ => None,
    }
  }
}

/// Words that may dangle at the end of a title once a phrase was cut out.
pub const DANGLING_STORED: &[&str] = &["at"];

/// Broader set used when temporal markers are stripped for display.
pub const DANGLING_RENDERED: &[&str] = &["at", "on", "by"];
