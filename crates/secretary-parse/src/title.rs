//! Title/description normalisation and display-time marker stripping.
//!
//! Stored titles keep their date, time, and weekday words. Those are only
//! removed when a title is shown next to an explicit time, or when a rejected
//! event is carried into a reschedule.

use std::sync::LazyLock;

use regex::Regex;
use secretary_core::record::DEFAULT_TITLE;

use crate::{
  duration,
  lexicon::{self, DANGLING_RENDERED, DANGLING_STORED, LEADING_WEEKDAYS},
  span::{collapse_whitespace, trim_edges},
  temporal::{
    DATE_RE, DAY_WORD_RE, LEADING_WEEKDAY_RE, ON_WEEKDAY_RE, RELATIVE_RE, TIME_RE,
  },
};

/// Titles longer than this many characters are cut.
pub const MAX_TITLE_CHARS: usize = 120;
const TRUNCATED_CHARS: usize = 117;
const ELLIPSIS: &str = "...";

static DATE_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)(?:\bon\s+)?\b\d{1,2}[./]\d{1,2}(?:[./]\d{2,4})?\b")
    .expect("valid date marker regex")
});

static TIME_MARKER_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)(?:\bat\s+)?\b(?:[01]?\d|2[0-3]):[0-5]\d\b")
    .expect("valid time marker regex")
});

static ANY_WEEKDAY_RE: LazyLock<Regex> = LazyLock::new(|| {
  let names = lexicon::weekday_alternation(LEADING_WEEKDAYS);
  Regex::new(&format!(r"(?i)\b({names})\b")).expect("valid weekday word regex")
});

// ─── Storage-time normalisation ──────────────────────────────────────────────

/// Split raw input into a title and a description.
///
/// The first line becomes the title, with any duration phrase removed; the
/// rest of the text becomes the description verbatim (trimmed).
pub fn split_title_desc(text: &str) -> (String, String) {
  let text = text.trim();
  if text.is_empty() {
    return (DEFAULT_TITLE.to_owned(), String::new());
  }

  let (first, rest) = match text.split_once('\n') {
    Some((first, rest)) => (first.trim(), rest.trim()),
    None => (text, ""),
  };

  let (_, title) = duration::parse_duration(first);
  (normalize_title(&title), rest.to_owned())
}

/// Collapse whitespace, drop a dangling "at", truncate, and fall back to the
/// placeholder when nothing is left.
pub fn normalize_title(title: &str) -> String {
  let title = strip_dangling(&collapse_whitespace(title), DANGLING_STORED);
  if title.is_empty() {
    return DEFAULT_TITLE.to_owned();
  }
  truncate(title)
}

fn truncate(title: String) -> String {
  if title.chars().count() <= MAX_TITLE_CHARS {
    return title;
  }
  let head: String = title.chars().take(TRUNCATED_CHARS).collect();
  format!("{}{ELLIPSIS}", head.trim_end())
}

/// Remove trailing words from `words` (case-insensitive) along with edge
/// punctuation, repeatedly.
fn strip_dangling(text: &str, words: &[&str]) -> String {
  let mut current = trim_edges(text);
  loop {
    let (head, last) = current.rsplit_once(' ').unwrap_or(("", current));
    if last.is_empty() || !words.iter().any(|w| w.eq_ignore_ascii_case(last)) {
      return current.to_owned();
    }
    current = trim_edges(head);
  }
}

// ─── Display-time stripping ──────────────────────────────────────────────────

/// Remove relative offsets, weekday phrases, day words, numeric dates and
/// clock times, plus any "at", "on" or "by" they leave dangling.
///
/// Used for timed schedule lines and for the title carried into a
/// reschedule.
pub fn strip_temporal_markers(text: &str) -> String {
  let mut out = RELATIVE_RE.replace_all(text, " ").into_owned();
  out = ON_WEEKDAY_RE.replace_all(&out, " ").into_owned();
  out = LEADING_WEEKDAY_RE.replace(&out, " ").into_owned();
  out = DAY_WORD_RE.replace_all(&out, " ").into_owned();
  out = DATE_MARKER_RE.replace_all(&out, " ").into_owned();
  out = TIME_MARKER_RE.replace_all(&out, " ").into_owned();
  or_placeholder(strip_dangling(&collapse_whitespace(&out), DANGLING_RENDERED))
}

/// Remove only "on <weekday>" phrases. Used for all-day bucket entries,
/// where the date is already given by the enclosing block.
pub fn strip_weekday_phrase(text: &str) -> String {
  let out = ON_WEEKDAY_RE.replace_all(text, " ");
  or_placeholder(trim_edges(&collapse_whitespace(&out)).to_owned())
}

/// The title carried into a reschedule after a conflict.
pub fn clean_for_reschedule(title: &str) -> String { strip_temporal_markers(title) }

fn or_placeholder(text: String) -> String {
  if text.is_empty() { DEFAULT_TITLE.to_owned() } else { text }
}

// ─── Marker checks ───────────────────────────────────────────────────────────

/// Does the text carry a clock time or a numeric date?
pub fn has_explicit_date_or_time(text: &str) -> bool {
  TIME_RE.is_match(text) || DATE_RE.is_match(text)
}

/// Does the text carry any phrase that pins it to a time: a clock time, a
/// numeric date, a day word, a full weekday name, or "on <weekday>"?
pub fn has_event_time_phrase(text: &str) -> bool {
  has_explicit_date_or_time(text)
    || DAY_WORD_RE.is_match(text)
    || ANY_WEEKDAY_RE.is_match(text)
    || ON_WEEKDAY_RE.is_match(text)
}

/// Does the text carry a clock time?
pub fn has_clock_time(text: &str) -> bool { TIME_RE.is_match(text) }

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn first_line_is_title_rest_is_description() {
    let (title, desc) = split_title_desc("  Lunch with Sam\n  bring the contract\nand pens ");
    assert_eq!(title, "Lunch with Sam");
    assert_eq!(desc, "bring the contract\nand pens");
  }

  #[test]
  fn duration_is_cut_but_time_words_stay() {
    let (title, _) = split_title_desc("meeting tomorrow at 15:00 for 1 hour");
    assert_eq!(title, "meeting tomorrow at 15:00");
  }

  #[test]
  fn dangling_at_is_removed() {
    let (title, _) = split_title_desc("sync at for 30 minutes");
    assert_eq!(title, "sync");
    assert_eq!(normalize_title("standup   at"), "standup");
  }

  #[test]
  fn empty_input_gets_placeholder() {
    assert_eq!(split_title_desc("   "), (DEFAULT_TITLE.to_owned(), String::new()));
    assert_eq!(split_title_desc("for 2 hours").0, DEFAULT_TITLE);
  }

  #[test]
  fn long_titles_are_truncated() {
    let long = "a".repeat(150);
    let title = normalize_title(&long);
    assert_eq!(title.chars().count(), 120);
    assert!(title.ends_with("..."));

    let exact = "b".repeat(120);
    assert_eq!(normalize_title(&exact), exact);
  }

  #[test]
  fn truncation_counts_characters_not_bytes() {
    let long = "é".repeat(130);
    let title = normalize_title(&long);
    assert_eq!(title.chars().count(), 120);
  }

  #[test]
  fn temporal_markers_are_stripped_for_display() {
    assert_eq!(strip_temporal_markers("meeting tomorrow at 15:00"), "meeting");
    assert_eq!(strip_temporal_markers("Friday retro 15:00"), "retro");
    assert_eq!(strip_temporal_markers("dentist on thurs 12.02 at 08:30"), "dentist");
    assert_eq!(strip_temporal_markers("call Bob at 10:00 about taxes"), "call Bob about taxes");
    assert_eq!(strip_temporal_markers("tomorrow 10:00"), DEFAULT_TITLE);
    assert_eq!(clean_for_reschedule("sync with Ana in 2 hours"), "sync with Ana");
  }

  #[test]
  fn weekday_phrase_only() {
    assert_eq!(strip_weekday_phrase("send report on wednesday"), "send report");
    assert_eq!(strip_weekday_phrase("buy milk by Friday"), "buy milk by Friday");
    assert_eq!(strip_weekday_phrase("on monday"), DEFAULT_TITLE);
  }

  #[test]
  fn marker_checks() {
    assert!(has_explicit_date_or_time("pay rent 01.02"));
    assert!(has_explicit_date_or_time("pay rent 9:15"));
    assert!(!has_explicit_date_or_time("pay rent tomorrow"));
    assert!(has_event_time_phrase("pay rent tomorrow"));
    assert!(has_event_time_phrase("yoga on sat"));
    assert!(!has_event_time_phrase("yoga class"));
    assert!(!has_event_time_phrase("Sat with Ana"));
    assert!(has_clock_time("report 18:00"));
  }

  #[test]
  fn normalising_a_marker_free_title_is_identity() {
    for title in [
      "Lunch with Sam",
      "Quarterly planning, part 2",
      "Ask Dana about the lease",
      "Untitled",
    ] {
      assert_eq!(normalize_title(&strip_temporal_markers(title)), title);
    }
  }
}
