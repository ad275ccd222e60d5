//! Decides whether an utterance is an event, a task, or a note, and which
//! temporal fields it carries.

use chrono::NaiveDateTime;
use secretary_core::record::RecordKind;
use tracing::debug;

use crate::{
  deadline, duration,
  lexicon::{EVENT_NOUNS, TASK_VERBS},
  temporal,
};

/// The kind picked for an utterance together with its resolved times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
  pub kind:     RecordKind,
  pub start_at: Option<NaiveDateTime>,
  pub end_at:   Option<NaiveDateTime>,
  pub due_at:   Option<NaiveDateTime>,
}

impl Classification {
  fn note() -> Self {
    Self {
      kind:     RecordKind::Note,
      start_at: None,
      end_at:   None,
      due_at:   None,
    }
  }
}

/// Lowercased alphanumeric words of `text`, in order.
fn words(text: &str) -> Vec<String> {
  text
    .split(|c: char| !c.is_alphanumeric())
    .filter(|w| !w.is_empty())
    .map(str::to_lowercase)
    .collect()
}

fn has_event_noun(words: &[String]) -> bool {
  words.iter().any(|w| {
    let singular = w.strip_suffix('s').unwrap_or(w);
    EVENT_NOUNS.contains(&w.as_str()) || EVENT_NOUNS.contains(&singular)
  })
}

fn has_task_verb(words: &[String]) -> bool {
  words.iter().any(|w| TASK_VERBS.contains(&w.as_str()))
}

/// Classify `text` relative to `now`.
///
/// Precedence, first match wins:
/// 1. **Task**: a task verb, or a deadline phrase. A task verb without a
///    deadline picks up an "on <weekday>" mention as an end-of-day deadline.
/// 2. **Event**: an event noun, or any resolvable time slot. A duration
///    phrase replaces the default end.
/// 3. **Note**: everything else.
pub fn classify(text: &str, now: NaiveDateTime) -> Classification {
  let raw = text.trim();
  if raw.is_empty() {
    return Classification::note();
  }

  let words = words(raw);
  let slot = temporal::parse_slot(raw, now);
  let is_event = has_event_noun(&words);
  let is_task = has_task_verb(&words);

  let mut due_at = deadline::parse_deadline(raw, now);
  if is_task && due_at.is_none() {
    due_at = deadline::weekday_deadline(raw, now);
  }

  let classification = if is_task || due_at.is_some() {
    Classification {
      kind: RecordKind::Task,
      start_at: None,
      end_at: None,
      due_at,
    }
  } else if is_event || slot.is_some() {
    let start_at = slot.map(|s| s.start);
    let mut end_at = slot.map(|s| s.end);
    if let Some(start) = start_at
      && let Some(found) = duration::find_duration(raw)
    {
      end_at = start.checked_add_signed(found.value).or(end_at);
    }
    Classification {
      kind: RecordKind::Event,
      start_at,
      end_at,
      due_at: None,
    }
  } else {
    Classification::note()
  };

  debug!(
    kind = %classification.kind,
    is_event,
    is_task,
    has_slot = slot.is_some(),
    "classified input"
  );
  classification
}
