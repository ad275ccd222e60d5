//! Input orchestration: raw text in, a stored record or a conflict out.

use chrono::{NaiveDateTime, TimeDelta};
use secretary_core::{
  occupancy::Occupancy,
  record::{NewRecord, Record, RecordKind},
  store::RecordStore,
};
use secretary_parse::{
  classify,
  format::{format_clock, format_date, format_datetime, is_end_of_day},
  lexicon::{self, DEFAULT_CLOCK, DEFAULT_EVENT_MINUTES},
  split_title_desc,
};
use serde::Serialize;
use tracing::info;

use crate::{
  Error, Result,
  conflict::{ConflictReport, find_conflict},
};

/// What happened to one piece of input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
  Created { record: Record },
  Conflict { conflict: ConflictReport },
}

impl Outcome {
  /// Prose rendering for text-only transports.
  pub fn message(&self) -> String {
    match self {
      Self::Created { record } => created_message(record),
      Self::Conflict { conflict } => conflict.message(),
    }
  }
}

/// Classify `text`, and store it unless it is an event that collides with
/// one the user already has.
///
/// Events without a resolved start are placed at 10:00 tomorrow; events
/// without an end last 30 minutes. An end that is not after the start makes
/// a point event, stored without an end.
pub async fn handle_input<S>(
  store: &S,
  user_id: &str,
  text: &str,
  now: NaiveDateTime,
) -> Result<Outcome>
where
  S: RecordStore,
{
  let classification = classify(text, now);
  let (title, description) = split_title_desc(text);

  let input = match classification.kind {
    RecordKind::Event => {
      let start = classification.start_at.unwrap_or_else(|| default_start(now));
      let end = classification
        .end_at
        .or_else(|| start.checked_add_signed(TimeDelta::minutes(DEFAULT_EVENT_MINUTES)));
      let occupancy = Occupancy::new(start, end);

      if let Some(colliding) = find_conflict(store, user_id, occupancy).await {
        info!(
          user_id,
          colliding_id = %colliding.record_id,
          start = %start,
          "event rejected: slot already taken"
        );
        let conflict = ConflictReport::new(occupancy, title, &colliding);
        return Ok(Outcome::Conflict { conflict });
      }

      NewRecord::event(user_id, title, description, start, occupancy.end())
    }
    RecordKind::Task => NewRecord::task(user_id, title, description, classification.due_at),
    RecordKind::Note => NewRecord::note(user_id, title, description),
  };

  let record = store.insert_record(input).await.map_err(Error::store)?;
  info!(user_id, record_id = %record.record_id, kind = %record.kind, "record created");
  Ok(Outcome::Created { record })
}

fn default_start(now: NaiveDateTime) -> NaiveDateTime {
  let tomorrow = now.date().succ_opt().unwrap_or(now.date());
  tomorrow.and_time(lexicon::clock(DEFAULT_CLOCK))
}

fn created_message(record: &Record) -> String {
  match record.kind {
    RecordKind::Event => {
      let when = match (record.start_at, record.end_at) {
        (Some(start), Some(end)) if end > start => {
          format!("{} - {}", format_datetime(start), format_clock(end))
        }
        (Some(start), _) => format_datetime(start),
        (None, _) => String::new(),
      };
      format!("Added event: {}\n{when}", record.title)
    }
    RecordKind::Task => match record.due_at {
      Some(due) if is_end_of_day(due) => {
        format!("Added task: {} (due {})", record.title, format_date(due.date()))
      }
      Some(due) => format!("Added task: {} (due {})", record.title, format_datetime(due)),
      None => format!("Added task: {}", record.title),
    },
    RecordKind::Note => "Added note.".to_owned(),
  }
}
