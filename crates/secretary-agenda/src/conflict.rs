//! Event conflict detection.
//!
//! A candidate event is checked against every active, timed event the user
//! already owns. The first collision in storage order is reported.

use chrono::{NaiveDate, NaiveDateTime};
use secretary_core::{occupancy::Occupancy, record::Record, store::RecordStore};
use secretary_parse::format::{format_clock, format_day_clock};
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

/// Why a new event was rejected, and what is needed to reschedule it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictReport {
  /// Day the rejected event was meant for.
  pub target_day:       NaiveDate,
  pub colliding_id:     Uuid,
  pub colliding_title:  String,
  pub colliding_start:  NaiveDateTime,
  /// `None` when the colliding event is a point.
  pub colliding_end:    Option<NaiveDateTime>,
  pub new_title:        String,
  /// Zero for a point event.
  pub duration_minutes: i64,
}

impl ConflictReport {
  pub fn new(candidate: Occupancy, new_title: impl Into<String>, colliding: &Record) -> Self {
    let existing = colliding.occupancy();
    let duration_minutes = candidate
      .end()
      .map_or(0, |end| (end - candidate.start()).num_minutes());
    Self {
      target_day: candidate.start().date(),
      colliding_id: colliding.record_id,
      colliding_title: colliding.title.clone(),
      colliding_start: existing.map_or(candidate.start(), |o| o.start()),
      colliding_end: existing.and_then(|o| o.end()),
      new_title: new_title.into(),
      duration_minutes,
    }
  }

  /// One-line prose rendering for text-only transports.
  pub fn message(&self) -> String {
    let span = match self.colliding_end {
      Some(end) if end > self.colliding_start => {
        format!("{}-{}", format_day_clock(self.colliding_start), format_clock(end))
      }
      _ => format_day_clock(self.colliding_start),
    };
    format!(
      "Can't add: '{}' is already scheduled at that time ({span}).",
      self.colliding_title
    )
  }
}

/// Return the first active event of `user_id` that `candidate` collides
/// with.
///
/// A storage failure is logged and treated as "no conflict".
pub async fn find_conflict<S>(store: &S, user_id: &str, candidate: Occupancy) -> Option<Record>
where
  S: RecordStore,
{
  let existing = match store.find_active_events(user_id).await {
    Ok(records) => records,
    Err(e) => {
      warn!(user_id, error = %e, "conflict check skipped: could not load events");
      return None;
    }
  };

  existing.into_iter().find(|record| {
    record
      .occupancy()
      .is_some_and(|occupied| candidate.collides_with(&occupied))
  })
}
