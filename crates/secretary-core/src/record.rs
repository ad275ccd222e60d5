//! Record types: the only persisted entity the secretary manipulates.
//!
//! A record is created exactly once from classified input and is never edited
//! by the core afterwards. Rescheduling creates a new record; completion is a
//! status change owned by the storage layer.

use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};
use uuid::Uuid;

use crate::{Error, Result, occupancy::Occupancy};

/// Placeholder title used whenever normalisation leaves nothing behind.
pub const DEFAULT_TITLE: &str = "Untitled";

// ─── Discriminants ───────────────────────────────────────────────────────────

/// Which of the three record shapes an utterance was classified as.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordKind {
  Event,
  Task,
  Note,
}

impl RecordKind {
  /// Parse the discriminant stored in the `kind` column.
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownKind(s.to_owned()))
  }
}

/// Lifecycle status. Scheduling and conflict checks only ever read `Active`.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecordStatus {
  #[default]
  Active,
  Done,
}

impl RecordStatus {
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownStatus(s.to_owned()))
  }
}

/// Reminder bookkeeping. Owned by the reminder sweep; parsing and
/// classification never touch these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFlags {
  pub event_notified: bool,
  pub due_notified:   bool,
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A stored event, task, or note.
///
/// `start_at`/`end_at` are only populated for events and `due_at` only for
/// tasks. A due time of 23:59:00 means "by the end of that day".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
  pub record_id:   Uuid,
  pub user_id:     String,
  pub kind:        RecordKind,
  pub title:       String,
  pub description: String,
  pub start_at:    Option<NaiveDateTime>,
  pub end_at:      Option<NaiveDateTime>,
  pub due_at:      Option<NaiveDateTime>,
  pub status:      RecordStatus,
  pub notified:    NotificationFlags,
  /// Store-assigned; never changes after creation.
  pub created_at:  NaiveDateTime,
}

impl Record {
  pub fn is_active(&self) -> bool { self.status == RecordStatus::Active }

  /// The span this record occupies on the calendar, if it is a timed event.
  pub fn occupancy(&self) -> Option<Occupancy> {
    match (self.kind, self.start_at) {
      (RecordKind::Event, Some(start)) => Some(Occupancy::new(start, self.end_at)),
      _ => None,
    }
  }
}

// ─── NewRecord ───────────────────────────────────────────────────────────────

/// Input to [`crate::store::RecordStore::insert_record`].
/// `record_id`, `status` and `created_at` are always set by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
  pub user_id:     String,
  pub kind:        RecordKind,
  pub title:       String,
  pub description: String,
  pub start_at:    Option<NaiveDateTime>,
  pub end_at:      Option<NaiveDateTime>,
  pub due_at:      Option<NaiveDateTime>,
}

impl NewRecord {
  pub fn event(
    user_id: impl Into<String>,
    title: impl Into<String>,
    description: impl Into<String>,
    start_at: NaiveDateTime,
    end_at: Option<NaiveDateTime>,
  ) -> Self {
    Self {
      user_id: user_id.into(),
      kind: RecordKind::Event,
      title: title.into(),
      description: description.into(),
      start_at: Some(start_at),
      end_at,
      due_at: None,
    }
  }

  pub fn task(
    user_id: impl Into<String>,
    title: impl Into<String>,
    description: impl Into<String>,
    due_at: Option<NaiveDateTime>,
  ) -> Self {
    Self {
      user_id: user_id.into(),
      kind: RecordKind::Task,
      title: title.into(),
      description: description.into(),
      start_at: None,
      end_at: None,
      due_at,
    }
  }

  pub fn note(
    user_id: impl Into<String>,
    title: impl Into<String>,
    description: impl Into<String>,
  ) -> Self {
    Self {
      user_id: user_id.into(),
      kind: RecordKind::Note,
      title: title.into(),
      description: description.into(),
      start_at: None,
      end_at: None,
      due_at: None,
    }
  }
}
