//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are naive local times written as `YYYY-MM-DDTHH:MM:SS`, which
//! sorts lexicographically in chronological order. UUIDs are stored as
//! hyphenated lowercase strings.

use chrono::NaiveDateTime;
use secretary_core::record::{
  NotificationFlags, Record, RecordKind, RecordStatus,
};
use uuid::Uuid;

use crate::{Error, Result};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

// ─── Uuid ────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDateTime ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: NaiveDateTime) -> String { dt.format(TIMESTAMP_FORMAT).to_string() }

/// Accepts the canonical form, optional fractional seconds, and a space in
/// place of the `T` separator.
pub fn decode_dt(s: &str) -> Result<NaiveDateTime> {
  ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    .ok_or_else(|| Error::Decode(format!("bad timestamp: {s:?}")))
}

fn decode_opt_dt(s: Option<String>) -> Result<Option<NaiveDateTime>> {
  s.as_deref().map(decode_dt).transpose()
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawRecord`].
pub const RECORD_COLUMNS: &str = "record_id, user_id, kind, title, description, \
                                  start_at, end_at, due_at, status, \
                                  event_notified, due_notified, created_at";

/// Raw values read directly from a `records` row.
pub struct RawRecord {
  pub record_id:      String,
  pub user_id:        String,
  pub kind:           String,
  pub title:          String,
  pub description:    String,
  pub start_at:       Option<String>,
  pub end_at:         Option<String>,
  pub due_at:         Option<String>,
  pub status:         String,
  pub event_notified: bool,
  pub due_notified:   bool,
  pub created_at:     String,
}

impl RawRecord {
  /// Read a row selected with [`RECORD_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      record_id:      row.get(0)?,
      user_id:        row.get(1)?,
      kind:           row.get(2)?,
      title:          row.get(3)?,
      description:    row.get(4)?,
      start_at:       row.get(5)?,
      end_at:         row.get(6)?,
      due_at:         row.get(7)?,
      status:         row.get(8)?,
      event_notified: row.get(9)?,
      due_notified:   row.get(10)?,
      created_at:     row.get(11)?,
    })
  }

  pub fn into_record(self) -> Result<Record> {
    Ok(Record {
      record_id:   decode_uuid(&self.record_id)?,
      user_id:     self.user_id,
      kind:        RecordKind::parse(&self.kind)?,
      title:       self.title,
      description: self.description,
      start_at:    decode_opt_dt(self.start_at)?,
      end_at:      decode_opt_dt(self.end_at)?,
      due_at:      decode_opt_dt(self.due_at)?,
      status:      RecordStatus::parse(&self.status)?,
      notified:    NotificationFlags {
        event_notified: self.event_notified,
        due_notified:   self.due_notified,
      },
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  #[test]
  fn timestamps_round_trip_at_second_precision() {
    let dt = NaiveDate::from_ymd_opt(2024, 1, 2)
      .unwrap()
      .and_hms_opt(15, 0, 0)
      .unwrap();
    assert_eq!(encode_dt(dt), "2024-01-02T15:00:00");
    assert_eq!(decode_dt("2024-01-02T15:00:00").unwrap(), dt);
    assert_eq!(decode_dt("2024-01-02 15:00:00").unwrap(), dt);
    assert_eq!(decode_dt("2024-01-02T15:00").unwrap(), dt);
    assert_eq!(decode_dt("2024-01-02T15:00:00.000").unwrap(), dt);
  }

  #[test]
  fn garbage_timestamp_is_a_decode_error() {
    assert!(matches!(decode_dt("next tuesday"), Err(Error::Decode(_))));
  }
}
