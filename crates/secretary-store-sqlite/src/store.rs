//! [`SqliteStore`], the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::{Local, NaiveDateTime, Timelike as _};
use rusqlite::OptionalExtension as _;
use tracing::warn;
use uuid::Uuid;

use secretary_core::{
  record::{NewRecord, NotificationFlags, Record, RecordKind, RecordStatus},
  store::{RangeQuery, RecordStore},
};

use crate::{
  Result,
  encode::{RECORD_COLUMNS, RawRecord, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A secretary record store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Run a `SELECT {RECORD_COLUMNS} ...` query and decode every row.
  ///
  /// Rows that fail to decode are logged and skipped so a single corrupt
  /// timestamp cannot blank out a whole schedule.
  async fn select_records(
    &self,
    sql: String,
    params: Vec<rusqlite::types::Value>,
  ) -> Result<Vec<Record>> {
    let raws: Vec<RawRecord> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawRecord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      raws
        .into_iter()
        .filter_map(|raw| {
          let id = raw.record_id.clone();
          match raw.into_record() {
            Ok(record) => Some(record),
            Err(e) => {
              warn!(record_id = %id, error = %e, "skipping undecodable record");
              None
            }
          }
        })
        .collect(),
    )
  }
}

/// The timestamp column a kind is scheduled by, if any.
fn schedule_column(kind: RecordKind) -> Option<&'static str> {
  match kind {
    RecordKind::Event => Some("start_at"),
    RecordKind::Task => Some("due_at"),
    RecordKind::Note => None,
  }
}

fn notified_column(kind: RecordKind) -> Option<&'static str> {
  match kind {
    RecordKind::Event => Some("event_notified"),
    RecordKind::Task => Some("due_notified"),
    RecordKind::Note => None,
  }
}

fn text(s: impl Into<String>) -> rusqlite::types::Value {
  rusqlite::types::Value::Text(s.into())
}

/// Wall-clock "now" truncated to the stored precision.
fn stored_now() -> NaiveDateTime {
  let now = Local::now().naive_local();
  now.with_nanosecond(0).unwrap_or(now)
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn insert_record(&self, input: NewRecord) -> Result<Record> {
    let record = Record {
      record_id:   Uuid::new_v4(),
      user_id:     input.user_id,
      kind:        input.kind,
      title:       input.title,
      description: input.description,
      start_at:    input.start_at,
      end_at:      input.end_at,
      due_at:      input.due_at,
      status:      RecordStatus::Active,
      notified:    NotificationFlags::default(),
      created_at:  stored_now(),
    };

    let id_str      = encode_uuid(record.record_id);
    let user_id     = record.user_id.clone();
    let kind_str    = record.kind.as_ref().to_owned();
    let title       = record.title.clone();
    let description = record.description.clone();
    let start_str   = record.start_at.map(encode_dt);
    let end_str     = record.end_at.map(encode_dt);
    let due_str     = record.due_at.map(encode_dt);
    let status_str  = record.status.as_ref().to_owned();
    let created_str = encode_dt(record.created_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO records (
             record_id, user_id, kind, title, description,
             start_at, end_at, due_at, status, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
          rusqlite::params![
            id_str,
            user_id,
            kind_str,
            title,
            description,
            start_str,
            end_str,
            due_str,
            status_str,
            created_str,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(record)
  }

  async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<bool> {
    let id_str     = encode_uuid(id);
    let status_str = status.as_ref().to_owned();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE records SET status = ?1 WHERE record_id = ?2",
          rusqlite::params![status_str, id_str],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn get_record(&self, id: Uuid) -> Result<Option<Record>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawRecord> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {RECORD_COLUMNS} FROM records WHERE record_id = ?1"),
            rusqlite::params![id_str],
            RawRecord::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRecord::into_record).transpose()
  }

  async fn find_active_events(&self, user_id: &str) -> Result<Vec<Record>> {
    self
      .select_records(
        format!(
          "SELECT {RECORD_COLUMNS} FROM records
           WHERE user_id = ?1
             AND kind = 'event'
             AND status = 'active'
             AND start_at IS NOT NULL
           ORDER BY rowid"
        ),
        vec![text(user_id)],
      )
      .await
  }

  async fn find_items_in_range(&self, query: &RangeQuery) -> Result<Vec<Record>> {
    let Some(column) = schedule_column(query.kind) else {
      return Ok(Vec::new());
    };

    self
      .select_records(
        format!(
          "SELECT {RECORD_COLUMNS} FROM records
           WHERE user_id = ?1
             AND kind = ?2
             AND status = 'active'
             AND {column} IS NOT NULL
             AND {column} >= ?3
             AND {column} < ?4
           ORDER BY {column}, rowid"
        ),
        vec![
          text(query.user_id.as_str()),
          text(query.kind.as_ref()),
          text(encode_dt(query.from)),
          text(encode_dt(query.until)),
        ],
      )
      .await
  }

  async fn list_items(
    &self,
    user_id: &str,
    kind: RecordKind,
    limit: usize,
  ) -> Result<Vec<Record>> {
    let order = match kind {
      RecordKind::Event => "start_at IS NULL, start_at, rowid",
      RecordKind::Task => "due_at IS NULL, due_at, rowid",
      RecordKind::Note => "created_at DESC, rowid DESC",
    };

    self
      .select_records(
        format!(
          "SELECT {RECORD_COLUMNS} FROM records
           WHERE user_id = ?1
             AND kind = ?2
             AND status = 'active'
           ORDER BY {order}
           LIMIT ?3"
        ),
        vec![
          text(user_id),
          text(kind.as_ref()),
          rusqlite::types::Value::Integer(i64::try_from(limit).unwrap_or(i64::MAX)),
        ],
      )
      .await
  }

  async fn list_user_ids(&self) -> Result<Vec<String>> {
    let ids = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare("SELECT DISTINCT user_id FROM records ORDER BY user_id")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(ids)
  }

  // ── Reminder bookkeeping ──────────────────────────────────────────────────

  async fn pending_reminders(&self, kind: RecordKind) -> Result<Vec<Record>> {
    let (Some(column), Some(flag)) = (schedule_column(kind), notified_column(kind))
    else {
      return Ok(Vec::new());
    };

    self
      .select_records(
        format!(
          "SELECT {RECORD_COLUMNS} FROM records
           WHERE kind = ?1
             AND status = 'active'
             AND {column} IS NOT NULL
             AND {flag} = 0
           ORDER BY {column}, rowid"
        ),
        vec![text(kind.as_ref())],
      )
      .await
  }

  async fn mark_notified(&self, id: Uuid, kind: RecordKind) -> Result<()> {
    let Some(flag) = notified_column(kind) else {
      return Ok(());
    };
    let id_str = encode_uuid(id);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          &format!("UPDATE records SET {flag} = 1 WHERE record_id = ?1"),
          rusqlite::params![id_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}
