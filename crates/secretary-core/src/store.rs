//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g.
//! `secretary-store-sqlite`). Higher layers (`secretary-agenda`,
//! `secretary-api`) depend on this abstraction, not on any concrete backend.
//! Every method hands back fully decoded [`Record`]s; nothing above this line
//! ever sees a raw row or a timestamp string.

use std::future::Future;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::record::{NewRecord, Record, RecordKind, RecordStatus};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`RecordStore::find_items_in_range`].
///
/// The window is half-open, `[from, until)`. Events are matched on
/// `start_at`, tasks on `due_at`; notes carry no timestamp and never match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeQuery {
  pub user_id: String,
  pub kind:    RecordKind,
  pub from:    NaiveDateTime,
  pub until:   NaiveDateTime,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a secretary record store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Persist a new record and return it with its store-assigned fields.
  fn insert_record(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<Record, Self::Error>> + Send + '_;

  /// Change a record's status. Returns `false` if no such record exists.
  fn set_status(
    &self,
    id: Uuid,
    status: RecordStatus,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// Retrieve a record by id. Returns `None` if not found.
  fn get_record(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Record>, Self::Error>> + Send + '_;

  /// All of a user's active events that have a start time, in storage
  /// (insertion) order.
  fn find_active_events<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + 'a;

  /// Active events or tasks whose timestamp falls inside the query window,
  /// ordered by that timestamp.
  fn find_items_in_range<'a>(
    &'a self,
    query: &'a RangeQuery,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + 'a;

  /// Listing view for a single kind.
  ///
  /// Tasks: active only, earliest due first, undated last. Notes: newest
  /// first. Events: by start time.
  fn list_items<'a>(
    &'a self,
    user_id: &'a str,
    kind: RecordKind,
    limit: usize,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + 'a;

  /// Every user id that owns at least one record.
  fn list_user_ids(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Reminder bookkeeping ──────────────────────────────────────────────

  /// Active events (or tasks) with a start (or due) time whose notification
  /// flag is still unset. `Note` yields nothing.
  fn pending_reminders(
    &self,
    kind: RecordKind,
  ) -> impl Future<Output = Result<Vec<Record>, Self::Error>> + Send + '_;

  /// Set the event or due notification flag for `id`.
  fn mark_notified(
    &self,
    id: Uuid,
    kind: RecordKind,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
