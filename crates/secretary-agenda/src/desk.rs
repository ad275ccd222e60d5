//! The front desk: one entry point per user message.
//!
//! [`Desk`] ties a [`RecordStore`], a [`Clock`] and the per-user
//! [`SessionStore`] together. A user's messages are handled one at a time;
//! different users proceed concurrently.

use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};
use secretary_core::{
  clock::{Clock, SystemClock},
  record::{Record, RecordStatus},
  store::RecordStore,
};
use secretary_parse::format::format_date;
use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
  Error, Result,
  conflict::ConflictReport,
  intake::{Outcome, handle_input},
  render,
  session::{PendingResolution, Resolution, SessionStore, resolve_reply},
};

/// The answer to one user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reply", rename_all = "snake_case")]
pub enum Reply {
  Created { record: Record, message: String },
  /// The event was rejected; `message` carries the day's plan and the
  /// reschedule prompt.
  Conflict { conflict: ConflictReport, message: String },
  /// A new date was accepted; a time is still needed.
  AwaitingTime { day: NaiveDate, message: String },
}

impl Reply {
  pub fn message(&self) -> &str {
    match self {
      Self::Created { message, .. }
      | Self::Conflict { message, .. }
      | Self::AwaitingTime { message, .. } => message,
    }
  }
}

pub struct Desk<S, C = SystemClock> {
  store:    Arc<S>,
  clock:    C,
  sessions: SessionStore,
}

impl<S, C> Desk<S, C>
where
  S: RecordStore,
  C: Clock,
{
  pub fn new(store: Arc<S>, clock: C) -> Self {
    Self { store, clock, sessions: SessionStore::new() }
  }

  pub fn store(&self) -> &Arc<S> { &self.store }

  pub fn now(&self) -> NaiveDateTime { self.clock.now() }

  /// Handle one message from `user_id`.
  ///
  /// A pending conflict resolution is always consumed: the reply either
  /// reschedules the rejected event, moves it to a new day, or is dropped in
  /// favour of treating the text as fresh input.
  pub async fn handle_message(&self, user_id: &str, text: &str) -> Result<Reply> {
    let session = self.sessions.session(user_id).await;
    let mut pending = session.lock().await;
    let now = self.clock.now();

    let input = match pending.take() {
      None => text.to_owned(),
      Some(waiting) => match resolve_reply(&waiting, text, now) {
        Resolution::Reschedule(synthesized) => {
          debug!(user_id, %synthesized, "rescheduling rejected event");
          synthesized
        }
        Resolution::AwaitTime(day) => {
          debug!(user_id, %day, "reschedule date accepted");
          *pending = Some(PendingResolution { target_day: day, ..waiting });
          let message = format!("Date accepted: {}. Now send the time as HH:MM.", format_date(day));
          return Ok(Reply::AwaitingTime { day, message });
        }
        Resolution::Fallthrough => {
          debug!(user_id, "pending resolution dropped");
          text.to_owned()
        }
      },
    };

    match handle_input(self.store.as_ref(), user_id, &input, now).await? {
      Outcome::Created { record } => {
        let message = Outcome::Created { record: record.clone() }.message();
        Ok(Reply::Created { record, message })
      }
      Outcome::Conflict { conflict } => {
        *pending = Some(PendingResolution::from_report(&conflict));
        let message = render::conflict_view(self.store.as_ref(), user_id, &conflict).await;
        Ok(Reply::Conflict { conflict, message })
      }
    }
  }

  /// Drop any pending resolution. Returns whether one existed.
  pub async fn cancel(&self, user_id: &str) -> bool {
    let session = self.sessions.session(user_id).await;
    let cancelled = session.lock().await.take().is_some();
    if cancelled {
      info!(user_id, "pending resolution cancelled");
    }
    cancelled
  }

  /// The user's pending resolution, if any.
  pub async fn pending(&self, user_id: &str) -> Option<PendingResolution> {
    self.sessions.pending(user_id).await
  }

  /// Mark a record done. Returns `false` when no such record exists.
  pub async fn complete(&self, record_id: Uuid) -> Result<bool> {
    let updated = self
      .store
      .set_status(record_id, RecordStatus::Done)
      .await
      .map_err(Error::store)?;
    if updated {
      info!(%record_id, "record completed");
    }
    Ok(updated)
  }

  // ─── Views ───────────────────────────────────────────────────────────────

  pub async fn today(&self, user_id: &str) -> Option<String> {
    render::today_summary(self.store.as_ref(), user_id, self.clock.now().date()).await
  }

  pub async fn schedule(&self, user_id: &str, days: u32) -> String {
    render::period_schedule(self.store.as_ref(), user_id, self.clock.now().date(), days).await
  }

  pub async fn tasks(&self, user_id: &str) -> String {
    render::task_list(self.store.as_ref(), user_id).await
  }

  pub async fn notes(&self, user_id: &str) -> String {
    render::note_list(self.store.as_ref(), user_id).await
  }
}

#[cfg(test)]
mod tests {
  use secretary_core::{clock::FixedClock, record::RecordKind};
  use secretary_store_sqlite::SqliteStore;

  use super::*;

  fn dt(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, mo, d)
      .unwrap()
      .and_hms_opt(h, mi, 0)
      .unwrap()
  }

  async fn desk() -> Desk<SqliteStore, FixedClock> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    Desk::new(Arc::new(store), FixedClock(dt(2024, 1, 1, 9, 0)))
  }

  const MEETING: &str = "meeting tomorrow at 15:00 for 1 hour";

  async fn conflicted(desk: &Desk<SqliteStore, FixedClock>) {
    desk.handle_message("u1", MEETING).await.unwrap();
    let reply = desk.handle_message("u1", MEETING).await.unwrap();
    assert!(matches!(reply, Reply::Conflict { .. }), "{reply:?}");
  }

  #[tokio::test]
  async fn conflict_view_includes_plan_and_prompt() {
    let desk = desk().await;
    desk.handle_message("u1", MEETING).await.unwrap();
    let reply = desk.handle_message("u1", MEETING).await.unwrap();
    let message = reply.message();
    assert!(message.starts_with("Can't add: 'meeting tomorrow at 15:00'"));
    assert!(message.contains("Plan for 02.01.2024:"));
    assert!(message.contains("15:00-16:00 meeting"));
    assert!(message.ends_with("Reply with a new time (HH:MM), a new date (DD.MM), or both."));

    let pending = desk.pending("u1").await.unwrap();
    assert_eq!(pending.title, "meeting");
    assert_eq!(pending.duration_minutes, 60);
    assert_eq!(pending.target_day, NaiveDate::from_ymd_opt(2024, 1, 2).unwrap());
  }

  #[tokio::test]
  async fn bare_time_reschedules_same_day() {
    let desk = desk().await;
    conflicted(&desk).await;

    let reply = desk.handle_message("u1", "17:00").await.unwrap();
    let Reply::Created { record, .. } = reply else {
      panic!("expected a created event, got {reply:?}");
    };
    assert_eq!(record.kind, RecordKind::Event);
    assert_eq!(record.start_at, Some(dt(2024, 1, 2, 17, 0)));
    assert_eq!(record.end_at, Some(dt(2024, 1, 2, 18, 0)));
    assert!(desk.pending("u1").await.is_none());
  }

  #[tokio::test]
  async fn date_then_time() {
    let desk = desk().await;
    conflicted(&desk).await;

    let reply = desk.handle_message("u1", "05.01").await.unwrap();
    assert_eq!(
      reply,
      Reply::AwaitingTime {
        day:     NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
        message: "Date accepted: 05.01.2024. Now send the time as HH:MM.".into(),
      }
    );

    let reply = desk.handle_message("u1", "15:00").await.unwrap();
    let Reply::Created { record, .. } = reply else {
      panic!("expected a created event, got {reply:?}");
    };
    assert_eq!(record.start_at, Some(dt(2024, 1, 5, 15, 0)));
    assert_eq!(record.end_at, Some(dt(2024, 1, 5, 16, 0)));
  }

  #[tokio::test]
  async fn date_and_time_together() {
    let desk = desk().await;
    conflicted(&desk).await;

    let reply = desk.handle_message("u1", "03.01 09:30").await.unwrap();
    let Reply::Created { record, .. } = reply else {
      panic!("expected a created event, got {reply:?}");
    };
    assert_eq!(record.start_at, Some(dt(2024, 1, 3, 9, 30)));
    assert_eq!(record.end_at, Some(dt(2024, 1, 3, 10, 30)));
  }

  #[tokio::test]
  async fn reschedule_into_another_conflict_waits_again() {
    let desk = desk().await;
    conflicted(&desk).await;

    let reply = desk.handle_message("u1", "15:30").await.unwrap();
    assert!(matches!(reply, Reply::Conflict { .. }));
    assert!(desk.pending("u1").await.is_some());
  }

  #[tokio::test]
  async fn unrelated_reply_is_new_input() {
    let desk = desk().await;
    conflicted(&desk).await;

    let reply = desk.handle_message("u1", "buy milk by Friday").await.unwrap();
    let Reply::Created { record, .. } = reply else {
      panic!("expected a created task, got {reply:?}");
    };
    assert_eq!(record.kind, RecordKind::Task);
    assert!(desk.pending("u1").await.is_none());
  }

  #[tokio::test]
  async fn cancel_clears_pending() {
    let desk = desk().await;
    assert!(!desk.cancel("u1").await);
    conflicted(&desk).await;
    assert!(desk.cancel("u1").await);
    assert!(desk.pending("u1").await.is_none());

    // A bare time is now fresh input: an event at today 17:00.
    let reply = desk.handle_message("u1", "17:00").await.unwrap();
    let Reply::Created { record, .. } = reply else {
      panic!("expected a created event, got {reply:?}");
    };
    assert_eq!(record.start_at, Some(dt(2024, 1, 1, 17, 0)));
  }

  #[tokio::test]
  async fn sessions_do_not_leak_between_users() {
    let desk = desk().await;
    conflicted(&desk).await;
    assert!(desk.pending("u2").await.is_none());

    let reply = desk.handle_message("u2", "17:00").await.unwrap();
    let Reply::Created { record, .. } = reply else {
      panic!("expected a created event, got {reply:?}");
    };
    assert_eq!(record.user_id, "u2");
    assert!(desk.pending("u1").await.is_some());
  }

  #[tokio::test]
  async fn reply_serialises_with_tag() {
    let desk = desk().await;
    let reply = desk.handle_message("u1", "random thought").await.unwrap();
    let json = serde_json::to_value(&reply).unwrap();
    assert_eq!(json["reply"], "created");
    assert_eq!(json["record"]["kind"], "note");
    assert_eq!(json["message"], "Added note.");
  }

  #[tokio::test]
  async fn complete_marks_done() {
    let desk = desk().await;
    let reply = desk.handle_message("u1", "review the budget").await.unwrap();
    let Reply::Created { record, .. } = reply else { panic!("{reply:?}") };

    assert!(desk.complete(record.record_id).await.unwrap());
    assert!(!desk.complete(Uuid::new_v4()).await.unwrap());
    assert_eq!(desk.tasks("u1").await, "No active tasks.");
  }
}
