//! Per-user conflict-resolution state.
//!
//! After an event is rejected the user may answer with a new time, a new
//! date, or both. At most one pending resolution exists per user; any reply
//! consumes it.
//!
//! ```text
//!   Idle ──conflict──▶ Awaiting(day, title, minutes)
//!   Awaiting ──"HH:MM"──────────▶ Idle + reschedule on `day`
//!   Awaiting ──"DD.MM HH:MM"────▶ Idle + reschedule on that date
//!   Awaiting ──"DD.MM"──────────▶ Awaiting(new day, ..)
//!   Awaiting ──anything else────▶ Idle + handle as new input
//! ```

use std::{collections::HashMap, sync::Arc};

use chrono::{NaiveDate, NaiveDateTime};
use secretary_parse::{
  format::format_datetime,
  temporal::{find_clock_time, find_numeric_date},
  title::clean_for_reschedule,
};
use tokio::sync::Mutex;

use crate::conflict::ConflictReport;

/// A rejected event waiting for a new time or date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingResolution {
  pub target_day:       NaiveDate,
  /// The rejected title with its temporal markers removed.
  pub title:            String,
  pub duration_minutes: i64,
}

impl PendingResolution {
  pub fn from_report(report: &ConflictReport) -> Self {
    Self {
      target_day:       report.target_day,
      title:            clean_for_reschedule(&report.new_title),
      duration_minutes: report.duration_minutes.max(0),
    }
  }

  /// Input text that recreates the rejected event at `when`.
  fn synthesize(&self, when: &str) -> String {
    format!("{} {when} for {} minutes", self.title, self.duration_minutes)
  }
}

/// What to do with a reply while a resolution is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
  /// Feed this synthesized text back through intake.
  Reschedule(String),
  /// A date alone: keep waiting, now for a time on this day.
  AwaitTime(NaiveDate),
  /// Not an answer to the conflict; drop it and treat the reply as new input.
  Fallthrough,
}

/// Decide how `reply` resolves `pending`.
pub fn resolve_reply(pending: &PendingResolution, reply: &str, now: NaiveDateTime) -> Resolution {
  let reply = reply.trim();
  let whole = 0..reply.len();

  let time = find_clock_time(reply);
  let date = find_numeric_date(reply, now);

  match (date, time) {
    (None, Some(time)) if time.span == whole => {
      let start = pending.target_day.and_time(time.value);
      Resolution::Reschedule(pending.synthesize(&format_datetime(start)))
    }
    (Some(_), Some(_)) => Resolution::Reschedule(pending.synthesize(reply)),
    (Some(date), None) if date.span == whole => Resolution::AwaitTime(date.value),
    _ => Resolution::Fallthrough,
  }
}

// ─── Session store ───────────────────────────────────────────────────────────

/// One user's slot. Holding its lock serialises that user's messages.
pub type Session = Arc<Mutex<Option<PendingResolution>>>;

/// Keyed sessions, one async mutex per user id.
#[derive(Debug, Default)]
pub struct SessionStore {
  sessions: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
  pub fn new() -> Self { Self::default() }

  /// The session for `user_id`, created on first use.
  ///
  /// Creating a session first drops every idle one: no pending resolution
  /// and no outstanding handle. The map holds at most the users that are
  /// mid-conversation, plus the one being served.
  pub async fn session(&self, user_id: &str) -> Session {
    let mut sessions = self.sessions.lock().await;
    if !sessions.contains_key(user_id) {
      sessions.retain(|_, session| !is_idle(session));
    }
    sessions.entry(user_id.to_owned()).or_default().clone()
  }

  /// A copy of the user's pending resolution, if any.
  pub async fn pending(&self, user_id: &str) -> Option<PendingResolution> {
    self.session(user_id).await.lock().await.clone()
  }
}

fn is_idle(session: &Session) -> bool {
  Arc::strong_count(session) == 1 && session.try_lock().is_ok_and(|slot| slot.is_none())
}
