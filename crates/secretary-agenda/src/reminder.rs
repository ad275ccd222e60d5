//! Reminders and the once-daily digest.
//!
//! [`sweep`] is a single pass; the caller owns the cadence. Each pass walks
//! the items whose notification flag is still unset and fires the ones that
//! start (or fall due) within the configured lead time.

use std::{collections::HashSet, convert::Infallible, future::Future};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use secretary_core::{
  record::{Record, RecordKind},
  store::RecordStore,
};
use secretary_parse::{
  format::{format_clock, format_date, format_datetime, is_end_of_day},
  title::has_event_time_phrase,
};
use tracing::{debug, info, warn};

use crate::{Error, Result, render};

// ─── Formatting ──────────────────────────────────────────────────────────────

/// `Reminder: <title>`, with the start time appended when the title does not
/// already say when.
pub fn format_event_reminder(title: &str, start: NaiveDateTime) -> String {
  let base = non_empty(title, "Event");
  if has_event_time_phrase(base) {
    format!("Reminder: {base}")
  } else {
    format!("Reminder: {base} at {}", format_clock(start))
  }
}

/// `Task due: <title> (deadline <date>)`. The time is shown unless the
/// deadline is the end of the day.
pub fn format_task_reminder(title: &str, due: NaiveDateTime) -> String {
  let base = non_empty(title, "Task");
  let deadline = if is_end_of_day(due) {
    format_date(due.date())
  } else {
    format_datetime(due)
  };
  format!("Task due: {base} (deadline {deadline})")
}

fn non_empty<'a>(title: &'a str, fallback: &'a str) -> &'a str {
  match title.trim() {
    "" => fallback,
    trimmed => trimmed,
  }
}

// ─── Delivery ────────────────────────────────────────────────────────────────

/// Outbound channel for reminder and digest text.
pub trait Notifier: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn notify<'a>(
    &'a self,
    user_id: &'a str,
    text: &'a str,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}

/// Writes every notification to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
  type Error = Infallible;

  async fn notify(&self, user_id: &str, text: &str) -> Result<(), Infallible> {
    info!(user_id, text, "notification");
    Ok(())
  }
}

// ─── Sweep ───────────────────────────────────────────────────────────────────

/// Which notifications are enabled, and how far ahead they fire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPolicy {
  pub event_lead: Option<TimeDelta>,
  pub task_lead:  Option<TimeDelta>,
  /// Wall-clock time after which each user gets one digest per day.
  pub digest_at:  Option<NaiveTime>,
}

/// Memory carried between sweeps.
#[derive(Debug, Default)]
pub struct SweepState {
  digests_sent: HashSet<(String, NaiveDate)>,
}

/// What one sweep did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
  pub digests:         usize,
  pub event_reminders: usize,
  pub task_reminders:  usize,
}

/// Run one reminder pass at `now`.
///
/// A failed delivery is logged and the item is still marked notified, so it
/// is never retried. Storage failures abort the pass.
pub async fn sweep<S, N>(
  store: &S,
  notifier: &N,
  policy: &ReminderPolicy,
  state: &mut SweepState,
  now: NaiveDateTime,
) -> Result<SweepReport>
where
  S: RecordStore,
  N: Notifier,
{
  let mut report = SweepReport::default();

  if let Some(digest_at) = policy.digest_at
    && now.time() >= digest_at
  {
    report.digests = send_digests(store, notifier, state, now.date()).await?;
  }

  if let Some(lead) = policy.event_lead {
    report.event_reminders = send_reminders(store, notifier, RecordKind::Event, lead, now).await?;
  }
  if let Some(lead) = policy.task_lead {
    report.task_reminders = send_reminders(store, notifier, RecordKind::Task, lead, now).await?;
  }

  debug!(?report, "reminder sweep finished");
  Ok(report)
}

async fn send_digests<S, N>(
  store: &S,
  notifier: &N,
  state: &mut SweepState,
  today: NaiveDate,
) -> Result<usize>
where
  S: RecordStore,
  N: Notifier,
{
  state.digests_sent.retain(|(_, day)| *day == today);

  let mut sent = 0;
  for user_id in store.list_user_ids().await.map_err(Error::store)? {
    if !state.digests_sent.insert((user_id.clone(), today)) {
      continue;
    }
    let Some(text) = render::today_summary(store, &user_id, today).await else {
      continue;
    };
    match notifier.notify(&user_id, &text).await {
      Ok(()) => sent += 1,
      Err(e) => warn!(%user_id, error = %e, "digest delivery failed"),
    }
  }
  Ok(sent)
}

async fn send_reminders<S, N>(
  store: &S,
  notifier: &N,
  kind: RecordKind,
  lead: TimeDelta,
  now: NaiveDateTime,
) -> Result<usize>
where
  S: RecordStore,
  N: Notifier,
{
  let mut sent = 0;
  for record in store.pending_reminders(kind).await.map_err(Error::store)? {
    let Some((at, text)) = reminder_text(&record) else {
      continue;
    };
    let ahead = at - now;
    if ahead < TimeDelta::zero() || ahead > lead {
      continue;
    }

    if let Err(e) = notifier.notify(&record.user_id, &text).await {
      warn!(record_id = %record.record_id, error = %e, "reminder delivery failed");
    } else {
      sent += 1;
    }
    store
      .mark_notified(record.record_id, kind)
      .await
      .map_err(Error::store)?;
  }
  Ok(sent)
}

fn reminder_text(record: &Record) -> Option<(NaiveDateTime, String)> {
  match record.kind {
    RecordKind::Event => {
      let start = record.start_at?;
      Some((start, format_event_reminder(&record.title, start)))
    }
    RecordKind::Task => {
      let due = record.due_at?;
      Some((due, format_task_reminder(&record.title, due)))
    }
    RecordKind::Note => None,
  }
}
