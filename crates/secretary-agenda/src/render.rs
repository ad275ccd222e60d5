//! Schedule rendering: day plans, multi-day schedules, task and note lists.
//!
//! Every renderer reads from the store and degrades to an empty schedule if
//! the read fails; the failure is logged, never surfaced.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use secretary_core::{
  record::{Record, RecordKind},
  store::{RangeQuery, RecordStore},
};
use secretary_parse::{
  deadline::has_deadline_phrase,
  format::{format_clock, format_clock_range, format_date, is_default_morning, is_end_of_day},
  temporal::find_clock_time,
  title::{
    has_clock_time, has_explicit_date_or_time, strip_temporal_markers,
    strip_weekday_phrase,
  },
};
use tracing::warn;

use crate::conflict::ConflictReport;

/// How many tasks or notes a listing shows at most.
pub const LIST_LIMIT: usize = 100;

const ALL_DAY_HEADER: &str = "  All day:";

// ─── Per-day split ───────────────────────────────────────────────────────────

/// One day's items, split into clock-ordered lines and the all-day bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayBuckets {
  pub timed:   Vec<String>,
  pub all_day: Vec<String>,
}

impl DayBuckets {
  pub fn is_empty(&self) -> bool { self.timed.is_empty() && self.all_day.is_empty() }

  fn push_lines(&self, lines: &mut Vec<String>) {
    lines.extend(self.timed.iter().map(|line| format!("  {line}")));
    if !self.all_day.is_empty() {
      lines.push(ALL_DAY_HEADER.to_owned());
      lines.extend(self.all_day.iter().map(|item| format!("    - {item}")));
    }
  }
}

/// Split `events` and `tasks` falling on `day` into timed lines and all-day
/// items.
///
/// - An event at exactly 10:00 whose title names no date or clock time only
///   had a day named, so it goes to the all-day bucket.
/// - A task due at 23:59 is a deadline and goes to the all-day bucket,
///   unless its title carries a clock time, which then becomes its line.
/// - Everything else is a timed line, sorted by its clock time; lines with
///   no time sort last, keeping their input order.
pub fn split_day(events: &[Record], tasks: &[Record], day: NaiveDate) -> DayBuckets {
  let mut timed: Vec<(Option<NaiveTime>, String)> = Vec::new();
  let mut all_day = Vec::new();

  for event in events {
    let Some(start) = event.start_at.filter(|at| at.date() == day) else {
      continue;
    };
    if is_default_morning(start) && !has_explicit_date_or_time(&event.title) {
      all_day.push(strip_weekday_phrase(&event.title));
    } else {
      let label = format_clock_range(start, event.end_at);
      timed.push((Some(start.time()), timed_line(&label, &event.title)));
    }
  }

  for task in tasks {
    let Some(due) = task.due_at.filter(|at| at.date() == day) else {
      continue;
    };
    if !is_end_of_day(due) {
      timed.push((Some(due.time()), timed_line(&format_clock(due), &task.title)));
    } else if let Some(found) = find_clock_time(&task.title) {
      let label = found.value.format("%H:%M").to_string();
      timed.push((Some(found.value), timed_line(&label, &task.title)));
    } else {
      all_day.push(strip_weekday_phrase(&task.title));
    }
  }

  timed.sort_by_key(|(time, _)| (time.is_none(), *time));

  DayBuckets {
    timed: timed.into_iter().map(|(_, line)| line).collect(),
    all_day,
  }
}

fn timed_line(label: &str, title: &str) -> String {
  format!("{label} {}", strip_temporal_markers(title))
}

// ─── Store reads ─────────────────────────────────────────────────────────────

/// Active events and tasks of `user_id` in `[from, until)`.
async fn load_window<S>(
  store: &S,
  user_id: &str,
  from: NaiveDateTime,
  until: NaiveDateTime,
) -> (Vec<Record>, Vec<Record>)
where
  S: RecordStore,
{
  let mut out = [Vec::new(), Vec::new()];
  for (slot, kind) in out.iter_mut().zip([RecordKind::Event, RecordKind::Task]) {
    let query = RangeQuery { user_id: user_id.to_owned(), kind, from, until };
    match store.find_items_in_range(&query).await {
      Ok(records) => *slot = records,
      Err(e) => warn!(user_id, %kind, error = %e, "schedule read failed; rendering empty"),
    }
  }
  let [events, tasks] = out;
  (events, tasks)
}

fn day_start(day: NaiveDate) -> NaiveDateTime { day.and_time(NaiveTime::MIN) }

// ─── Day views ───────────────────────────────────────────────────────────────

/// Buckets for a single day.
pub async fn day_buckets<S>(store: &S, user_id: &str, day: NaiveDate) -> DayBuckets
where
  S: RecordStore,
{
  let from = day_start(day);
  let until = from + TimeDelta::days(1);
  let (events, tasks) = load_window(store, user_id, from, until).await;
  split_day(&events, &tasks, day)
}

/// `Plan for dd.mm.yyyy:` followed by the day's lines.
pub async fn day_plan<S>(store: &S, user_id: &str, day: NaiveDate) -> String
where
  S: RecordStore,
{
  let buckets = day_buckets(store, user_id, day).await;
  let date = format_date(day);
  if buckets.is_empty() {
    return format!("Plan for {date}: nothing scheduled.");
  }
  let mut lines = vec![format!("Plan for {date}:")];
  buckets.push_lines(&mut lines);
  lines.join("\n")
}

/// Today's plan under a `Today:` header, or `None` if nothing is scheduled.
pub async fn today_summary<S>(store: &S, user_id: &str, today: NaiveDate) -> Option<String>
where
  S: RecordStore,
{
  let buckets = day_buckets(store, user_id, today).await;
  if buckets.is_empty() {
    return None;
  }
  let mut lines = vec!["Today:".to_owned()];
  buckets.push_lines(&mut lines);
  Some(lines.join("\n"))
}

/// Every non-empty day in `[today, today + days)`, in day order.
pub async fn period_schedule<S>(store: &S, user_id: &str, today: NaiveDate, days: u32) -> String
where
  S: RecordStore,
{
  let header = match days {
    1 => "Schedule for 1 day:".to_owned(),
    n => format!("Schedule for {n} days:"),
  };

  let from = day_start(today);
  let until = from + TimeDelta::days(i64::from(days));
  let (events, tasks) = load_window(store, user_id, from, until).await;

  let mut lines = vec![header];
  for day in today.iter_days().take(days as usize) {
    let buckets = split_day(&events, &tasks, day);
    if buckets.is_empty() {
      continue;
    }
    lines.push(String::new());
    lines.push(format!("{}:", format_date(day)));
    buckets.push_lines(&mut lines);
  }

  if lines.len() == 1 {
    lines.push(String::new());
    lines.push("Nothing scheduled.".to_owned());
  }
  lines.join("\n")
}

/// The conflict line, the target day's plan, and how to answer.
pub async fn conflict_view<S>(store: &S, user_id: &str, report: &ConflictReport) -> String
where
  S: RecordStore,
{
  let plan = day_plan(store, user_id, report.target_day).await;
  format!(
    "{}\n{plan}\n\nReply with a new time (HH:MM), a new date (DD.MM), or both.",
    report.message()
  )
}

// ─── Listings ────────────────────────────────────────────────────────────────

/// Active tasks with no fixed clock time: undated ones, and "by" deadlines
/// whose title names no clock time. A task pinned to a day by "on <weekday>"
/// already shows on the schedule and is left out.
pub async fn task_list<S>(store: &S, user_id: &str) -> String
where
  S: RecordStore,
{
  let tasks = match store.list_items(user_id, RecordKind::Task, LIST_LIMIT).await {
    Ok(tasks) => tasks,
    Err(e) => {
      warn!(user_id, error = %e, "task list read failed; rendering empty");
      Vec::new()
    }
  };
  if tasks.is_empty() {
    return "No active tasks.".to_owned();
  }

  let open: Vec<_> = tasks
    .iter()
    .filter(|task| match task.due_at {
      None => true,
      Some(due) => {
        is_end_of_day(due) && !has_clock_time(&task.title) && has_deadline_phrase(&task.title)
      }
    })
    .collect();
  if open.is_empty() {
    return "No tasks without a fixed time; everything is on the schedule.".to_owned();
  }

  let mut lines = vec!["Open tasks (no fixed time):".to_owned()];
  for (idx, task) in open.iter().enumerate() {
    let n = idx + 1;
    match task.due_at {
      Some(due) => lines.push(format!("{n}. by {} {}", format_date(due.date()), task.title)),
      None => lines.push(format!("{n}. {}", task.title)),
    }
  }
  lines.join("\n")
}

/// Notes, newest first.
pub async fn note_list<S>(store: &S, user_id: &str) -> String
where
  S: RecordStore,
{
  let notes = match store.list_items(user_id, RecordKind::Note, LIST_LIMIT).await {
    Ok(notes) => notes,
    Err(e) => {
      warn!(user_id, error = %e, "note list read failed; rendering empty");
      Vec::new()
    }
  };
  if notes.is_empty() {
    return "No notes.".to_owned();
  }

  let mut lines = vec!["Notes:".to_owned()];
  lines.extend(
    notes
      .iter()
      .enumerate()
      .map(|(idx, note)| format!("{}. {}", idx + 1, note.title)),
  );
  lines.join("\n")
}

#[cfg(test)]
mod tests {
  use secretary_core::record::NewRecord;
  use secretary_store_sqlite::SqliteStore;
  use uuid::Uuid;

  use super::*;

  fn at(d: u32, h: u32, m: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, d)
      .unwrap()
      .and_hms_opt(h, m, 0)
      .unwrap()
  }

  fn day(d: u32) -> NaiveDate { NaiveDate::from_ymd_opt(2024, 1, d).unwrap() }

  fn record(kind: RecordKind, title: &str) -> Record {
    Record {
      record_id: Uuid::new_v4(),
      user_id: "u1".into(),
      kind,
      title: title.into(),
      description: String::new(),
      start_at: None,
      end_at: None,
      due_at: None,
      status: Default::default(),
      notified: Default::default(),
      created_at: at(1, 0, 0),
    }
  }

  fn event(title: &str, start: NaiveDateTime, end: Option<NaiveDateTime>) -> Record {
    Record { start_at: Some(start), end_at: end, ..record(RecordKind::Event, title) }
  }

  fn task(title: &str, due: NaiveDateTime) -> Record {
    Record { due_at: Some(due), ..record(RecordKind::Task, title) }
  }

  // ── split_day ───────────────────────────────────────────────────────────

  #[test]
  fn default_morning_event_without_markers_is_all_day() {
    let events = [
      event("dentist on friday", at(5, 10, 0), Some(at(5, 10, 30))),
      event("standup 10:00", at(5, 10, 0), Some(at(5, 10, 15))),
    ];
    let buckets = split_day(&events, &[], day(5));
    assert_eq!(buckets.all_day, vec!["dentist"]);
    assert_eq!(buckets.timed, vec!["10:00-10:15 standup"]);
  }

  #[test]
  fn timed_lines_sort_by_clock() {
    let events = [
      event("review on friday at 16:00", at(5, 16, 0), Some(at(5, 17, 0))),
      event("marker", at(5, 8, 0), None),
    ];
    let tasks = [task("send invoice", at(5, 12, 30))];
    let buckets = split_day(&events, &tasks, day(5));
    assert_eq!(
      buckets.timed,
      vec!["08:00 marker", "12:30 send invoice", "16:00-17:00 review"]
    );
  }

  #[test]
  fn deadline_task_with_clock_in_title_is_promoted() {
    let tasks = [
      task("submit report 18:00 by 05.01", at(5, 23, 59)),
      task("pay rent on friday", at(5, 23, 59)),
    ];
    let buckets = split_day(&[], &tasks, day(5));
    assert_eq!(buckets.timed, vec!["18:00 submit report"]);
    assert_eq!(buckets.all_day, vec!["pay rent"]);
  }

  #[test]
  fn items_on_other_days_are_ignored() {
    let events = [event("sync", at(6, 9, 0), None)];
    let tasks = [task("x", at(4, 23, 59))];
    assert!(split_day(&events, &tasks, day(5)).is_empty());
  }

  // ── store-backed views ──────────────────────────────────────────────────

  async fn seeded() -> SqliteStore {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .insert_record(NewRecord::event("u1", "planning at 14:00", "", at(2, 14, 0), Some(at(2, 15, 0))))
      .await
      .unwrap();
    store
      .insert_record(NewRecord::task("u1", "buy milk by Tuesday", "", Some(at(2, 23, 59))))
      .await
      .unwrap();
    store
  }

  #[tokio::test]
  async fn week_puts_timed_line_before_all_day_bucket() {
    let store = seeded().await;
    let text = period_schedule(&store, "u1", day(1), 7).await;
    assert_eq!(
      text,
      "Schedule for 7 days:\n\
       \n\
       02.01.2024:\n  \
       14:00-15:00 planning\n  \
       All day:\n    \
       - buy milk by Tuesday"
    );
  }

  #[tokio::test]
  async fn empty_period_and_day() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    assert_eq!(
      period_schedule(&store, "u1", day(1), 30).await,
      "Schedule for 30 days:\n\nNothing scheduled."
    );
    assert_eq!(day_plan(&store, "u1", day(1)).await, "Plan for 01.01.2024: nothing scheduled.");
    assert_eq!(today_summary(&store, "u1", day(1)).await, None);
  }

  #[tokio::test]
  async fn day_plan_and_today_summary_share_lines() {
    let store = seeded().await;
    let plan = day_plan(&store, "u1", day(2)).await;
    assert!(plan.starts_with("Plan for 02.01.2024:\n  14:00-15:00 planning"));
    let today = today_summary(&store, "u1", day(2)).await.unwrap();
    assert_eq!(today.replacen("Today:", "Plan for 02.01.2024:", 1), plan);
  }

  #[tokio::test]
  async fn task_list_keeps_undated_and_plain_deadlines() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    for (title, due) in [
      ("call the bank", None),
      ("taxes by 15.01", Some(at(15, 23, 59))),
      ("report 18:00 by 10.01", Some(at(10, 23, 59))),
      ("dentist prep", Some(at(9, 8, 0))),
    ] {
      store.insert_record(NewRecord::task("u1", title, "", due)).await.unwrap();
    }

    assert_eq!(
      task_list(&store, "u1").await,
      "Open tasks (no fixed time):\n1. by 15.01.2024 taxes by 15.01\n2. call the bank"
    );
    assert_eq!(task_list(&store, "nobody").await, "No active tasks.");
  }

  #[tokio::test]
  async fn weekday_task_is_only_on_the_schedule() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .insert_record(NewRecord::task("u1", "send report on wednesday", "", Some(at(3, 23, 59))))
      .await
      .unwrap();

    assert_eq!(
      task_list(&store, "u1").await,
      "No tasks without a fixed time; everything is on the schedule."
    );
    let week = period_schedule(&store, "u1", day(1), 7).await;
    assert!(week.contains("03.01.2024:\n  All day:\n    - send report"), "{week}");
  }

  #[tokio::test]
  async fn note_list_newest_first() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.insert_record(NewRecord::note("u1", "older", "")).await.unwrap();
    store.insert_record(NewRecord::note("u1", "newer", "")).await.unwrap();
    assert_eq!(note_list(&store, "u1").await, "Notes:\n1. newer\n2. older");
    assert_eq!(note_list(&store, "u2").await, "No notes.");
  }
}
