//! JSON HTTP API for the secretary.
//!
//! Exposes an axum [`Router`] over a shared [`Desk`]. Every conversational
//! endpoint is keyed by an opaque user id taken from the path; identifying
//! that user is the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", secretary_api::api_router(desk.clone()))
//! ```

pub mod error;
pub mod messages;
pub mod records;
pub mod views;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use secretary_agenda::Desk;
use secretary_core::{clock::Clock, store::RecordStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `desk`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C>(desk: Arc<Desk<S, C>>) -> Router<()>
where
  S: RecordStore + 'static,
  C: Clock + 'static,
{
  Router::new()
    // Conversation
    .route("/users/{user}/messages", post(messages::post::<S, C>))
    .route("/users/{user}/cancel", post(messages::cancel::<S, C>))
    // Views
    .route("/users/{user}/today", get(views::today::<S, C>))
    .route("/users/{user}/schedule", get(views::schedule::<S, C>))
    .route("/users/{user}/tasks", get(views::tasks::<S, C>))
    .route("/users/{user}/notes", get(views::notes::<S, C>))
    // Records
    .route("/records/{id}", get(records::get_one::<S, C>))
    .route("/records/{id}/done", post(records::done::<S, C>))
    .with_state(desk)
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use chrono::NaiveDate;
  use secretary_core::clock::FixedClock;
  use secretary_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt;
  use uuid::Uuid;

  use super::*;

  type TestDesk = Arc<Desk<SqliteStore, FixedClock>>;

  async fn make_desk() -> TestDesk {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let now = NaiveDate::from_ymd_opt(2024, 1, 1)
      .unwrap()
      .and_hms_opt(9, 0, 0)
      .unwrap();
    Arc::new(Desk::new(Arc::new(store), FixedClock(now)))
  }

  async fn oneshot_json(
    desk:   TestDesk,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(value) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(value.to_string())
      }
      None => Body::empty(),
    };
    let resp = api_router(desk)
      .oneshot(builder.body(body).unwrap())
      .await
      .unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  async fn say(desk: &TestDesk, user: &str, text: &str) -> Value {
    let (status, body) = oneshot_json(
      desk.clone(),
      "POST",
      &format!("/users/{user}/messages"),
      Some(json!({ "text": text })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn message_creates_event() {
    let desk = make_desk().await;
    let body = say(&desk, "42", "meeting tomorrow at 15:00 for 1 hour").await;
    assert_eq!(body["reply"], "created");
    assert_eq!(body["record"]["kind"], "event");
    assert_eq!(body["record"]["start_at"], "2024-01-02T15:00:00");
    assert_eq!(
      body["message"],
      "Added event: meeting tomorrow at 15:00\n02.01.2024 15:00 - 16:00"
    );
  }

  #[tokio::test]
  async fn conflict_then_reschedule() {
    let desk = make_desk().await;
    say(&desk, "42", "meeting tomorrow at 15:00 for 1 hour").await;

    let body = say(&desk, "42", "meeting tomorrow at 15:00 for 1 hour").await;
    assert_eq!(body["reply"], "conflict");
    assert_eq!(body["conflict"]["duration_minutes"], 60);
    assert_eq!(body["conflict"]["target_day"], "2024-01-02");

    let body = say(&desk, "42", "17:00").await;
    assert_eq!(body["reply"], "created");
    assert_eq!(body["record"]["start_at"], "2024-01-02T17:00:00");
    assert_eq!(body["record"]["end_at"], "2024-01-02T18:00:00");
  }

  #[tokio::test]
  async fn date_only_reply_awaits_time() {
    let desk = make_desk().await;
    say(&desk, "42", "meeting tomorrow at 15:00").await;
    say(&desk, "42", "meeting tomorrow at 15:00").await;

    let body = say(&desk, "42", "05.01").await;
    assert_eq!(body["reply"], "awaiting_time");
    assert_eq!(body["day"], "2024-01-05");
  }

  #[tokio::test]
  async fn cancel_reports_whether_anything_was_pending() {
    let desk = make_desk().await;
    let (_, body) = oneshot_json(desk.clone(), "POST", "/users/42/cancel", None).await;
    assert_eq!(body, json!({ "cancelled": false }));

    say(&desk, "42", "meeting tomorrow at 15:00").await;
    say(&desk, "42", "meeting tomorrow at 15:00").await;
    let (status, body) = oneshot_json(desk.clone(), "POST", "/users/42/cancel", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "cancelled": true }));
  }

  #[tokio::test]
  async fn blank_message_is_rejected() {
    let desk = make_desk().await;
    let (status, body) = oneshot_json(
      desk,
      "POST",
      "/users/42/messages",
      Some(json!({ "text": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "message text is empty");
  }

  // ── Views ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn today_is_null_when_empty() {
    let desk = make_desk().await;
    let (status, body) = oneshot_json(desk.clone(), "GET", "/users/42/today", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "text": null }));

    say(&desk, "42", "standup today at 11:00").await;
    let (_, body) = oneshot_json(desk, "GET", "/users/42/today", None).await;
    assert_eq!(body["text"], "Today:\n  11:00-11:30 standup");
  }

  #[tokio::test]
  async fn schedule_days_are_validated() {
    let desk = make_desk().await;
    let (status, body) = oneshot_json(desk.clone(), "GET", "/users/42/schedule", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Schedule for 7 days:\n\nNothing scheduled.");

    let (status, _) =
      oneshot_json(desk.clone(), "GET", "/users/42/schedule?days=30", None).await;
    assert_eq!(status, StatusCode::OK);

    for days in ["0", "367"] {
      let uri = format!("/users/42/schedule?days={days}");
      let (status, body) = oneshot_json(desk.clone(), "GET", &uri, None).await;
      assert_eq!(status, StatusCode::BAD_REQUEST);
      assert!(body["error"].is_string());
    }
  }

  #[tokio::test]
  async fn tasks_and_notes() {
    let desk = make_desk().await;
    say(&desk, "42", "review the budget").await;
    say(&desk, "42", "random thought").await;

    let (_, body) = oneshot_json(desk.clone(), "GET", "/users/42/tasks", None).await;
    assert_eq!(body["text"], "Open tasks (no fixed time):\n1. review the budget");
    let (_, body) = oneshot_json(desk, "GET", "/users/42/notes", None).await;
    assert_eq!(body["text"], "Notes:\n1. random thought");
  }

  // ── Records ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn done_marks_record_and_unknown_is_404() {
    let desk = make_desk().await;
    let body = say(&desk, "42", "review the budget").await;
    let id = body["record"]["record_id"].as_str().unwrap().to_owned();

    let (status, _) =
      oneshot_json(desk.clone(), "POST", &format!("/records/{id}/done"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = oneshot_json(desk.clone(), "GET", &format!("/records/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "done");

    let unknown = Uuid::new_v4();
    let (status, body) =
      oneshot_json(desk, "POST", &format!("/records/{unknown}/done"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("record {unknown} not found"));
  }
}
