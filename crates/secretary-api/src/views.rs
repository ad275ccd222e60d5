//! Read-only text views.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/users/:user/today` | `text` is `null` when nothing is scheduled |
//! | `GET`  | `/users/:user/schedule` | `?days` (default 7, at most 366) |
//! | `GET`  | `/users/:user/tasks` | Open tasks without a fixed time |
//! | `GET`  | `/users/:user/notes` | Newest first |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State},
};
use secretary_agenda::Desk;
use secretary_core::{clock::Clock, store::RecordStore};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

pub const DEFAULT_SCHEDULE_DAYS: u32 = 7;
pub const MAX_SCHEDULE_DAYS: u32 = 366;

#[derive(Debug, Serialize)]
pub struct TextView {
  pub text: Option<String>,
}

impl TextView {
  fn some(text: String) -> Json<Self> { Json(Self { text: Some(text) }) }
}

/// `GET /users/:user/today`
pub async fn today<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(user_id): Path<String>,
) -> Json<TextView>
where
  S: RecordStore,
  C: Clock,
{
  Json(TextView { text: desk.today(&user_id).await })
}

#[derive(Debug, Deserialize)]
pub struct ScheduleParams {
  pub days: Option<u32>,
}

/// `GET /users/:user/schedule[?days=N]`
pub async fn schedule<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(user_id): Path<String>,
  Query(params): Query<ScheduleParams>,
) -> Result<Json<TextView>, ApiError>
where
  S: RecordStore,
  C: Clock,
{
  let days = params.days.unwrap_or(DEFAULT_SCHEDULE_DAYS);
  if !(1..=MAX_SCHEDULE_DAYS).contains(&days) {
    return Err(ApiError::BadRequest(format!(
      "days must be between 1 and {MAX_SCHEDULE_DAYS}"
    )));
  }
  Ok(TextView::some(desk.schedule(&user_id, days).await))
}

/// `GET /users/:user/tasks`
pub async fn tasks<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(user_id): Path<String>,
) -> Json<TextView>
where
  S: RecordStore,
  C: Clock,
{
  TextView::some(desk.tasks(&user_id).await)
}

/// `GET /users/:user/notes`
pub async fn notes<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(user_id): Path<String>,
) -> Json<TextView>
where
  S: RecordStore,
  C: Clock,
{
  TextView::some(desk.notes(&user_id).await)
}
