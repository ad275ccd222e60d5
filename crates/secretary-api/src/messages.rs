//! Handlers for the conversational endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/users/:user/messages` | Body: [`MessageBody`]; returns a [`Reply`] |
//! | `POST` | `/users/:user/cancel` | Drops a pending conflict resolution |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
};
use secretary_agenda::{Desk, Reply};
use secretary_core::{clock::Clock, store::RecordStore};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct MessageBody {
  pub text: String,
}

/// `POST /users/:user/messages`
pub async fn post<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(user_id): Path<String>,
  Json(body): Json<MessageBody>,
) -> Result<Json<Reply>, ApiError>
where
  S: RecordStore,
  C: Clock,
{
  if body.text.trim().is_empty() {
    return Err(ApiError::BadRequest("message text is empty".into()));
  }
  let reply = desk.handle_message(&user_id, &body.text).await?;
  Ok(Json(reply))
}

#[derive(Debug, Serialize)]
pub struct Cancelled {
  pub cancelled: bool,
}

/// `POST /users/:user/cancel`
pub async fn cancel<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(user_id): Path<String>,
) -> Json<Cancelled>
where
  S: RecordStore,
  C: Clock,
{
  Json(Cancelled { cancelled: desk.cancel(&user_id).await })
}
