//! Handlers for `/records` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/records/:id` | Single record |
//! | `POST` | `/records/:id/done` | Marks the record done; 204 |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use secretary_agenda::Desk;
use secretary_core::{clock::Clock, record::Record, store::RecordStore};
use uuid::Uuid;

use crate::error::ApiError;

/// `GET /records/:id`
pub async fn get_one<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(id): Path<Uuid>,
) -> Result<Json<Record>, ApiError>
where
  S: RecordStore,
  C: Clock,
{
  let record = desk
    .store()
    .get_record(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("record {id} not found")))?;
  Ok(Json(record))
}

/// `POST /records/:id/done`
pub async fn done<S, C>(
  State(desk): State<Arc<Desk<S, C>>>,
  Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: RecordStore,
  C: Clock,
{
  if desk.complete(id).await? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("record {id} not found")))
  }
}
