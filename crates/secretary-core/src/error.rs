//! Error types for `secretary-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown record kind: {0:?}")]
  UnknownKind(String),

  #[error("unknown record status: {0:?}")]
  UnknownStatus(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
