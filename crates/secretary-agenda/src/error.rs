//! Error type for `secretary-agenda`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The backing store failed on a write, or on a read that cannot degrade.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
