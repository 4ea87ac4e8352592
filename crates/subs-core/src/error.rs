//! Error types for `subs-core`.
//!
//! Every failure a caller can observe falls into one of three kinds. Backends
//! convert their own errors into [`Error`] structurally, so a missing row is
//! always [`Error::NotFound`] and never a message to be string-matched.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed id, date token, request body, or an out-of-range field.
  #[error("{0}")]
  InvalidInput(String),

  #[error("subscription not found: {0}")]
  NotFound(Uuid),

  /// Storage or connectivity failure. Opaque to API callers.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn invalid(message: impl Into<String>) -> Self {
    Self::InvalidInput(message.into())
  }

  pub fn storage(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
