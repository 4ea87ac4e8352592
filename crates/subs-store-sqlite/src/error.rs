//! Error type for `subs-store-sqlite`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// No row matched the id, or an UPDATE/DELETE affected zero rows.
  #[error("subscription not found: {0}")]
  NotFound(Uuid),
}

impl From<Error> for subs_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::NotFound(id) => subs_core::Error::NotFound(id),
      other => subs_core::Error::storage(other),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
