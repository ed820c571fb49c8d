//! Error type for `dossier-store-sqlite`.

use dossier_core::review::{ReviewAction, ReviewStatus};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] dossier_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored enum column held a token this build does not recognise.
  #[error("unknown {column} token in row: {value:?}")]
  UnknownToken { column: &'static str, value: String },

  #[error("document record not found: {0}")]
  RecordNotFound(i64),

  #[error("cannot {action} document {id}: already {from}")]
  InvalidTransition {
    id:     i64,
    from:   ReviewStatus,
    action: ReviewAction,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
