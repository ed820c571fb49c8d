//! Error types for `dossier-core`.

use thiserror::Error;

use crate::review::{ReviewAction, ReviewStatus};

#[derive(Debug, Error)]
pub enum Error {
  #[error("document record not found: {0}")]
  RecordNotFound(i64),

  #[error("unknown purpose: {0:?}")]
  UnknownPurpose(String),

  #[error("unknown category: {0:?}")]
  UnknownCategory(String),

  #[error("unknown document kind: {0:?}")]
  UnknownDocumentKind(String),

  #[error("unknown review status: {0:?}")]
  UnknownReviewStatus(String),

  #[error("cannot {action} a document that is already {from}")]
  InvalidTransition {
    from:   ReviewStatus,
    action: ReviewAction,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
