//! The review state machine for persisted document records.
//!
//! Every record starts as `pending`. A reviewer may approve or reject it,
//! and may later flip a decision; only the current status is kept — there is
//! no transition history. Re-applying the current decision is an error.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Current review status of a persisted document record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewStatus {
  Pending,
  Approved,
  Rejected,
}

impl ReviewStatus {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Pending => "pending",
      Self::Approved => "approved",
      Self::Rejected => "rejected",
    }
  }

  pub fn parse(s: &str) -> Option<Self> {
    match s {
      "pending" => Some(Self::Pending),
      "approved" => Some(Self::Approved),
      "rejected" => Some(Self::Rejected),
      _ => None,
    }
  }

  /// Apply a reviewer action.
  ///
  /// `approve`: pending | rejected → approved.
  /// `reject`:  pending | approved → rejected.
  ///
  /// Re-applying the current decision is [`Error::InvalidTransition`]; the
  /// record is left untouched by callers in that case.
  pub fn apply(self, action: ReviewAction) -> Result<Self> {
    match (self, action) {
      (Self::Pending | Self::Rejected, ReviewAction::Approve) => Ok(Self::Approved),
      (Self::Pending | Self::Approved, ReviewAction::Reject) => Ok(Self::Rejected),
      (from, action) => Err(Error::InvalidTransition { from, action }),
    }
  }
}

impl std::fmt::Display for ReviewStatus {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

/// A reviewer's decision on one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReviewAction {
  Approve,
  Reject,
}

impl ReviewAction {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Approve => "approve",
      Self::Reject => "reject",
    }
  }
}

impl std::fmt::Display for ReviewAction {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}
