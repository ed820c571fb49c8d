//! In-memory session registry.
//!
//! Two token spaces, both opaque UUIDs carried in request headers: batch
//! tokens identify an applicant's [`SubmissionBatch`], reviewer tokens mark
//! a logged-in reviewer. Sessions live for the process lifetime; concurrent
//! writers to the same batch are not coordinated beyond the registry lock —
//! last writer wins, matching the original workflow.

use std::{
  collections::{HashMap, HashSet},
  sync::Mutex,
};

use dossier_core::batch::SubmissionBatch;
use uuid::Uuid;

/// Header carrying an applicant's batch token.
pub const BATCH_TOKEN_HEADER: &str = "x-batch-token";

/// Header carrying a reviewer's session token.
pub const REVIEW_TOKEN_HEADER: &str = "x-review-token";

#[derive(Default)]
pub struct Sessions {
  batches:   Mutex<HashMap<Uuid, SubmissionBatch>>,
  reviewers: Mutex<HashSet<Uuid>>,
}

impl Sessions {
  pub fn new() -> Self {
    Self::default()
  }

  // ── Applicant batches ─────────────────────────────────────────────────────

  pub fn get_batch(&self, token: Uuid) -> Option<SubmissionBatch> {
    self.batches.lock().expect("sessions lock").get(&token).cloned()
  }

  /// Store (or replace) the batch for a token.
  pub fn put_batch(&self, token: Uuid, batch: SubmissionBatch) {
    self.batches.lock().expect("sessions lock").insert(token, batch);
  }

  /// Register a brand-new batch under a fresh token.
  pub fn create_batch(&self, batch: SubmissionBatch) -> Uuid {
    let token = Uuid::new_v4();
    self.put_batch(token, batch);
    token
  }

  // ── Reviewer tokens ───────────────────────────────────────────────────────

  /// Issue a reviewer token after a successful login.
  pub fn issue_reviewer_token(&self) -> Uuid {
    let token = Uuid::new_v4();
    self.reviewers.lock().expect("sessions lock").insert(token);
    token
  }

  pub fn is_reviewer(&self, token: Uuid) -> bool {
    self.reviewers.lock().expect("sessions lock").contains(&token)
  }
}

#[cfg(test)]
mod tests {
  use dossier_core::{
    batch::SubmissionBatch,
    catalog::{Category, Purpose},
  };
  use rand_core::OsRng;

  use super::*;

  #[test]
  fn unknown_tokens_resolve_to_nothing() {
    let sessions = Sessions::new();
    assert!(sessions.get_batch(Uuid::new_v4()).is_none());
    assert!(!sessions.is_reviewer(Uuid::new_v4()));
  }

  #[test]
  fn batch_round_trip() {
    let sessions = Sessions::new();
    let batch = SubmissionBatch::new(Purpose::Work, Category::Graduate1g, &mut OsRng);
    let reference = batch.reference.clone();

    let token = sessions.create_batch(batch);
    let fetched = sessions.get_batch(token).unwrap();
    assert_eq!(fetched.reference, reference);
  }

  #[test]
  fn reviewer_tokens_are_independent() {
    let sessions = Sessions::new();
    let token = sessions.issue_reviewer_token();
    assert!(sessions.is_reviewer(token));
    assert!(!sessions.is_reviewer(Uuid::new_v4()));
  }
}
