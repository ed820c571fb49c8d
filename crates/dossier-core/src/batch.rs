//! Submission batches — the per-applicant envelope that accumulates uploads.
//!
//! A batch is created on the first accepted submission and lives as long as
//! the applicant's session. The boundary layer owns where batches are kept;
//! this module only defines their shape and the reference-code generator.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::catalog::{Category, DocumentKind, Purpose};

// ─── Reference codes ─────────────────────────────────────────────────────────

/// Applicant-facing batch identifier: eight decimal digits, no leading zero.
/// Generated once per batch from a cryptographically strong source and fixed
/// thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReferenceCode(String);

impl ReferenceCode {
  /// Draw a code uniformly from 10000000..=99999999.
  ///
  /// Rejection sampling keeps the draw unbiased; the loop terminates almost
  /// immediately (the rejected zone is under 0.1% of the u32 range).
  pub fn generate(rng: &mut impl RngCore) -> Self {
    const SPAN: u32 = 90_000_000;
    const ZONE: u32 = u32::MAX - u32::MAX % SPAN;
    loop {
      let v = rng.next_u32();
      if v < ZONE {
        return Self((10_000_000 + v % SPAN).to_string());
      }
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<String> for ReferenceCode {
  fn from(s: String) -> Self {
    Self(s)
  }
}

impl std::fmt::Display for ReferenceCode {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Uploads ─────────────────────────────────────────────────────────────────

/// One accepted upload within a batch. Re-uploading the same kind replaces
/// the entry wholesale; nothing is merged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedDocument {
  /// System-assigned storage name (kind + timestamp + sanitised hint).
  pub stored_name: String,
  pub expiry_date: Option<NaiveDate>,
  pub uploaded_at: DateTime<Utc>,
}

/// The per-applicant submission state: chosen purpose and category, the
/// stable reference code, and the latest accepted upload per kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionBatch {
  pub purpose:   Purpose,
  pub category:  Category,
  pub reference: ReferenceCode,
  pub uploaded:  BTreeMap<DocumentKind, UploadedDocument>,
}

impl SubmissionBatch {
  /// A fresh batch with no uploads and a newly drawn reference code.
  pub fn new(purpose: Purpose, category: Category, rng: &mut impl RngCore) -> Self {
    Self {
      purpose,
      category,
      reference: ReferenceCode::generate(rng),
      uploaded: BTreeMap::new(),
    }
  }

  /// Record an accepted upload, overwriting any prior entry for the kind.
  pub fn record_upload(&mut self, kind: DocumentKind, doc: UploadedDocument) {
    self.uploaded.insert(kind, doc);
  }
}
