//! Upload validation — the accept gate for a submission batch.
//!
//! Validation is pure: it looks at names, lengths, and date strings, never at
//! file contents, and it touches neither the filesystem nor the store. The
//! caller runs it to completion before persisting anything, so a failing
//! batch leaves no partial state behind.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{Category, DocumentKind, Purpose, RequirementCatalog};

/// Upper bound on a single document's byte length (5 MiB).
pub const MAX_DOCUMENT_BYTES: u64 = 5 * 1024 * 1024;

/// Expiry dates are accepted in this format only.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// File extensions accepted for any document, matched case-insensitively.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "jpg", "jpeg", "png"];

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// What the validator sees of one submitted file. The bytes themselves stay
/// at the boundary; only the length matters here.
#[derive(Debug, Clone)]
pub struct SubmittedDocument {
  /// Client-supplied filename hint; checked for extension, then sanitised
  /// by the recorder before storage.
  pub original_name: String,
  pub len:           u64,
  /// Raw expiry string as submitted (`YYYY-MM-DD`); only consulted for
  /// kinds that carry an expiry.
  pub expiry_date:   Option<String>,
}

// ─── Errors ──────────────────────────────────────────────────────────────────

/// One field-level validation failure. A submission collects all of these
/// before reporting, rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum ValidationError {
  #[error("unknown purpose {purpose:?}")]
  UnknownPurpose { purpose: String },

  #[error("unknown category {category:?} for purpose {purpose:?}")]
  UnknownCategory { purpose: String, category: String },

  #[error("unknown document type {value:?}")]
  UnknownDocumentKind { value: String },

  #[error("{kind} is not required for this category")]
  NotRequired { kind: DocumentKind },

  #[error("{kind} is required but was not uploaded")]
  MissingDocument { kind: DocumentKind },

  #[error("{kind}: only pdf, jpg, jpeg or png files are accepted")]
  DisallowedExtension { kind: DocumentKind, filename: String },

  #[error("{kind}: file exceeds the 5 MiB limit")]
  FileTooLarge { kind: DocumentKind, len: u64 },

  #[error("{kind}: expiry date is required")]
  ExpiryRequired { kind: DocumentKind },

  #[error("{kind}: expiry date must be in YYYY-MM-DD format")]
  InvalidExpiryFormat { kind: DocumentKind, value: String },

  #[error("{kind}: document is expired")]
  Expired { kind: DocumentKind, expiry: NaiveDate },
}

// ─── Field checks ────────────────────────────────────────────────────────────

/// Whether a filename carries an accepted extension. A name without a dot
/// has no extension and is rejected.
pub fn allowed_file(filename: &str) -> bool {
  match filename.rsplit_once('.') {
    Some((_, ext)) => {
      let ext = ext.to_ascii_lowercase();
      ALLOWED_EXTENSIONS.contains(&ext.as_str())
    }
    None => false,
  }
}

/// Expiry checks for a kind that carries one. Absence, format, and the
/// strictly-after-today comparison each produce a distinct error.
fn check_expiry(
  kind: DocumentKind,
  expiry: Option<&str>,
  today: NaiveDate,
) -> Option<ValidationError> {
  let raw = match expiry {
    Some(s) if !s.trim().is_empty() => s.trim(),
    _ => return Some(ValidationError::ExpiryRequired { kind }),
  };

  let date = match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
    Ok(d) => d,
    Err(_) => {
      return Some(ValidationError::InvalidExpiryFormat {
        kind,
        value: raw.to_string(),
      });
    }
  };

  if date <= today {
    return Some(ValidationError::Expired { kind, expiry: date });
  }
  None
}

/// Per-document checks shared by the batch validator and the pre-validation
/// endpoint: extension, then size, then expiry (passport only). The first
/// failure stops further checks for the document.
fn check_document(
  kind: DocumentKind,
  doc: &SubmittedDocument,
  today: NaiveDate,
) -> Option<ValidationError> {
  if !allowed_file(&doc.original_name) {
    return Some(ValidationError::DisallowedExtension {
      kind,
      filename: doc.original_name.clone(),
    });
  }
  if doc.len > MAX_DOCUMENT_BYTES {
    return Some(ValidationError::FileTooLarge { kind, len: doc.len });
  }
  if kind == DocumentKind::Passport {
    return check_expiry(kind, doc.expiry_date.as_deref(), today);
  }
  None
}

// ─── Batch validation ────────────────────────────────────────────────────────

/// Validate a whole submission. Returns every failure found; an empty vec
/// means the batch is accepted as a whole.
///
/// The purpose and category checks are independent — both may fire — and
/// either one failing ends validation there: per-document checks only run
/// against a recognised (purpose, category) pair.
pub fn validate(
  catalog: &RequirementCatalog,
  purpose_raw: &str,
  category_raw: &str,
  documents: &BTreeMap<DocumentKind, SubmittedDocument>,
  today: NaiveDate,
) -> Vec<ValidationError> {
  let mut errors = Vec::new();

  let purpose = Purpose::parse(purpose_raw);
  let category = Category::parse(category_raw);

  if purpose.is_none() {
    errors.push(ValidationError::UnknownPurpose {
      purpose: purpose_raw.to_string(),
    });
  }

  let pair_known = match (purpose, category) {
    (Some(p), Some(c)) => catalog.contains(p, c),
    _ => false,
  };
  if !pair_known {
    errors.push(ValidationError::UnknownCategory {
      purpose:  purpose_raw.to_string(),
      category: category_raw.to_string(),
    });
  }

  if !errors.is_empty() {
    return errors;
  }

  let required = match (purpose, category) {
    (Some(p), Some(c)) => catalog.lookup(p, c),
    _ => &[],
  };

  for &kind in required {
    match documents.get(&kind) {
      None => {
        if !catalog.is_optional(kind) {
          errors.push(ValidationError::MissingDocument { kind });
        }
      }
      Some(doc) => {
        if let Some(e) = check_document(kind, doc, today) {
          errors.push(e);
        }
      }
    }
  }

  errors
}

// ─── Single-document pre-validation ──────────────────────────────────────────

/// Advisory pre-submission check for one document selection, backing the
/// incremental client-side feedback endpoint. Not authoritative — the batch
/// validator runs again at accept time.
pub fn precheck(
  catalog: &RequirementCatalog,
  purpose_raw: &str,
  category_raw: &str,
  doc_type_raw: &str,
  expiry_raw: Option<&str>,
  today: NaiveDate,
) -> Vec<ValidationError> {
  let mut errors = Vec::new();

  let purpose = Purpose::parse(purpose_raw);
  let category = Category::parse(category_raw);

  if purpose.is_none() {
    errors.push(ValidationError::UnknownPurpose {
      purpose: purpose_raw.to_string(),
    });
  }

  let pair_known = match (purpose, category) {
    (Some(p), Some(c)) => catalog.contains(p, c),
    _ => false,
  };
  if !pair_known {
    errors.push(ValidationError::UnknownCategory {
      purpose:  purpose_raw.to_string(),
      category: category_raw.to_string(),
    });
  }

  let kind = match DocumentKind::parse(doc_type_raw) {
    Some(k) => Some(k),
    None => {
      errors.push(ValidationError::UnknownDocumentKind {
        value: doc_type_raw.to_string(),
      });
      None
    }
  };

  if let (Some(p), Some(c), Some(k)) = (purpose, category, kind) {
    if pair_known && !catalog.lookup(p, c).contains(&k) {
      errors.push(ValidationError::NotRequired { kind: k });
    }
  }

  if let Some(k) = kind
    && k == DocumentKind::Passport
    && let Some(e) = check_expiry(k, expiry_raw, today)
  {
    errors.push(e);
  }

  errors
}
