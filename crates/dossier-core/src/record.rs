//! Persisted document records — the durable row behind each accepted upload.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  batch::ReferenceCode,
  catalog::{Category, DocumentKind, Purpose},
  review::ReviewStatus,
};

/// A durable per-document row. Created at accept time with status
/// `pending`; only the review workflow ever mutates it (status only), and
/// nothing deletes it. Re-uploads of the same kind insert a fresh row — the
/// read path orders by recency and treats the newest as authoritative.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
  pub id:          i64,
  pub reference:   ReferenceCode,
  pub purpose:     Purpose,
  pub category:    Category,
  pub kind:        DocumentKind,
  pub stored_name: String,
  pub expiry_date: Option<NaiveDate>,
  pub status:      ReviewStatus,
  /// Server-assigned timestamp; never changes after creation.
  pub uploaded_at: DateTime<Utc>,
}

/// Input to [`crate::store::DocumentStore::insert_document`].
/// `id`, `status`, and `uploaded_at` are always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewDocumentRecord {
  pub reference:   ReferenceCode,
  pub purpose:     Purpose,
  pub category:    Category,
  pub kind:        DocumentKind,
  pub stored_name: String,
  pub expiry_date: Option<NaiveDate>,
}
