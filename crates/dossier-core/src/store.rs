//! The `DocumentStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `dossier-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  batch::ReferenceCode,
  record::{DocumentRecord, NewDocumentRecord},
  review::{ReviewAction, ReviewStatus},
};

/// Abstraction over a persisted document-record backend.
///
/// Rows are insert-only apart from review-status transitions; nothing is
/// ever deleted. All methods return `Send` futures so the trait can be used
/// in multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait DocumentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Persist a new record with status `pending`. The `uploaded_at`
  /// timestamp is set by the store.
  fn insert_document(
    &self,
    input: NewDocumentRecord,
  ) -> impl Future<Output = Result<DocumentRecord, Self::Error>> + Send + '_;

  /// Retrieve a record by id. Returns `None` if not found.
  fn get_document(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<DocumentRecord>, Self::Error>> + Send + '_;

  /// All records for a reference code, newest first. Duplicate rows per
  /// (reference, kind) are possible after re-uploads; ordering by recency
  /// makes the latest authoritative for display.
  fn list_by_reference<'a>(
    &'a self,
    reference: &'a ReferenceCode,
  ) -> impl Future<Output = Result<Vec<DocumentRecord>, Self::Error>> + Send + 'a;

  /// The reviewer queue: all records, newest first, optionally filtered by
  /// status.
  fn list_documents(
    &self,
    status: Option<ReviewStatus>,
  ) -> impl Future<Output = Result<Vec<DocumentRecord>, Self::Error>> + Send + '_;

  /// Apply a review action to a record and return the updated row.
  ///
  /// Fails if the record does not exist or if the action is not a valid
  /// transition from the record's current status; the row is untouched in
  /// either case.
  fn transition(
    &self,
    id: i64,
    action: ReviewAction,
  ) -> impl Future<Output = Result<DocumentRecord, Self::Error>> + Send + '_;
}
