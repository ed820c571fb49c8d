//! Domain model for the Dossier document service: the requirement catalog,
//! upload validation, submission batches, review workflow, and the
//! [`store::DocumentStore`] trait that backends implement.
//!
//! No HTTP, no database. Every other crate in the workspace depends on this
//! one and nothing here depends on them.

// Native async fn in traits; the advisory lint about `Send` bounds on the
// returned futures does not apply since `DocumentStore` spells them out.
#![allow(async_fn_in_trait)]

pub mod batch;
pub mod catalog;
pub mod checklist;
pub mod error;
pub mod record;
pub mod review;
pub mod store;
pub mod validate;

pub use error::{Error, Result};
