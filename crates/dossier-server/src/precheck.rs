//! `POST /api/validate` — advisory single-document pre-validation.
//!
//! Backs incremental client-side feedback while the applicant fills the
//! form. Not authoritative: the batch validator runs again at accept time.

use axum::{Json, extract::State};
use chrono::Utc;
use dossier_core::{store::DocumentStore, validate};
use serde::{Deserialize, Serialize};

use crate::{
  AppState,
  error::{Error, Result},
};

#[derive(Debug, Deserialize)]
pub struct PrecheckRequest {
  pub purpose:     String,
  pub category:    String,
  pub doc_type:    String,
  pub expiry_date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PrecheckResponse {
  pub ok:      bool,
  pub message: String,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<PrecheckRequest>,
) -> Result<Json<PrecheckResponse>>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let errors = validate::precheck(
    &state.catalog,
    &body.purpose,
    &body.category,
    &body.doc_type,
    body.expiry_date.as_deref().filter(|s| !s.trim().is_empty()),
    Utc::now().date_naive(),
  );

  if !errors.is_empty() {
    return Err(Error::Validation(errors));
  }

  Ok(Json(PrecheckResponse {
    ok:      true,
    message: format!("{} looks good for this category", body.doc_type),
  }))
}
