//! `GET /checklist` — the per-batch satisfied/not-satisfied view.
//!
//! With a resolvable `x-batch-token` header the checklist reflects the
//! batch's uploads; otherwise `purpose`/`category` query parameters give the
//! pre-submission view with nothing uploaded. Either way an unset or
//! unrecognised pair renders as zero requirements and not-ready.

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::{Query, State},
  http::HeaderMap,
};
use dossier_core::{
  catalog::{Category, Purpose},
  checklist::{Checklist, build_checklist},
  store::DocumentStore,
};
use serde::Deserialize;

use crate::{AppState, error::Result, submissions::batch_token};

#[derive(Debug, Deserialize)]
pub struct ChecklistParams {
  pub purpose:  Option<String>,
  pub category: Option<String>,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Query(params): Query<ChecklistParams>,
) -> Result<Json<Checklist>>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if let Some(batch) = batch_token(&headers).and_then(|t| state.sessions.get_batch(t)) {
    return Ok(Json(build_checklist(
      &state.catalog,
      Some(batch.purpose),
      Some(batch.category),
      &batch.uploaded,
    )));
  }

  let purpose = params.purpose.as_deref().and_then(Purpose::parse);
  let category = params.category.as_deref().and_then(Category::parse);
  Ok(Json(build_checklist(
    &state.catalog,
    purpose,
    category,
    &BTreeMap::new(),
  )))
}
