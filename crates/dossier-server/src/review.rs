//! Reviewer endpoints: login, queue listing, and approve/reject actions.
//!
//! Every endpoint except login requires a token issued by `POST
//! /review/login`; requests without one are routed to the login surface and
//! mutate nothing.

use axum::{
  Json,
  extract::{Path, Query, State},
  http::HeaderMap,
};
use dossier_core::{
  record::DocumentRecord,
  review::{ReviewAction, ReviewStatus},
  store::DocumentStore,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState,
  error::{Error, Result},
  sessions::REVIEW_TOKEN_HEADER,
};

// ─── Login ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
  pub username: String,
  pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  /// Send back in `x-review-token` on every reviewer request.
  pub token: Uuid,
}

pub async fn login<S>(
  State(state): State<AppState<S>>,
  Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  if !state.verifier.verify(&body.username, &body.password) {
    tracing::warn!(username = %body.username, "failed reviewer login");
    return Err(Error::InvalidCredentials);
  }

  let token = state.sessions.issue_reviewer_token();
  tracing::info!(username = %body.username, "reviewer logged in");
  Ok(Json(LoginResponse { token }))
}

// ─── Queue ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct QueueParams {
  /// Optional status filter: `pending`, `approved`, or `rejected`.
  pub status: Option<String>,
}

pub async fn list<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Query(params): Query<QueueParams>,
) -> Result<Json<Vec<DocumentRecord>>>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_reviewer(&state, &headers)?;

  let status = params
    .status
    .as_deref()
    .map(|s| {
      ReviewStatus::parse(s)
        .ok_or_else(|| Error::BadRequest(format!("unknown status filter {s:?}")))
    })
    .transpose()?;

  let records = state
    .store
    .list_documents(status)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;
  Ok(Json(records))
}

// ─── Actions ─────────────────────────────────────────────────────────────────

pub async fn approve<S>(
  state: State<AppState<S>>,
  headers: HeaderMap,
  id: Path<i64>,
) -> Result<Json<DocumentRecord>>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  act(state, headers, id, ReviewAction::Approve).await
}

pub async fn reject<S>(
  state: State<AppState<S>>,
  headers: HeaderMap,
  id: Path<i64>,
) -> Result<Json<DocumentRecord>>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  act(state, headers, id, ReviewAction::Reject).await
}

async fn act<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Path(id): Path<i64>,
  action: ReviewAction,
) -> Result<Json<DocumentRecord>>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  require_reviewer(&state, &headers)?;

  // Precondition pass before the mutation so missing records and invalid
  // transitions answer with their own statuses rather than a store error.
  let record = state
    .store
    .get_document(id)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or_else(|| Error::NotFound(format!("document {id} not found")))?;

  record
    .status
    .apply(action)
    .map_err(|e| Error::Conflict(e.to_string()))?;

  let updated = state
    .store
    .transition(id, action)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(id, status = %updated.status, "review decision recorded");
  Ok(Json(updated))
}

// ─── Auth guard ──────────────────────────────────────────────────────────────

fn require_reviewer<S>(state: &AppState<S>, headers: &HeaderMap) -> Result<()>
where
  S: DocumentStore,
{
  let token = headers
    .get(REVIEW_TOKEN_HEADER)
    .and_then(|v| v.to_str().ok())
    .and_then(|s| Uuid::parse_str(s).ok())
    .ok_or(Error::Unauthorized)?;

  if state.sessions.is_reviewer(token) {
    Ok(())
  } else {
    Err(Error::Unauthorized)
  }
}
