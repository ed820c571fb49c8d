//! `POST /submissions` — the batch submission endpoint.
//!
//! Validation runs to completion before any side effect; a failing batch
//! writes no file and no row. For each accepted document the file bytes are
//! written first and the row inserted second, so a crash in between can
//! leave an orphan file but never a dangling record.

use std::collections::BTreeMap;

use axum::{
  Json,
  extract::State,
  http::{HeaderMap, StatusCode},
  response::IntoResponse,
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use bytes::Bytes;
use chrono::{NaiveDate, Utc};
use dossier_core::{
  batch::{ReferenceCode, SubmissionBatch, UploadedDocument},
  catalog::{Category, DocumentKind, Purpose},
  checklist::{Checklist, build_checklist},
  record::NewDocumentRecord,
  store::DocumentStore,
  validate::{DATE_FORMAT, SubmittedDocument, validate},
};
use rand_core::OsRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  AppState,
  error::{Error, Result},
  sessions::BATCH_TOKEN_HEADER,
};

// ─── Wire types ──────────────────────────────────────────────────────────────

/// One document within a submission: filename hint, base64 content, and the
/// expiry date (`YYYY-MM-DD`) where the kind carries one.
#[derive(Debug, Deserialize)]
pub struct DocumentUpload {
  pub filename:    String,
  pub content:     String,
  pub expiry_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
  pub purpose:  String,
  pub category: String,
  #[serde(default)]
  pub documents: BTreeMap<DocumentKind, DocumentUpload>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
  pub reference:   ReferenceCode,
  /// Opaque token identifying the batch; send it back in `x-batch-token`
  /// to add or replace documents later.
  pub batch_token: Uuid,
  pub checklist:   Checklist,
}

// ─── Handler ─────────────────────────────────────────────────────────────────

pub async fn submit<S>(
  State(state): State<AppState<S>>,
  headers: HeaderMap,
  Json(body): Json<SubmitRequest>,
) -> Result<impl IntoResponse>
where
  S: DocumentStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Decode every payload up front so a bad document aborts before any
  // validation verdict, let alone a write.
  let mut decoded: BTreeMap<DocumentKind, (Bytes, &DocumentUpload)> = BTreeMap::new();
  for (&kind, upload) in &body.documents {
    let bytes = B64
      .decode(&upload.content)
      .map_err(|_| Error::BadRequest(format!("{kind}: content is not valid base64")))?;
    decoded.insert(kind, (Bytes::from(bytes), upload));
  }

  let submitted: BTreeMap<DocumentKind, SubmittedDocument> = decoded
    .iter()
    .map(|(&kind, (bytes, upload))| {
      (kind, SubmittedDocument {
        original_name: upload.filename.clone(),
        len:           bytes.len() as u64,
        expiry_date:   upload.expiry_date.clone(),
      })
    })
    .collect();

  let today = Utc::now().date_naive();
  let errors = validate(&state.catalog, &body.purpose, &body.category, &submitted, today);
  if !errors.is_empty() {
    return Err(Error::Validation(errors));
  }

  // Validation guarantees both parse; the fallback is unreachable.
  let purpose = Purpose::parse(&body.purpose)
    .ok_or_else(|| Error::BadRequest("unparseable purpose".to_string()))?;
  let category = Category::parse(&body.category)
    .ok_or_else(|| Error::BadRequest("unparseable category".to_string()))?;

  // Resume the caller's batch if the token resolves; otherwise open a new
  // one with a freshly drawn reference code. The reference never changes.
  let existing = batch_token(&headers).and_then(|t| state.sessions.get_batch(t).map(|b| (t, b)));
  let (token, mut batch) = match existing {
    Some((token, mut batch)) => {
      batch.purpose = purpose;
      batch.category = category;
      (token, batch)
    }
    None => (
      Uuid::new_v4(),
      SubmissionBatch::new(purpose, category, &mut OsRng),
    ),
  };

  // Record each accepted document in catalog order. Kinds outside the
  // required list are ignored, as in the original workflow.
  let mut recorded = 0usize;
  for &kind in state.catalog.lookup(purpose, category) {
    let Some((bytes, upload)) = decoded.get(&kind) else {
      continue;
    };
    let expiry_date = parse_expiry(upload.expiry_date.as_deref());

    let stored_name = state.files.save(kind, &upload.filename, bytes.clone()).await?;
    let record = state
      .store
      .insert_document(NewDocumentRecord {
        reference: batch.reference.clone(),
        purpose,
        category,
        kind,
        stored_name: stored_name.clone(),
        expiry_date,
      })
      .await
      .map_err(|e| Error::Store(Box::new(e)))?;

    batch.record_upload(kind, UploadedDocument {
      stored_name,
      expiry_date,
      uploaded_at: record.uploaded_at,
    });
    recorded += 1;
  }

  let checklist = build_checklist(
    &state.catalog,
    Some(purpose),
    Some(category),
    &batch.uploaded,
  );
  let reference = batch.reference.clone();
  state.sessions.put_batch(token, batch);

  tracing::info!(
    reference = %reference,
    %purpose,
    %category,
    recorded,
    all_ready = checklist.all_ready,
    "submission accepted"
  );

  Ok((
    StatusCode::CREATED,
    Json(SubmitResponse {
      reference,
      batch_token: token,
      checklist,
    }),
  ))
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

pub(crate) fn batch_token(headers: &HeaderMap) -> Option<Uuid> {
  headers
    .get(BATCH_TOKEN_HEADER)
    .and_then(|v| v.to_str().ok())
    .and_then(|s| Uuid::parse_str(s).ok())
}

/// Best-effort expiry parse for storage. The validator has already enforced
/// the format where it matters (passport); other kinds keep a date only if
/// one was supplied and parses.
fn parse_expiry(raw: Option<&str>) -> Option<NaiveDate> {
  raw
    .map(str::trim)
    .filter(|s| !s.is_empty())
    .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}
