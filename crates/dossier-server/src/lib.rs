//! HTTP layer for the Dossier document service.
//!
//! Exposes an axum [`Router`] with the applicant-facing submission,
//! pre-validation, and checklist endpoints plus the reviewer surface, backed
//! by any [`DocumentStore`]. TLS and transport concerns are the caller's
//! responsibility.

pub mod auth;
pub mod checklist;
pub mod error;
pub mod files;
pub mod precheck;
pub mod review;
pub mod sessions;
pub mod submissions;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::DefaultBodyLimit,
  routing::{get, post},
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use dossier_core::{catalog::RequirementCatalog, store::DocumentStore};

use auth::CredentialVerifier;
use files::FileStore;
use sessions::Sessions;

/// Request body ceiling. Generous enough that an oversize document (the
/// per-file limit is 5 MiB) still reaches the validator and comes back as a
/// field error instead of a transport failure.
pub const MAX_BODY_BYTES: usize = 64 * 1024 * 1024;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `DOSSIER_`-prefixed environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                   String,
  pub port:                   u16,
  pub store_path:             PathBuf,
  pub upload_dir:             PathBuf,
  pub reviewer_username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub reviewer_password_hash: String,
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: DocumentStore> {
  pub store:    Arc<S>,
  pub catalog:  Arc<RequirementCatalog>,
  pub files:    Arc<FileStore>,
  pub verifier: Arc<dyn CredentialVerifier>,
  pub sessions: Arc<Sessions>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the service.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: DocumentStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    // Applicant surface
    .route("/submissions", post(submissions::submit::<S>))
    .route("/api/validate", post(precheck::handler::<S>))
    .route("/checklist", get(checklist::handler::<S>))
    // Reviewer surface
    .route("/review/login", post(review::login::<S>))
    .route("/review/documents", get(review::list::<S>))
    .route("/review/documents/{id}/approve", post(review::approve::<S>))
    .route("/review/documents/{id}/reject", post(review::reject::<S>))
    .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use base64::Engine as _;
  use base64::engine::general_purpose::STANDARD as B64;
  use chrono::{Duration, Utc};
  use dossier_store_sqlite::SqliteStore;
  use rand_core::OsRng;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  use crate::auth::ArgonVerifier;
  use dossier_core::{batch::ReferenceCode, store::DocumentStore as _};

  async fn make_state(password: &str) -> (AppState<SqliteStore>, tempfile::TempDir) {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let upload_dir = tempfile::tempdir().unwrap();
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .unwrap()
      .to_string();

    let state = AppState {
      store:    Arc::new(store),
      catalog:  Arc::new(RequirementCatalog::standard()),
      files:    Arc::new(FileStore::new(upload_dir.path())),
      verifier: Arc::new(ArgonVerifier {
        username:      "reviewer".to_string(),
        password_hash: hash,
      }),
      sessions: Arc::new(Sessions::new()),
    };
    (state, upload_dir)
  }

  async fn oneshot_json(
    state: AppState<SqliteStore>,
    method: &str,
    uri: &str,
    headers: Vec<(&'static str, String)>,
    body: Option<Value>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    for (k, v) in headers {
      builder = builder.header(k, v);
    }
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    router(state).oneshot(req).await.unwrap()
  }

  async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn future_date() -> String {
    (Utc::now().date_naive() + Duration::days(365))
      .format("%Y-%m-%d")
      .to_string()
  }

  fn doc(filename: &str, bytes: &[u8], expiry: Option<&str>) -> Value {
    json!({
      "filename": filename,
      "content": B64.encode(bytes),
      "expiry_date": expiry,
    })
  }

  /// A complete, valid work/graduate_1g submission.
  fn graduate_submission() -> Value {
    json!({
      "purpose": "work",
      "category": "graduate_1g",
      "documents": {
        "passport": doc("passport scan.pdf", b"%PDF-1.4 passport", Some(&future_date())),
        "college_letter": doc("letter.pdf", b"%PDF-1.4 letter", None),
        "insurance": doc("policy.jpg", b"\xff\xd8\xff jpeg", None),
      }
    })
  }

  async fn login(state: AppState<SqliteStore>, password: &str) -> String {
    let resp = oneshot_json(
      state,
      "POST",
      "/review/login",
      vec![],
      Some(json!({ "username": "reviewer", "password": password })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    json_body(resp).await["token"].as_str().unwrap().to_string()
  }

  // ── Submission ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn complete_batch_is_accepted_and_persisted() {
    let (state, upload_dir) = make_state("secret").await;

    let resp = oneshot_json(
      state.clone(),
      "POST",
      "/submissions",
      vec![],
      Some(graduate_submission()),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json_body(resp).await;
    let reference = body["reference"].as_str().unwrap().to_string();
    assert_eq!(reference.len(), 8);
    assert!(reference.chars().all(|c| c.is_ascii_digit()));
    assert!(body["checklist"]["all_ready"].as_bool().unwrap());
    assert!(body["batch_token"].as_str().is_some());

    // One row per document, and the bytes are on disk.
    let rows = state
      .store
      .list_by_reference(&ReferenceCode::from(reference))
      .await
      .unwrap();
    assert_eq!(rows.len(), 3);
    let on_disk = std::fs::read_dir(upload_dir.path()).unwrap().count();
    assert_eq!(on_disk, 3);
  }

  #[tokio::test]
  async fn one_failing_document_persists_nothing() {
    let (state, upload_dir) = make_state("secret").await;

    // Valid passport, oversize insurance: the whole batch is rejected.
    let oversize = vec![0u8; 5 * 1024 * 1024 + 1];
    let body = json!({
      "purpose": "work",
      "category": "graduate_1g",
      "documents": {
        "passport": doc("passport.pdf", b"%PDF-1.4", Some(&future_date())),
        "college_letter": doc("letter.pdf", b"%PDF-1.4", None),
        "insurance": doc("policy.pdf", &oversize, None),
      }
    });

    let resp =
      oneshot_json(state.clone(), "POST", "/submissions", vec![], Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = json_body(resp).await;
    assert_eq!(errors["errors"][0]["code"], "file_too_large");

    assert!(state.store.list_documents(None).await.unwrap().is_empty());
    let on_disk = std::fs::read_dir(upload_dir.path())
      .map(|d| d.count())
      .unwrap_or(0);
    assert_eq!(on_disk, 0);
  }

  #[tokio::test]
  async fn unknown_purpose_is_reported_as_such() {
    let (state, _dir) = make_state("secret").await;
    let body = json!({ "purpose": "holiday", "category": "masters", "documents": {} });

    let resp = oneshot_json(state, "POST", "/submissions", vec![], Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = json_body(resp).await;
    let codes: Vec<&str> = errors["errors"]
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["code"].as_str().unwrap())
      .collect();
    assert!(codes.contains(&"unknown_purpose"), "codes: {codes:?}");
  }

  #[tokio::test]
  async fn missing_required_document_yields_one_error() {
    let (state, _dir) = make_state("secret").await;
    let body = json!({
      "purpose": "work",
      "category": "graduate_1g",
      "documents": {
        "passport": doc("passport.pdf", b"%PDF-1.4", Some(&future_date())),
        "college_letter": doc("letter.pdf", b"%PDF-1.4", None),
        // insurance missing
      }
    });

    let resp = oneshot_json(state, "POST", "/submissions", vec![], Some(body)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let errors = json_body(resp).await;
    let list = errors["errors"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["code"], "missing_document");
    assert_eq!(list[0]["kind"], "insurance");
  }

  #[tokio::test]
  async fn resubmission_reuses_reference_and_overwrites_kind() {
    let (state, _dir) = make_state("secret").await;

    let first = oneshot_json(
      state.clone(),
      "POST",
      "/submissions",
      vec![],
      Some(graduate_submission()),
    )
    .await;
    let first_body = json_body(first).await;
    let reference = first_body["reference"].as_str().unwrap().to_string();
    let token = first_body["batch_token"].as_str().unwrap().to_string();

    // Re-upload the passport under the same batch token.
    let mut second = graduate_submission();
    second["documents"]["passport"] =
      doc("renewed.pdf", b"%PDF-1.4 renewed", Some(&future_date()));
    let resp = oneshot_json(
      state.clone(),
      "POST",
      "/submissions",
      vec![("x-batch-token", token)],
      Some(second),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body = json_body(resp).await;
    // The reference code is stable across submissions of the same batch.
    assert_eq!(body["reference"].as_str().unwrap(), reference);

    // The checklist shows only the latest passport upload.
    let passport = body["checklist"]["entries"]
      .as_array()
      .unwrap()
      .iter()
      .find(|e| e["kind"] == "passport")
      .unwrap()
      .clone();
    assert!(
      passport["stored_name"].as_str().unwrap().ends_with("_renewed.pdf"),
      "stored_name: {}",
      passport["stored_name"]
    );

    // Durable rows accumulate; the read path orders newest first.
    let rows = state
      .store
      .list_by_reference(&ReferenceCode::from(reference))
      .await
      .unwrap();
    assert_eq!(rows.len(), 6);
  }

  // ── Pre-validation ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn api_validate_accepts_a_valid_selection() {
    let (state, _dir) = make_state("secret").await;
    let resp = oneshot_json(
      state,
      "POST",
      "/api/validate",
      vec![],
      Some(json!({
        "purpose": "study",
        "category": "masters",
        "doc_type": "passport",
        "expiry_date": future_date(),
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(json_body(resp).await["ok"].as_bool().unwrap());
  }

  #[tokio::test]
  async fn api_validate_flags_a_kind_outside_the_category() {
    let (state, _dir) = make_state("secret").await;
    let resp = oneshot_json(
      state,
      "POST",
      "/api/validate",
      vec![],
      Some(json!({
        "purpose": "study",
        "category": "masters",
        "doc_type": "payslip",
      })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = json_body(resp).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["errors"][0]["code"], "not_required");
  }

  // ── Checklist ─────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn checklist_query_view_lists_requirements_in_order() {
    let (state, _dir) = make_state("secret").await;
    let resp = oneshot_json(
      state,
      "GET",
      "/checklist?purpose=work&category=employment_permit",
      vec![],
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = json_body(resp).await;
    let kinds: Vec<&str> = body["entries"]
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["kind"].as_str().unwrap())
      .collect();
    assert_eq!(kinds, vec!["passport", "employment_letter", "payslip", "insurance"]);
    assert_eq!(body["all_ready"], false);
  }

  #[tokio::test]
  async fn checklist_with_unknown_pair_is_empty_and_not_ready() {
    let (state, _dir) = make_state("secret").await;
    let resp = oneshot_json(
      state,
      "GET",
      "/checklist?purpose=work&category=masters",
      vec![],
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert!(body["entries"].as_array().unwrap().is_empty());
    assert_eq!(body["all_ready"], false);
  }

  // ── Review ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn review_actions_without_session_redirect_to_login() {
    let (state, _dir) = make_state("secret").await;
    oneshot_json(
      state.clone(),
      "POST",
      "/submissions",
      vec![],
      Some(graduate_submission()),
    )
    .await;

    for (method, uri) in [
      ("GET", "/review/documents"),
      ("POST", "/review/documents/1/approve"),
      ("POST", "/review/documents/1/reject"),
    ] {
      let resp = oneshot_json(state.clone(), method, uri, vec![], None).await;
      assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{method} {uri}");
      assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "/review/login"
      );
    }

    // Nothing moved out of pending.
    let rows = state.store.list_documents(None).await.unwrap();
    assert!(rows.iter().all(|r| r.status.as_str() == "pending"));
  }

  #[tokio::test]
  async fn login_with_wrong_password_is_rejected() {
    let (state, _dir) = make_state("secret").await;
    let resp = oneshot_json(
      state,
      "POST",
      "/review/login",
      vec![],
      Some(json!({ "username": "reviewer", "password": "wrong" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
  }

  #[tokio::test]
  async fn reviewer_can_approve_flip_and_filter() {
    let (state, _dir) = make_state("secret").await;
    oneshot_json(
      state.clone(),
      "POST",
      "/submissions",
      vec![],
      Some(graduate_submission()),
    )
    .await;
    let token = login(state.clone(), "secret").await;
    let auth = vec![("x-review-token", token)];

    let resp = oneshot_json(
      state.clone(),
      "GET",
      "/review/documents",
      auth.clone(),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let queue = json_body(resp).await;
    let rows = queue.as_array().unwrap();
    assert_eq!(rows.len(), 3);
    let id = rows[0]["id"].as_i64().unwrap();

    // Approve.
    let resp = oneshot_json(
      state.clone(),
      "POST",
      &format!("/review/documents/{id}/approve"),
      auth.clone(),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await["status"], "approved");

    // Approving again is a conflict, not a silent no-op.
    let resp = oneshot_json(
      state.clone(),
      "POST",
      &format!("/review/documents/{id}/approve"),
      auth.clone(),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);

    // Flip to rejected; the filter sees exactly that record.
    let resp = oneshot_json(
      state.clone(),
      "POST",
      &format!("/review/documents/{id}/reject"),
      auth.clone(),
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = oneshot_json(
      state,
      "GET",
      "/review/documents?status=rejected",
      auth,
      None,
    )
    .await;
    let rejected = json_body(resp).await;
    assert_eq!(rejected.as_array().unwrap().len(), 1);
    assert_eq!(rejected[0]["id"].as_i64().unwrap(), id);
  }

  #[tokio::test]
  async fn acting_on_a_missing_document_is_404() {
    let (state, _dir) = make_state("secret").await;
    let token = login(state.clone(), "secret").await;

    let resp = oneshot_json(
      state,
      "POST",
      "/review/documents/41/approve",
      vec![("x-review-token", token)],
      None,
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
