//! Server error type and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Redirect, Response},
};
use dossier_core::validate::ValidationError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No valid reviewer token. Answered with a redirect to the login
  /// surface; nothing is mutated.
  #[error("unauthorized")]
  Unauthorized,

  /// Login attempt with credentials the verifier does not accept.
  #[error("invalid credentials")]
  InvalidCredentials,

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  /// The submission failed field validation; every collected failure is
  /// reported, not just the first.
  #[error("validation failed")]
  Validation(Vec<ValidationError>),

  /// A review action that is not valid from the record's current status.
  #[error("conflict: {0}")]
  Conflict(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::Unauthorized => Redirect::to("/review/login").into_response(),
      Error::InvalidCredentials => (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "error": "invalid credentials" })),
      )
        .into_response(),
      Error::NotFound(msg) => {
        (StatusCode::NOT_FOUND, Json(json!({ "error": msg }))).into_response()
      }
      Error::BadRequest(msg) => {
        (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
      }
      Error::Validation(errors) => {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        (
          StatusCode::UNPROCESSABLE_ENTITY,
          Json(json!({ "ok": false, "errors": errors, "messages": messages })),
        )
          .into_response()
      }
      Error::Conflict(msg) => {
        (StatusCode::CONFLICT, Json(json!({ "error": msg }))).into_response()
      }
      Error::Io(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
      Error::Store(e) => (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": e.to_string() })),
      )
        .into_response(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
