//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Business outcomes (validation failures, unknown ids) are reported with
//! `200 OK` and an `{"error": ...}` body, optionally echoing the `_id` the
//! client sent. Only malformed bodies and store faults use other statuses.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("required field(s) missing")]
  RequiredFieldsMissing,

  #[error("missing _id")]
  MissingId,

  #[error("no update field(s) sent")]
  NoUpdateFields { id: String },

  #[error("could not update")]
  CouldNotUpdate { id: String },

  #[error("could not delete")]
  CouldNotDelete { id: String },

  #[error("{0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    ApiError::Store(Box::new(e))
  }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
  error: &'a str,
  #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
  id:    Option<&'a str>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = self.to_string();
    let (status, id) = match &self {
      ApiError::RequiredFieldsMissing | ApiError::MissingId => (StatusCode::OK, None),
      ApiError::NoUpdateFields { id }
      | ApiError::CouldNotUpdate { id }
      | ApiError::CouldNotDelete { id } => (StatusCode::OK, Some(id.as_str())),
      ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, None),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        let body = ErrorBody { error: "internal store error", id: None };
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
      }
    };
    (status, Json(ErrorBody { error: &message, id })).into_response()
  }
}

/// The success body of an update or delete: `{"result": ..., "_id": ...}`.
#[derive(Debug, Serialize)]
pub struct Confirmation {
  pub result: &'static str,
  #[serde(rename = "_id")]
  pub id:     String,
}

impl Confirmation {
  pub fn updated(id: String) -> Self { Self { result: "successfully updated", id } }

  pub fn deleted(id: String) -> Self { Self { result: "successfully deleted", id } }
}
