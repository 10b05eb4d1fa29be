//! [`Payload`] — a body extractor that accepts JSON or HTML form data.
//!
//! HTML forms post `application/x-www-form-urlencoded`; everything else is
//! parsed as JSON. An empty body deserialises to `T::default()` so that a
//! bare `DELETE` reaches the handler and gets a `missing _id` reply instead
//! of a parse error.

use axum::{
  body::Bytes,
  extract::{Form, FromRequest, Request},
  http::{HeaderMap, header},
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

pub struct Payload<T>(pub T);

fn is_form(headers: &HeaderMap) -> bool {
  headers
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .is_some_and(|ct| ct.starts_with("application/x-www-form-urlencoded"))
}

impl<S, T> FromRequest<S> for Payload<T>
where
  S: Send + Sync,
  T: DeserializeOwned + Default + Send,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    if is_form(req.headers()) {
      let Form(value) = Form::<T>::from_request(req, state)
        .await
        .map_err(|e| ApiError::BadRequest(e.body_text()))?;
      return Ok(Payload(value));
    }

    let body = Bytes::from_request(req, state)
      .await
      .map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if body.iter().all(u8::is_ascii_whitespace) {
      return Ok(Payload(T::default()));
    }

    serde_json::from_slice(&body)
      .map(Payload)
      .map_err(|e| ApiError::BadRequest(format!("invalid JSON body: {e}")))
  }
}

#[cfg(test)]
mod tests {
  use axum::body::Body;
  use tracker_core::issue::{CreateIssue, OpenFlag, UpdateIssue};

  use super::*;

  fn request(content_type: Option<&str>, body: &str) -> Request {
    let mut builder = axum::http::Request::builder().method("POST").uri("/");
    if let Some(ct) = content_type {
      builder = builder.header(header::CONTENT_TYPE, ct);
    }
    builder.body(Body::from(body.to_string())).unwrap()
  }

  #[tokio::test]
  async fn parses_json_body() {
    let req = request(
      Some("application/json"),
      r#"{"issue_title":"t","issue_text":"x","created_by":"alice"}"#,
    );
    let Payload(body) = Payload::<CreateIssue>::from_request(req, &()).await.unwrap();
    assert_eq!(body.issue_title.as_deref(), Some("t"));
    assert_eq!(body.assigned_to, None);
  }

  #[tokio::test]
  async fn parses_form_body() {
    let req = request(
      Some("application/x-www-form-urlencoded"),
      "_id=abc&status_text=in+progress&open=false",
    );
    let Payload(body) = Payload::<UpdateIssue>::from_request(req, &()).await.unwrap();
    assert_eq!(body.id(), Some("abc"));
    assert_eq!(body.status_text.as_deref(), Some("in progress"));
    assert_eq!(body.open, Some(OpenFlag::Text("false".into())));
  }

  #[tokio::test]
  async fn empty_body_is_default() {
    let req = request(None, "");
    let Payload(body) = Payload::<UpdateIssue>::from_request(req, &()).await.unwrap();
    assert_eq!(body.id(), None);
  }

  #[tokio::test]
  async fn garbage_body_is_bad_request() {
    let req = request(Some("application/json"), "{not json");
    let err = Payload::<UpdateIssue>::from_request(req, &())
      .await
      .err()
      .unwrap();
    assert!(matches!(err, ApiError::BadRequest(_)), "{err:?}");
  }
}
