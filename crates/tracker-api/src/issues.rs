//! Handlers for `/issues/{project}`.
//!
//! | Method   | Input | Notes |
//! |----------|-------|-------|
//! | `GET`    | Query: any [`IssueFilter`] field, repeatable | Matching issues; `[]` for an unknown project |
//! | `POST`   | Body: [`CreateIssue`] | The stored issue |
//! | `PUT`    | Body: [`UpdateIssue`] | `{"result":"successfully updated","_id":...}` |
//! | `DELETE` | Body: `{"_id":...}` | `{"result":"successfully deleted","_id":...}` |
//!
//! Bodies may be JSON or form-encoded (see [`Payload`]). Update and delete
//! address issues by id across all projects; the path segment is only logged.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, Query, State, rejection::QueryRejection},
};
use serde::Deserialize;
use tracker_core::{
  Error as CoreError,
  filter::IssueFilter,
  issue::{
    CreateIssue, Issue, NewIssue, UpdateIssue, deserialize_id, parse_issue_id, supplied,
  },
  store::IssueStore,
};

use crate::{
  error::{ApiError, Confirmation},
  payload::Payload,
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /issues/{project}[?issue_title=...][&open=true][...]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Path(project): Path<String>,
  query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Issue>>, ApiError>
where
  S: IssueStore,
{
  let Query(pairs) = query.map_err(|e| ApiError::BadRequest(e.body_text()))?;
  let filter: IssueFilter = pairs.into_iter().collect();

  let issues = store
    .get_project(project)
    .await
    .map_err(ApiError::store)?
    .map(|p| filter.apply(p.issues))
    .unwrap_or_default();
  Ok(Json(issues))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /issues/{project}` — returns the stored [`Issue`].
pub async fn create<S>(
  State(store): State<Arc<S>>,
  Path(project): Path<String>,
  Payload(body): Payload<CreateIssue>,
) -> Result<Json<Issue>, ApiError>
where
  S: IssueStore,
{
  let input = NewIssue::try_from(body).map_err(|_| ApiError::RequiredFieldsMissing)?;
  let issue = store
    .create_issue(project.clone(), input)
    .await
    .map_err(ApiError::store)?;
  tracing::debug!(%project, id = %issue.id, "issue created");
  Ok(Json(issue))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /issues/{project}` — partial update of the issue named by `_id`.
///
/// Checks run in order: missing `_id`, no update fields, then a malformed or
/// unknown id. An `_id` sent alone therefore reports `no update field(s) sent`
/// even when it is malformed.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  Path(project): Path<String>,
  Payload(body): Payload<UpdateIssue>,
) -> Result<Json<Confirmation>, ApiError>
where
  S: IssueStore,
{
  let Some(id) = body.id().map(str::to_owned) else {
    return Err(ApiError::MissingId);
  };

  let changes = match body.into_changes() {
    Ok(changes) => changes,
    Err(CoreError::NoUpdateFields) => return Err(ApiError::NoUpdateFields { id }),
    Err(e) => {
      tracing::warn!(%project, %id, error = %e, "update rejected");
      return Err(ApiError::CouldNotUpdate { id });
    }
  };

  // A malformed id and an unknown one get the same answer.
  let Ok(issue_id) = parse_issue_id(&id) else {
    tracing::warn!(%project, %id, "update of malformed id");
    return Err(ApiError::CouldNotUpdate { id });
  };

  match store.update_issue(issue_id, changes).await {
    Ok(Some(_)) => {
      tracing::debug!(%project, %id, "issue updated");
      Ok(Json(Confirmation::updated(id)))
    }
    Ok(None) => {
      tracing::warn!(%project, %id, "update of unknown issue");
      Err(ApiError::CouldNotUpdate { id })
    }
    Err(e) => {
      tracing::error!(%project, %id, error = %e, "store failure during update");
      Err(ApiError::CouldNotUpdate { id })
    }
  }
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct DeleteBody {
  #[serde(rename = "_id", default, deserialize_with = "deserialize_id")]
  pub id: Option<String>,
}

/// `DELETE /issues/{project}` — body: `{"_id":"..."}`.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  Path(project): Path<String>,
  Payload(body): Payload<DeleteBody>,
) -> Result<Json<Confirmation>, ApiError>
where
  S: IssueStore,
{
  let Some(id) = supplied(body.id) else {
    return Err(ApiError::MissingId);
  };

  let Ok(issue_id) = parse_issue_id(&id) else {
    tracing::warn!(%project, %id, "delete of malformed id");
    return Err(ApiError::CouldNotDelete { id });
  };

  match store.delete_issue(issue_id).await {
    Ok(true) => {
      tracing::debug!(%project, %id, "issue deleted");
      Ok(Json(Confirmation::deleted(id)))
    }
    Ok(false) => {
      tracing::warn!(%project, %id, "delete of unknown issue");
      Err(ApiError::CouldNotDelete { id })
    }
    Err(e) => {
      tracing::error!(%project, %id, error = %e, "store failure during delete");
      Err(ApiError::CouldNotDelete { id })
    }
  }
}
