//! The `IssueStore` trait.
//!
//! The trait is implemented by storage backends (e.g.
//! `tracker-store-sqlite`). The HTTP layer depends on this abstraction, not
//! on any concrete backend, and receives the store as injected state.

use std::future::Future;

use uuid::Uuid;

use crate::issue::{Issue, IssueChanges, NewIssue, Project};

/// Abstraction over an issue store backend.
///
/// Each method is a single unit of work against the backend; nothing spans
/// more than one call.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait IssueStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Retrieve a project and its issues in insertion order. Returns `None` if
  /// no issue was ever submitted under `project_name`.
  fn get_project(
    &self,
    project_name: String,
  ) -> impl Future<Output = Result<Option<Project>, Self::Error>> + Send + '_;

  /// Append a new issue to `project_name`, creating the project first if it
  /// does not exist. The store assigns the id and both timestamps, and sets
  /// `open` to `true`.
  fn create_issue(
    &self,
    project_name: String,
    input: NewIssue,
  ) -> impl Future<Output = Result<Issue, Self::Error>> + Send + '_;

  /// Apply `changes` to the issue with `id`, wherever it lives, and stamp
  /// `updated_on`. Returns `None` if no such issue exists.
  fn update_issue(
    &self,
    id: Uuid,
    changes: IssueChanges,
  ) -> impl Future<Output = Result<Option<Issue>, Self::Error>> + Send + '_;

  /// Permanently remove the issue with `id` from its owning project.
  /// Returns `false` if no such issue exists.
  fn delete_issue(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
