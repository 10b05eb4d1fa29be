//! JSON REST API for the issue tracker.
//!
//! Exposes an axum [`Router`] backed by any [`tracker_core::store::IssueStore`].
//! Transport concerns (binding, tracing layers, shutdown) are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", tracker_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod issues;
pub mod payload;

use std::sync::Arc;

use axum::{Router, routing::get};
use tracker_core::store::IssueStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: IssueStore + 'static,
{
  Router::new()
    .route(
      "/issues/{project}",
      get(issues::list::<S>)
        .post(issues::create::<S>)
        .put(issues::update::<S>)
        .delete(issues::delete::<S>),
    )
    .with_state(store)
}
