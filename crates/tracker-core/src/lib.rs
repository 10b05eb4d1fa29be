//! Core types and trait definitions for the issue tracker.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Storage backends and the HTTP layer depend on it; it depends on neither.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod filter;
pub mod issue;
pub mod store;

pub use error::{Error, Result};
