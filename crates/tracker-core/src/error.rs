//! Error types for `tracker-core`.
//!
//! The display strings of the validation variants are the exact messages
//! clients receive, so they must not be reworded.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  #[error("required field(s) missing")]
  RequiredFieldsMissing,

  #[error("no update field(s) sent")]
  NoUpdateFields,

  #[error("malformed issue id: {0:?}")]
  MalformedId(String),

  #[error("invalid value for `open`: {0:?}")]
  InvalidOpenFlag(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
