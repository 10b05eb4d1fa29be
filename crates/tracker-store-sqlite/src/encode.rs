//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and UUIDs as hyphenated
//! lowercase strings. `open` is stored as an integer and read back through
//! rusqlite's `bool` conversion.

use chrono::{DateTime, Utc};
use tracker_core::issue::Issue;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawIssue::from_row`].
pub const ISSUE_COLUMNS: &str = "issue_id, issue_title, issue_text, created_on, \
                                 updated_on, created_by, assigned_to, open, status_text";

/// Raw values read directly from an `issues` row.
pub struct RawIssue {
  pub issue_id:    String,
  pub issue_title: String,
  pub issue_text:  String,
  pub created_on:  String,
  pub updated_on:  String,
  pub created_by:  String,
  pub assigned_to: String,
  pub open:        bool,
  pub status_text: String,
}

impl RawIssue {
  /// Read a row selected with [`ISSUE_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawIssue {
      issue_id:    row.get(0)?,
      issue_title: row.get(1)?,
      issue_text:  row.get(2)?,
      created_on:  row.get(3)?,
      updated_on:  row.get(4)?,
      created_by:  row.get(5)?,
      assigned_to: row.get(6)?,
      open:        row.get(7)?,
      status_text: row.get(8)?,
    })
  }

  pub fn into_issue(self) -> Result<Issue> {
    Ok(Issue {
      id:          decode_uuid(&self.issue_id)?,
      issue_title: self.issue_title,
      issue_text:  self.issue_text,
      created_on:  decode_dt(&self.created_on)?,
      updated_on:  decode_dt(&self.updated_on)?,
      created_by:  self.created_by,
      assigned_to: self.assigned_to,
      open:        self.open,
      status_text: self.status_text,
    })
  }
}
