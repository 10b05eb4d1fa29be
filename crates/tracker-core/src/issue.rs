//! Issue and project types, plus the request models that produce them.
//!
//! A request field counts as *supplied* only when it is present and
//! non-empty (see [`supplied`]); an empty string is treated exactly like an
//! absent field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::{Error, Result};

// ─── Domain types ────────────────────────────────────────────────────────────

/// A tracked work item. Always owned by exactly one [`Project`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
  #[serde(rename = "_id")]
  pub id:          Uuid,
  pub issue_title: String,
  pub issue_text:  String,
  pub created_on:  DateTime<Utc>,
  pub updated_on:  DateTime<Utc>,
  pub created_by:  String,
  pub assigned_to: String,
  pub open:        bool,
  pub status_text: String,
}

/// A named grouping of issues, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
  pub project_name: String,
  pub issues:       Vec<Issue>,
}

/// A validated, ready-to-store issue. Identity and timestamps are assigned
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewIssue {
  pub issue_title: String,
  pub issue_text:  String,
  pub created_by:  String,
  pub assigned_to: String,
  pub status_text: String,
}

impl NewIssue {
  /// Build an issue from the three required fields, leaving the optional
  /// ones empty.
  pub fn new(
    issue_title: impl Into<String>,
    issue_text: impl Into<String>,
    created_by: impl Into<String>,
  ) -> Self {
    Self {
      issue_title: issue_title.into(),
      issue_text:  issue_text.into(),
      created_by:  created_by.into(),
      assigned_to: String::new(),
      status_text: String::new(),
    }
  }
}

/// A partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueChanges {
  pub issue_title: Option<String>,
  pub issue_text:  Option<String>,
  pub created_by:  Option<String>,
  pub assigned_to: Option<String>,
  pub open:        Option<bool>,
  pub status_text: Option<String>,
}

impl IssueChanges {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

// ─── Request models ──────────────────────────────────────────────────────────

/// Fields accepted when submitting a new issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateIssue {
  pub issue_title: Option<String>,
  pub issue_text:  Option<String>,
  pub created_by:  Option<String>,
  pub assigned_to: Option<String>,
  pub status_text: Option<String>,
}

impl TryFrom<CreateIssue> for NewIssue {
  type Error = Error;

  fn try_from(c: CreateIssue) -> Result<Self> {
    let (Some(issue_title), Some(issue_text), Some(created_by)) = (
      supplied(c.issue_title),
      supplied(c.issue_text),
      supplied(c.created_by),
    ) else {
      return Err(Error::RequiredFieldsMissing);
    };

    Ok(NewIssue {
      issue_title,
      issue_text,
      created_by,
      assigned_to: c.assigned_to.unwrap_or_default(),
      status_text: c.status_text.unwrap_or_default(),
    })
  }
}

/// The `open` field of an update, as sent by a JSON client (`true`) or a
/// form (`"true"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OpenFlag {
  Bool(bool),
  Text(String),
}

/// Fields accepted when updating an existing issue.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateIssue {
  #[serde(rename = "_id", default, deserialize_with = "deserialize_id")]
  pub id:          Option<String>,
  pub issue_title: Option<String>,
  pub issue_text:  Option<String>,
  pub created_by:  Option<String>,
  pub assigned_to: Option<String>,
  pub open:        Option<OpenFlag>,
  pub status_text: Option<String>,
}

impl UpdateIssue {
  /// The supplied identifier, exactly as the client sent it.
  pub fn id(&self) -> Option<&str> { self.id.as_deref().filter(|s| !s.is_empty()) }

  /// Collect the supplied fields into an [`IssueChanges`].
  ///
  /// Fails with [`Error::NoUpdateFields`] when nothing besides the id was
  /// supplied, and with [`Error::InvalidOpenFlag`] when `open` is neither a
  /// boolean nor `"true"`/`"false"`.
  pub fn into_changes(self) -> Result<IssueChanges> {
    let open = match self.open {
      None => None,
      Some(OpenFlag::Bool(b)) => Some(b),
      Some(OpenFlag::Text(s)) if s.is_empty() => None,
      Some(OpenFlag::Text(s)) => {
        Some(parse_open_flag(&s).ok_or(Error::InvalidOpenFlag(s))?)
      }
    };

    let changes = IssueChanges {
      issue_title: supplied(self.issue_title),
      issue_text: supplied(self.issue_text),
      created_by: supplied(self.created_by),
      assigned_to: supplied(self.assigned_to),
      open,
      status_text: supplied(self.status_text),
    };

    if changes.is_empty() {
      return Err(Error::NoUpdateFields);
    }
    Ok(changes)
  }
}

// ─── Coercion helpers ────────────────────────────────────────────────────────

/// `Some` only for a present, non-empty value.
pub fn supplied(value: Option<String>) -> Option<String> {
  value.filter(|s| !s.is_empty())
}

/// Accept an `_id` of any JSON type. Strings pass through unchanged; other
/// values keep their JSON text so a malformed id can still be echoed back.
pub fn deserialize_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(match Option::<Value>::deserialize(deserializer)? {
    None | Some(Value::Null) => None,
    Some(Value::String(s)) => Some(s),
    Some(other) => Some(other.to_string()),
  })
}

/// Parse a client-supplied issue identifier.
pub fn parse_issue_id(s: &str) -> Result<Uuid> {
  Uuid::parse_str(s).map_err(|_| Error::MalformedId(s.to_owned()))
}

/// `"true"` / `"false"`, ASCII case-insensitive.
pub fn parse_open_flag(s: &str) -> Option<bool> {
  if s.eq_ignore_ascii_case("true") {
    Some(true)
  } else if s.eq_ignore_ascii_case("false") {
    Some(false)
  } else {
    None
  }
}

/// Parse an RFC 3339 timestamp into UTC.
pub fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .ok()
    .map(|dt| dt.with_timezone(&Utc))
}
