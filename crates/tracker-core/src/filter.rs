//! Exact-match filtering of a project's issue list.
//!
//! Every supplied filter narrows the result; filters compose as AND and the
//! original order of the sequence is preserved. Values arrive as strings
//! from a query string and are coerced to the field's type:
//!
//! | Field | Rule |
//! |-------|------|
//! | `_id` | parsed as a UUID |
//! | `open` | `true` / `false`, ASCII case-insensitive |
//! | `created_on`, `updated_on` | parsed as RFC 3339, compared as instants |
//! | everything else | exact string equality |
//!
//! A value that fails to coerce matches no issue. An empty value is ignored,
//! as is an unknown key. A key given more than once narrows once per value.

use chrono::{DateTime, Utc};

use crate::issue::{Issue, parse_issue_id, parse_open_flag, parse_timestamp};

/// Filter values keyed by field, built from query-string pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
  pub id:          Vec<String>,
  pub issue_title: Vec<String>,
  pub issue_text:  Vec<String>,
  pub created_on:  Vec<String>,
  pub updated_on:  Vec<String>,
  pub created_by:  Vec<String>,
  pub assigned_to: Vec<String>,
  pub open:        Vec<String>,
  pub status_text: Vec<String>,
}

fn text_matches(filter: &[String], value: &str) -> bool {
  filter.iter().all(|f| f == value)
}

fn instant_matches(filter: &[String], value: DateTime<Utc>) -> bool {
  filter.iter().all(|f| parse_timestamp(f) == Some(value))
}

impl IssueFilter {
  /// Add one `key=value` pair. Empty values and unknown keys are dropped.
  pub fn push(&mut self, key: &str, value: String) {
    if value.is_empty() {
      return;
    }
    let slot = match key {
      "_id" => &mut self.id,
      "issue_title" => &mut self.issue_title,
      "issue_text" => &mut self.issue_text,
      "created_on" => &mut self.created_on,
      "updated_on" => &mut self.updated_on,
      "created_by" => &mut self.created_by,
      "assigned_to" => &mut self.assigned_to,
      "open" => &mut self.open,
      "status_text" => &mut self.status_text,
      _ => return,
    };
    slot.push(value);
  }

  /// `true` when no filter would narrow the result.
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  pub fn matches(&self, issue: &Issue) -> bool {
    self.id.iter().all(|f| parse_issue_id(f).ok() == Some(issue.id))
      && text_matches(&self.issue_title, &issue.issue_title)
      && text_matches(&self.issue_text, &issue.issue_text)
      && instant_matches(&self.created_on, issue.created_on)
      && instant_matches(&self.updated_on, issue.updated_on)
      && text_matches(&self.created_by, &issue.created_by)
      && text_matches(&self.assigned_to, &issue.assigned_to)
      && self.open.iter().all(|f| parse_open_flag(f) == Some(issue.open))
      && text_matches(&self.status_text, &issue.status_text)
  }

  /// Narrow `issues` to those matching every supplied filter.
  pub fn apply(&self, mut issues: Vec<Issue>) -> Vec<Issue> {
    if !self.is_empty() {
      issues.retain(|issue| self.matches(issue));
    }
    issues
  }
}

impl<K: AsRef<str>> FromIterator<(K, String)> for IssueFilter {
  fn from_iter<I: IntoIterator<Item = (K, String)>>(pairs: I) -> Self {
    let mut filter = Self::default();
    for (key, value) in pairs {
      filter.push(key.as_ref(), value);
    }
    filter
  }
}
