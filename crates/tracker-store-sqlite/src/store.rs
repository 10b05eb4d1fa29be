//! [`SqliteStore`] — the SQLite implementation of [`IssueStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use tracker_core::{
  issue::{Issue, IssueChanges, NewIssue, Project},
  store::IssueStore,
};

use crate::{
  encode::{ISSUE_COLUMNS, RawIssue, encode_dt, encode_uuid},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An issue store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── IssueStore impl ─────────────────────────────────────────────────────────

impl IssueStore for SqliteStore {
  type Error = crate::Error;

  async fn get_project(&self, project_name: String) -> Result<Option<Project>> {
    let name = project_name.clone();

    let raws: Option<Vec<RawIssue>> = self
      .conn
      .call(move |conn| {
        let project_id: Option<String> = conn
          .query_row(
            "SELECT project_id FROM projects WHERE project_name = ?1",
            rusqlite::params![name],
            |r| r.get(0),
          )
          .optional()?;

        let Some(project_id) = project_id else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
          "SELECT {ISSUE_COLUMNS} FROM issues WHERE project_id = ?1 ORDER BY position"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![project_id], RawIssue::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some(rows))
      })
      .await?;

    let Some(raws) = raws else {
      return Ok(None);
    };

    let issues = raws
      .into_iter()
      .map(RawIssue::into_issue)
      .collect::<Result<Vec<_>>>()?;

    Ok(Some(Project { project_name, issues }))
  }

  async fn create_issue(&self, project_name: String, input: NewIssue) -> Result<Issue> {
    let now = Utc::now();
    let issue = Issue {
      id:          Uuid::new_v4(),
      issue_title: input.issue_title,
      issue_text:  input.issue_text,
      created_on:  now,
      updated_on:  now,
      created_by:  input.created_by,
      assigned_to: input.assigned_to,
      open:        true,
      status_text: input.status_text,
    };

    let new_project_id = encode_uuid(Uuid::new_v4());
    let issue_id_str   = encode_uuid(issue.id);
    let now_str        = encode_dt(now);
    let title          = issue.issue_title.clone();
    let text           = issue.issue_text.clone();
    let created_by     = issue.created_by.clone();
    let assigned_to    = issue.assigned_to.clone();
    let status_text    = issue.status_text.clone();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // The first issue under an unseen name creates the project.
        tx.execute(
          "INSERT INTO projects (project_id, project_name, created_on)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (project_name) DO NOTHING",
          rusqlite::params![new_project_id, project_name, now_str],
        )?;

        let project_id: String = tx.query_row(
          "SELECT project_id FROM projects WHERE project_name = ?1",
          rusqlite::params![project_name],
          |r| r.get(0),
        )?;

        let position: i64 = tx.query_row(
          "SELECT COALESCE(MAX(position), 0) + 1 FROM issues WHERE project_id = ?1",
          rusqlite::params![project_id],
          |r| r.get(0),
        )?;

        tx.execute(
          "INSERT INTO issues (
             issue_id, project_id, position, issue_title, issue_text,
             created_on, updated_on, created_by, assigned_to, open, status_text
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6, ?7, ?8, 1, ?9)",
          rusqlite::params![
            issue_id_str,
            project_id,
            position,
            title,
            text,
            now_str,
            created_by,
            assigned_to,
            status_text,
          ],
        )?;

        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(issue)
  }

  async fn update_issue(&self, id: Uuid, changes: IssueChanges) -> Result<Option<Issue>> {
    let id_str  = encode_uuid(id);
    let now_str = encode_dt(Utc::now());

    let raw: Option<RawIssue> = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        // NULL parameters keep the stored value.
        let changed = tx.execute(
          "UPDATE issues SET
             issue_title = COALESCE(?2, issue_title),
             issue_text  = COALESCE(?3, issue_text),
             created_by  = COALESCE(?4, created_by),
             assigned_to = COALESCE(?5, assigned_to),
             open        = COALESCE(?6, open),
             status_text = COALESCE(?7, status_text),
             updated_on  = ?8
           WHERE issue_id = ?1",
          rusqlite::params![
            id_str,
            changes.issue_title,
            changes.issue_text,
            changes.created_by,
            changes.assigned_to,
            changes.open,
            changes.status_text,
            now_str,
          ],
        )?;

        if changed == 0 {
          return Ok(None);
        }

        let raw = tx.query_row(
          &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE issue_id = ?1"),
          rusqlite::params![id_str],
          RawIssue::from_row,
        )?;

        tx.commit()?;
        Ok(Some(raw))
      })
      .await?;

    raw.map(RawIssue::into_issue).transpose()
  }

  async fn delete_issue(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM issues WHERE issue_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }
}
