//! SQL schema for the issue tracker SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS projects (
    project_id    TEXT PRIMARY KEY,
    project_name  TEXT NOT NULL UNIQUE,
    created_on    TEXT NOT NULL
);

-- Issues belong to exactly one project and are hard-deleted.
CREATE TABLE IF NOT EXISTS issues (
    issue_id     TEXT PRIMARY KEY,
    project_id   TEXT NOT NULL REFERENCES projects(project_id),
    position     INTEGER NOT NULL,  -- insertion order within the project
    issue_title  TEXT NOT NULL,
    issue_text   TEXT NOT NULL,
    created_on   TEXT NOT NULL,     -- ISO 8601 UTC; server-assigned, immutable
    updated_on   TEXT NOT NULL,     -- ISO 8601 UTC; restamped on every update
    created_by   TEXT NOT NULL,
    assigned_to  TEXT NOT NULL DEFAULT '',
    open         INTEGER NOT NULL DEFAULT 1,
    status_text  TEXT NOT NULL DEFAULT ''
);

CREATE INDEX IF NOT EXISTS issues_project_idx ON issues(project_id, position);

PRAGMA user_version = 1;
";
