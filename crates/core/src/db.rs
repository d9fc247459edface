// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! SQLite-backed document store.
//!
//! The [`Database`] struct implements [`IssueStore`] and [`NotificationStore`]
//! on one connection. Issues and their audit trail, comments, and
//! notifications with their audience tokens each live in their own tables.

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};
use std::path::Path;

use crate::error::{Error, Result};
use crate::issue::{Comment, Issue, Status, StatusEvent};
use crate::notify::{Audience, AudienceFilter, Notification};
use crate::store::{IssueCommit, IssueFilter, IssueStore, NotificationStore};

/// SQL schema for the fixdesk database.
pub const SCHEMA: &str = r#"
-- Issue documents; `status` always mirrors the newest status_events row
CREATE TABLE IF NOT EXISTS issues (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    description TEXT,
    category TEXT,
    location TEXT,
    status TEXT NOT NULL DEFAULT 'submitted',
    resolved_by_admin INTEGER NOT NULL DEFAULT 0,
    resolved_by_student INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    admin_resolution_time TEXT,
    student_confirmation_time TEXT,
    creator_id TEXT NOT NULL,
    assignee_id TEXT,
    version INTEGER NOT NULL DEFAULT 0
);

-- Append-only audit trail
CREATE TABLE IF NOT EXISTS status_events (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id TEXT NOT NULL,
    status TEXT NOT NULL,
    actor_id TEXT NOT NULL,
    actor_role TEXT NOT NULL,
    notes TEXT,
    attachments TEXT NOT NULL DEFAULT '[]',  -- JSON array of URLs
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

CREATE TABLE IF NOT EXISTS comments (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    issue_id TEXT NOT NULL,
    author_id TEXT NOT NULL,
    author_role TEXT NOT NULL,
    body TEXT NOT NULL,
    created_at TEXT NOT NULL,
    FOREIGN KEY (issue_id) REFERENCES issues(id)
);

-- related_issue_id is a navigation hint, not a foreign key
CREATE TABLE IF NOT EXISTS notifications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    kind TEXT NOT NULL,
    message TEXT NOT NULL,
    read INTEGER NOT NULL DEFAULT 0,
    related_issue_id TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS notification_audience (
    notification_id INTEGER NOT NULL,
    token TEXT NOT NULL,
    PRIMARY KEY (notification_id, token),
    FOREIGN KEY (notification_id) REFERENCES notifications(id)
);

-- Indexes
CREATE INDEX IF NOT EXISTS idx_issues_status ON issues(status);
CREATE INDEX IF NOT EXISTS idx_issues_creator ON issues(creator_id);
CREATE INDEX IF NOT EXISTS idx_status_events_issue ON status_events(issue_id);
CREATE INDEX IF NOT EXISTS idx_comments_issue ON comments(issue_id);
CREATE INDEX IF NOT EXISTS idx_notifications_created ON notifications(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_notification_audience_token ON notification_audience(token);
"#;

const ISSUE_COLUMNS: &str = "id, title, description, category, location, status, \
     resolved_by_admin, resolved_by_student, created_at, updated_at, \
     admin_resolution_time, student_confirmation_time, creator_id, assignee_id, version";

/// Formats a timestamp so that lexical order equals time order.
fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Nanos, true)
}

fn format_timestamp_opt(ts: Option<&DateTime<Utc>>) -> Option<String> {
    ts.map(format_timestamp)
}

fn corrupted(message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(
        0,
        rusqlite::types::Type::Text,
        Box::new(Error::CorruptedData(message)),
    )
}

/// Parse a string value from the database, returning a rusqlite error on parse failure.
fn parse_db<T: std::str::FromStr>(
    value: &str,
    column: &str,
) -> std::result::Result<T, rusqlite::Error> {
    value
        .parse()
        .map_err(|_| corrupted(format!("invalid value '{value}' in column '{column}'")))
}

/// Parse an RFC3339 timestamp from the database.
fn parse_timestamp(
    value: &str,
    column: &str,
) -> std::result::Result<DateTime<Utc>, rusqlite::Error> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| corrupted(format!("invalid timestamp '{value}' in column '{column}'")))
}

fn parse_timestamp_opt(
    value: Option<String>,
    column: &str,
) -> std::result::Result<Option<DateTime<Utc>>, rusqlite::Error> {
    value.map(|v| parse_timestamp(&v, column)).transpose()
}

fn parse_attachments(value: &str) -> std::result::Result<Vec<String>, rusqlite::Error> {
    serde_json::from_str(value)
        .map_err(|_| corrupted(format!("invalid attachment list '{value}'")))
}

fn version_to_sql(version: u64) -> i64 {
    i64::try_from(version).unwrap_or(i64::MAX)
}

fn parse_version(value: i64) -> std::result::Result<u64, rusqlite::Error> {
    u64::try_from(value).map_err(|_| corrupted(format!("invalid version {value}")))
}

/// Surfaces row decoding failures as [`Error::CorruptedData`].
fn from_row_error(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::FromSqlConversionFailure(_, _, inner) => match inner.downcast::<Error>() {
            Ok(err) => *err,
            Err(other) => Error::CorruptedData(other.to_string()),
        },
        other => Error::Database(other),
    }
}

/// Maps an `issues` row selected with [`ISSUE_COLUMNS`], leaving the stored
/// status string uninterpreted beside it. History is loaded separately.
fn issue_from_row_raw(row: &Row<'_>) -> std::result::Result<(Issue, String), rusqlite::Error> {
    let status_str: String = row.get(5)?;
    let created_str: String = row.get(8)?;
    let updated_str: String = row.get(9)?;
    let issue = Issue {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        category: row.get(3)?,
        location: row.get(4)?,
        status: Status::Submitted,
        status_history: Vec::new(),
        resolved_by_admin: row.get(6)?,
        resolved_by_student: row.get(7)?,
        created_at: parse_timestamp(&created_str, "created_at")?,
        updated_at: parse_timestamp(&updated_str, "updated_at")?,
        admin_resolution_time: parse_timestamp_opt(row.get(10)?, "admin_resolution_time")?,
        student_confirmation_time: parse_timestamp_opt(
            row.get(11)?,
            "student_confirmation_time",
        )?,
        creator_id: row.get(12)?,
        assignee_id: row.get(13)?,
        version: parse_version(row.get(14)?)?,
    };
    Ok((issue, status_str))
}

fn issue_from_row(row: &Row<'_>) -> std::result::Result<Issue, rusqlite::Error> {
    let (mut issue, status_str) = issue_from_row_raw(row)?;
    issue.status = parse_db(&status_str, "status")?;
    Ok(issue)
}

/// Run schema creation and all migrations on a database connection.
///
/// Safe to call on every open; each step is idempotent.
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    migrate_add_version(conn)?;
    Ok(())
}

/// Migration: add the optimistic concurrency column to early databases.
fn migrate_add_version(conn: &Connection) -> Result<()> {
    let has_version: bool = conn
        .query_row(
            "SELECT COUNT(*) > 0 FROM pragma_table_info('issues') WHERE name = 'version'",
            [],
            |row| row.get(0),
        )
        .unwrap_or(false);

    if !has_version {
        conn.execute(
            "ALTER TABLE issues ADD COLUMN version INTEGER NOT NULL DEFAULT 0",
            [],
        )?;
    }
    Ok(())
}

/// SQLite database connection with issue and notification operations.
pub struct Database {
    /// The underlying SQLite connection.
    pub conn: Connection,
}

impl Database {
    /// Open a database connection at the given path, creating and migrating if needed.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA busy_timeout = 5000;",
        )?;

        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON;")?;
        let db = Database { conn };
        run_migrations(&db.conn)?;
        Ok(db)
    }

    /// Runs `read` inside one deferred transaction, so every statement it
    /// issues sees the same committed state even while other connections write.
    fn read_snapshot<T>(&self, read: impl FnOnce() -> Result<T>) -> Result<T> {
        let tx = self.conn.unchecked_transaction()?;
        let value = read()?;
        tx.commit()?;
        Ok(value)
    }

    /// Loads an issue row and its history. Callers wrap this in a snapshot.
    fn load_issue(&self, id: &str) -> Result<Issue> {
        let issue = self
            .conn
            .query_row(
                &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1"),
                params![id],
                issue_from_row,
            )
            .optional()
            .map_err(from_row_error)?;

        let issue = issue.ok_or_else(|| Error::IssueNotFound(id.to_string()))?;
        self.with_history(issue)
    }

    fn load_issues(&self, sql: &str, params_vec: &[String]) -> Result<Vec<Issue>> {
        let mut stmt = self.conn.prepare(sql)?;
        let issues = stmt
            .query_map(as_sql_params(params_vec).as_slice(), issue_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_row_error)?;

        issues
            .into_iter()
            .map(|issue| self.with_history(issue))
            .collect()
    }

    fn insert_status_event(conn: &Connection, issue_id: &str, event: &StatusEvent) -> Result<()> {
        conn.execute(
            "INSERT INTO status_events (issue_id, status, actor_id, actor_role, notes,
             attachments, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                issue_id,
                event.status.as_str(),
                event.actor_id,
                event.actor_role.as_str(),
                event.notes,
                serde_json::to_string(&event.attachments)?,
                format_timestamp(&event.timestamp),
            ],
        )?;
        Ok(())
    }

    /// Get the audit trail of an issue, oldest first.
    pub fn get_status_events(&self, issue_id: &str) -> Result<Vec<StatusEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT status, actor_id, actor_role, notes, attachments, created_at
             FROM status_events WHERE issue_id = ?1 ORDER BY id",
        )?;

        let events = stmt
            .query_map(params![issue_id], |row| {
                let status_str: String = row.get(0)?;
                let role_str: String = row.get(2)?;
                let attachments_str: String = row.get(4)?;
                let created_str: String = row.get(5)?;
                Ok(StatusEvent {
                    status: parse_db(&status_str, "status")?,
                    timestamp: parse_timestamp(&created_str, "created_at")?,
                    actor_id: row.get(1)?,
                    actor_role: parse_db(&role_str, "actor_role")?,
                    notes: row.get(3)?,
                    attachments: parse_attachments(&attachments_str)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_row_error)?;

        Ok(events)
    }

    fn with_history(&self, mut issue: Issue) -> Result<Issue> {
        issue.status_history = self.get_status_events(&issue.id)?;
        Ok(issue)
    }

    fn get_audience(&self, notification_id: i64) -> Result<Audience> {
        let mut stmt = self.conn.prepare(
            "SELECT token FROM notification_audience WHERE notification_id = ?1 ORDER BY token",
        )?;
        let tokens = stmt
            .query_map(params![notification_id], |row| row.get::<_, String>(0))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(Audience::from_tokens(tokens))
    }

    fn notification_from_row(row: &Row<'_>) -> std::result::Result<Notification, rusqlite::Error> {
        let kind_str: String = row.get(1)?;
        let created_str: String = row.get(5)?;
        Ok(Notification {
            id: row.get(0)?,
            audience: Audience::new(),
            kind: parse_db(&kind_str, "kind")?,
            message: row.get(2)?,
            read: row.get(3)?,
            related_issue_id: row.get(4)?,
            created_at: parse_timestamp(&created_str, "created_at")?,
        })
    }

    fn notification_exists(&self, id: i64) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM notifications WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Total number of stored notifications, regardless of audience.
    pub fn count_notifications(&self) -> Result<usize> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM notifications", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }

    /// Distinguishes a lost race from a missing issue after a guarded write matched nothing.
    fn guard_failure(&self, id: &str, expected: String) -> Error {
        match self.issue_exists(id) {
            Ok(true) => {
                tracing::debug!(issue = id, expected = %expected, "rejected concurrent write");
                Error::ConcurrentModification {
                    id: id.to_string(),
                    expected,
                }
            }
            Ok(false) => Error::IssueNotFound(id.to_string()),
            Err(e) => e,
        }
    }
}

/// Builds `?, ?, ...` for an `IN` clause over the filter's tokens.
fn token_params(filter: &AudienceFilter) -> (String, Vec<String>) {
    let tokens: Vec<String> = filter.tokens().map(str::to_string).collect();
    let placeholders = vec!["?"; tokens.len()].join(", ");
    (placeholders, tokens)
}

fn as_sql_params(values: &[String]) -> Vec<&dyn ToSql> {
    values.iter().map(|s| s as &dyn ToSql).collect()
}

impl IssueStore for Database {
    fn insert_issue(&self, issue: &Issue) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            &format!(
                "INSERT INTO issues ({ISSUE_COLUMNS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)"
            ),
            params![
                issue.id,
                issue.title,
                issue.description,
                issue.category,
                issue.location,
                issue.status.as_str(),
                issue.resolved_by_admin,
                issue.resolved_by_student,
                format_timestamp(&issue.created_at),
                format_timestamp(&issue.updated_at),
                format_timestamp_opt(issue.admin_resolution_time.as_ref()),
                format_timestamp_opt(issue.student_confirmation_time.as_ref()),
                issue.creator_id,
                issue.assignee_id,
                version_to_sql(issue.version),
            ],
        )?;
        for event in &issue.status_history {
            Self::insert_status_event(&tx, &issue.id, event)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn get_issue(&self, id: &str) -> Result<Issue> {
        self.read_snapshot(|| self.load_issue(id))
    }

    fn get_issue_raw(&self, id: &str) -> Result<(Issue, String)> {
        self.read_snapshot(|| {
            let row = self
                .conn
                .query_row(
                    &format!("SELECT {ISSUE_COLUMNS} FROM issues WHERE id = ?1"),
                    params![id],
                    issue_from_row_raw,
                )
                .optional()
                .map_err(from_row_error)?;

            let (issue, raw_status) = row.ok_or_else(|| Error::IssueNotFound(id.to_string()))?;
            let mut issue = self.with_history(issue)?;
            if let Some(status) = issue.latest_event().map(|event| event.status) {
                issue.status = status;
            }
            Ok((issue, raw_status))
        })
    }

    fn issue_exists(&self, id: &str) -> Result<bool> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM issues WHERE id = ?1",
            params![id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    fn raw_status(&self, id: &str) -> Result<String> {
        let status: Option<String> = self
            .conn
            .query_row(
                "SELECT status FROM issues WHERE id = ?1",
                params![id],
                |row| row.get(0),
            )
            .optional()?;
        status.ok_or_else(|| Error::IssueNotFound(id.to_string()))
    }

    fn commit_transition(&self, commit: &IssueCommit<'_>) -> Result<()> {
        let issue = commit.issue;
        let tx = self.conn.unchecked_transaction()?;
        let affected = tx.execute(
            "UPDATE issues SET status = ?1, resolved_by_admin = ?2, resolved_by_student = ?3,
                 admin_resolution_time = ?4, student_confirmation_time = ?5,
                 updated_at = ?6, version = ?7
             WHERE id = ?8 AND status = ?9 AND version = ?10",
            params![
                issue.status.as_str(),
                issue.resolved_by_admin,
                issue.resolved_by_student,
                format_timestamp_opt(issue.admin_resolution_time.as_ref()),
                format_timestamp_opt(issue.student_confirmation_time.as_ref()),
                format_timestamp(&issue.updated_at),
                version_to_sql(commit.expected_version.saturating_add(1)),
                issue.id,
                commit.expected_status,
                version_to_sql(commit.expected_version),
            ],
        )?;

        if affected == 0 {
            drop(tx);
            return Err(self.guard_failure(
                &issue.id,
                format!(
                    "{} at version {}",
                    commit.expected_status, commit.expected_version
                ),
            ));
        }

        Self::insert_status_event(&tx, &issue.id, commit.event)?;
        tx.commit()?;
        Ok(())
    }

    fn set_assignee(
        &self,
        id: &str,
        expected_version: u64,
        assignee_id: &str,
        at: DateTime<Utc>,
    ) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE issues SET assignee_id = ?1, updated_at = ?2, version = version + 1
             WHERE id = ?3 AND version = ?4",
            params![
                assignee_id,
                format_timestamp(&at),
                id,
                version_to_sql(expected_version)
            ],
        )?;

        if affected == 0 {
            return Err(self.guard_failure(id, format!("version {expected_version}")));
        }
        Ok(())
    }

    fn add_comment(&self, comment: &Comment) -> Result<i64> {
        if !self.issue_exists(&comment.issue_id)? {
            return Err(Error::IssueNotFound(comment.issue_id.clone()));
        }
        self.conn.execute(
            "INSERT INTO comments (issue_id, author_id, author_role, body, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                comment.issue_id,
                comment.author_id,
                comment.author_role.as_str(),
                comment.body,
                format_timestamp(&comment.created_at),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn get_comments(&self, issue_id: &str) -> Result<Vec<Comment>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, issue_id, author_id, author_role, body, created_at
             FROM comments WHERE issue_id = ?1 ORDER BY created_at, id",
        )?;

        let comments = stmt
            .query_map(params![issue_id], |row| {
                let role_str: String = row.get(3)?;
                let created_str: String = row.get(5)?;
                Ok(Comment {
                    id: row.get(0)?,
                    issue_id: row.get(1)?,
                    author_id: row.get(2)?,
                    author_role: parse_db(&role_str, "author_role")?,
                    body: row.get(4)?,
                    created_at: parse_timestamp(&created_str, "created_at")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_row_error)?;

        Ok(comments)
    }

    fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        let mut sql = format!("SELECT {ISSUE_COLUMNS} FROM issues");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<String> = Vec::new();

        if let Some(status) = filter.status {
            conditions.push("status = ?");
            params_vec.push(status.as_str().to_string());
        }
        if let Some(creator) = &filter.creator_id {
            conditions.push("creator_id = ?");
            params_vec.push(creator.clone());
        }
        if let Some(assignee) = &filter.assignee_id {
            conditions.push("assignee_id = ?");
            params_vec.push(assignee.clone());
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        self.read_snapshot(|| self.load_issues(&sql, &params_vec))
    }
}

impl NotificationStore for Database {
    fn insert_notification(&self, notification: &Notification) -> Result<i64> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO notifications (kind, message, read, related_issue_id, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                notification.kind.as_str(),
                notification.message,
                notification.read,
                notification.related_issue_id,
                format_timestamp(&notification.created_at),
            ],
        )?;
        let id = tx.last_insert_rowid();
        for token in notification.audience.iter() {
            tx.execute(
                "INSERT OR IGNORE INTO notification_audience (notification_id, token)
                 VALUES (?1, ?2)",
                params![id, token],
            )?;
        }
        tx.commit()?;
        Ok(id)
    }

    fn get_notification(&self, id: i64) -> Result<Notification> {
        let notification = self
            .conn
            .query_row(
                "SELECT id, kind, message, read, related_issue_id, created_at
                 FROM notifications WHERE id = ?1",
                params![id],
                Self::notification_from_row,
            )
            .optional()
            .map_err(from_row_error)?;

        let mut notification =
            notification.ok_or_else(|| Error::NotificationNotFound(id.to_string()))?;
        notification.audience = self.get_audience(id)?;
        Ok(notification)
    }

    fn mark_read(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute(
            "UPDATE notifications SET read = 1 WHERE id = ?1 AND read = 0",
            params![id],
        )?;
        if affected > 0 {
            return Ok(true);
        }
        if self.notification_exists(id)? {
            Ok(false)
        } else {
            Err(Error::NotificationNotFound(id.to_string()))
        }
    }

    fn mark_all_read(&self, filter: &AudienceFilter) -> Result<usize> {
        if filter.is_empty() {
            return Ok(0);
        }
        let (placeholders, tokens) = token_params(filter);
        let sql = format!(
            "UPDATE notifications SET read = 1
             WHERE read = 0 AND id IN (
                 SELECT notification_id FROM notification_audience WHERE token IN ({placeholders})
             )"
        );
        let affected = self
            .conn
            .execute(&sql, as_sql_params(&tokens).as_slice())?;
        Ok(affected)
    }

    fn list_notifications(&self, filter: &AudienceFilter) -> Result<Vec<Notification>> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let (placeholders, tokens) = token_params(filter);
        let sql = format!(
            "SELECT id, kind, message, read, related_issue_id, created_at
             FROM notifications
             WHERE id IN (
                 SELECT notification_id FROM notification_audience WHERE token IN ({placeholders})
             )
             ORDER BY created_at DESC, id DESC"
        );

        self.read_snapshot(|| {
            let mut stmt = self.conn.prepare(&sql)?;
            let notifications = stmt
                .query_map(
                    as_sql_params(&tokens).as_slice(),
                    Self::notification_from_row,
                )?
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(from_row_error)?;

            notifications
                .into_iter()
                .map(|mut n| {
                    n.audience = self.get_audience(n.id)?;
                    Ok(n)
                })
                .collect()
        })
    }
}

#[cfg(test)]
#[path = "db_tests.rs"]
mod tests;
