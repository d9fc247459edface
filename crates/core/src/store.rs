// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence seams consumed by the lifecycle engine.
//!
//! [`Database`](crate::db::Database) implements both document traits on
//! SQLite; [`FsEvidenceStore`](crate::evidence::FsEvidenceStore) implements
//! the evidence store on the local filesystem.

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::issue::{Comment, Issue, Status, StatusEvent};
use crate::notify::{AudienceFilter, Notification};

/// A status change ready to be written as one atomic unit.
///
/// The store applies it only if the issue still has `expected_status` and
/// `expected_version`; otherwise it fails with
/// [`Error::ConcurrentModification`](crate::Error::ConcurrentModification).
#[derive(Debug, Clone, Copy)]
pub struct IssueCommit<'a> {
    /// The issue as it should look after the write.
    pub issue: &'a Issue,
    /// The event appended by this change.
    pub event: &'a StatusEvent,
    /// The stored status string the write is guarded on. It need not parse
    /// as a [`Status`] when an administrator is recovering a damaged record.
    pub expected_status: &'a str,
    pub expected_version: u64,
}

/// Criteria for listing issues. Empty criteria match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub status: Option<Status>,
    pub creator_id: Option<String>,
    pub assignee_id: Option<String>,
}

impl IssueFilter {
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    pub fn created_by(mut self, creator_id: impl Into<String>) -> Self {
        self.creator_id = Some(creator_id.into());
        self
    }

    pub fn assigned_to(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }
}

/// Storage for issue documents and their history.
pub trait IssueStore {
    /// Stores a new issue together with its seed history.
    fn insert_issue(&self, issue: &Issue) -> Result<()>;

    /// Loads an issue with its full history, oldest event first.
    fn get_issue(&self, id: &str) -> Result<Issue>;

    /// Loads an issue without interpreting its stored status.
    ///
    /// Returns the issue with `status` taken from its newest history entry,
    /// together with the stored status string. Used to recover issues whose
    /// stored status is not a known value.
    fn get_issue_raw(&self, id: &str) -> Result<(Issue, String)>;

    fn issue_exists(&self, id: &str) -> Result<bool>;

    /// Returns the stored status string without interpreting it.
    fn raw_status(&self, id: &str) -> Result<String>;

    /// Applies a status change and appends its event atomically.
    fn commit_transition(&self, commit: &IssueCommit<'_>) -> Result<()>;

    /// Sets the assignee if the issue is still at `expected_version`.
    fn set_assignee(
        &self,
        id: &str,
        expected_version: u64,
        assignee_id: &str,
        at: DateTime<Utc>,
    ) -> Result<()>;

    /// Stores a comment and returns its id.
    fn add_comment(&self, comment: &Comment) -> Result<i64>;

    /// Comments on an issue, oldest first.
    fn get_comments(&self, issue_id: &str) -> Result<Vec<Comment>>;

    /// Issues matching `filter`, newest first.
    fn list_issues(&self, filter: &IssueFilter) -> Result<Vec<Issue>>;
}

/// Storage for notification documents.
pub trait NotificationStore {
    /// Stores a notification (its `id` is ignored) and returns the assigned id.
    fn insert_notification(&self, notification: &Notification) -> Result<i64>;

    fn get_notification(&self, id: i64) -> Result<Notification>;

    /// Flips `read` to true. Returns false if it already was.
    fn mark_read(&self, id: i64) -> Result<bool>;

    /// Marks every unread notification visible through `filter` as read.
    fn mark_all_read(&self, filter: &AudienceFilter) -> Result<usize>;

    /// Notifications whose audience intersects `filter`, newest first.
    fn list_notifications(&self, filter: &AudienceFilter) -> Result<Vec<Notification>>;
}

/// Blob storage for evidence attachments.
pub trait EvidenceStore {
    /// Stores `bytes` and returns a URL that refers to them.
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String>;
}
