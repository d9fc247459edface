// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for fd-core operations.

use thiserror::Error;

/// All possible errors that can occur in fd-core operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("issue not found: {0}")]
    IssueNotFound(String),

    #[error("notification not found: {0}")]
    NotificationNotFound(String),

    #[error("invalid status transition: {role} cannot go from {from} to {to}\n  hint: from '{from}' a {role} can go to: {valid_targets}")]
    InvalidTransition {
        from: String,
        to: String,
        role: String,
        valid_targets: String,
    },

    #[error("notes are required when moving an issue to {status}\n  hint: describe what was done to resolve the issue")]
    MissingResolutionNotes { status: String },

    #[error("evidence is required when an administrator moves an issue to {status}\n  hint: attach at least one photo or document")]
    MissingEvidence { status: String },

    #[error("resolution cannot be confirmed yet\n  hint: an administrator has to mark the issue as resolved first")]
    ResolutionNotAdminConfirmed,

    #[error("issue {id} was modified concurrently (expected {expected})\n  hint: reload the issue and retry")]
    ConcurrentModification { id: String, expected: String },

    #[error("{actor} does not own issue {issue}")]
    NotIssueOwner { actor: String, issue: String },

    #[error("a {role} cannot {action}")]
    PermissionDenied { role: String, action: String },

    #[error("no actor configured\n  hint: pass --as <id> --role <role>, set FIXDESK_ACTOR and FIXDESK_ROLE, or add an [actor] table to .fixdesk/config.toml")]
    UnknownActor,

    #[error("notification audience cannot be empty")]
    EmptyAudience,

    #[error("notification dispatch failed: {0}")]
    NotificationDispatch(String),

    #[error("invalid status: '{0}'\n  hint: valid statuses are: submitted, in-review, assigned, in-progress, waiting-for-parts, delayed, completed, pending-student-confirmation, resolved, closed")]
    InvalidStatus(String),

    #[error("invalid role: '{0}'\n  hint: valid roles are: student, admin")]
    InvalidRole(String),

    #[error("invalid request: '{0}'\n  hint: use a status name, resolved-by-admin or resolved-by-student")]
    InvalidIntent(String),

    #[error("invalid notification kind: '{0}'")]
    InvalidNotificationKind(String),

    #[error("{0}")]
    InvalidInput(String),

    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupted data: {0}")]
    CorruptedData(String),
}

impl Error {
    /// Returns true if the caller may re-fetch the issue and retry the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::ConcurrentModification { .. })
    }
}

/// A specialized Result type for fd-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
