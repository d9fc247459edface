// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Core issue types for the fixdesk facility tracker.
//!
//! This module contains the fundamental data types: Status, Role, Actor,
//! Intent, Issue, StatusEvent and Comment.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Workflow status of a facility issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Reported by a student, not yet looked at. Initial state for new issues.
    Submitted,
    /// An administrator is triaging the report.
    InReview,
    /// Handed to someone who will do the work.
    Assigned,
    /// Work is underway.
    InProgress,
    /// Work is paused until parts arrive.
    WaitingForParts,
    /// Work is postponed.
    Delayed,
    /// The work is done; the administrator has not claimed resolution yet.
    Completed,
    /// The administrator claimed resolution and waits for the student.
    PendingStudentConfirmation,
    /// Both sides confirmed the resolution.
    Resolved,
    /// Closed without student confirmation (rejected, duplicate, unresponsive).
    Closed,
}

impl Status {
    /// Every status, in workflow order.
    pub const ALL: [Status; 10] = [
        Status::Submitted,
        Status::InReview,
        Status::Assigned,
        Status::InProgress,
        Status::WaitingForParts,
        Status::Delayed,
        Status::Completed,
        Status::PendingStudentConfirmation,
        Status::Resolved,
        Status::Closed,
    ];

    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Submitted => "submitted",
            Status::InReview => "in-review",
            Status::Assigned => "assigned",
            Status::InProgress => "in-progress",
            Status::WaitingForParts => "waiting-for-parts",
            Status::Delayed => "delayed",
            Status::Completed => "completed",
            Status::PendingStudentConfirmation => "pending-student-confirmation",
            Status::Resolved => "resolved",
            Status::Closed => "closed",
        }
    }

    /// Returns true if this is a terminal state (resolved or closed).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Status::Resolved | Status::Closed)
    }

    /// Returns true if this is an active state (not resolved/closed).
    pub fn is_active(&self) -> bool {
        !self.is_terminal()
    }

    /// Returns true for the two statuses governed by dual confirmation.
    pub fn is_resolution_adjacent(&self) -> bool {
        matches!(self, Status::PendingStudentConfirmation | Status::Resolved)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "submitted" => Ok(Status::Submitted),
            "in-review" => Ok(Status::InReview),
            "assigned" => Ok(Status::Assigned),
            "in-progress" => Ok(Status::InProgress),
            "waiting-for-parts" => Ok(Status::WaitingForParts),
            "delayed" => Ok(Status::Delayed),
            "completed" => Ok(Status::Completed),
            "pending-student-confirmation" => Ok(Status::PendingStudentConfirmation),
            "resolved" => Ok(Status::Resolved),
            "closed" => Ok(Status::Closed),
            _ => Err(Error::InvalidStatus(s.to_string())),
        }
    }
}

/// Role of the actor performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Reports issues and confirms their resolution.
    Student,
    /// Triages, works on and resolves issues.
    Admin,
}

impl Role {
    /// Returns the string representation, which doubles as the audience token.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Admin => "admin",
        }
    }

    /// The role on the other side of an interaction.
    pub fn counterparty(&self) -> Role {
        match self {
            Role::Student => Role::Admin,
            Role::Admin => Role::Student,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "admin" | "administrator" => Ok(Role::Admin),
            _ => Err(Error::InvalidRole(s.to_string())),
        }
    }
}

/// The identity performing a lifecycle operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Actor {
    pub id: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Actor {
            id: id.into(),
            role,
        }
    }

    pub fn student(id: impl Into<String>) -> Self {
        Self::new(id, Role::Student)
    }

    pub fn admin(id: impl Into<String>) -> Self {
        Self::new(id, Role::Admin)
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

impl fmt::Display for Actor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.role)
    }
}

/// What an actor asks for, as opposed to the status that ends up stored.
///
/// `AdminResolve` is never stored: it is recorded as
/// `pending-student-confirmation`. `StudentConfirm` is recorded as `resolved`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Plain move to a status.
    Move(Status),
    /// The administrator's half of dual confirmation (`resolved-by-admin`).
    AdminResolve,
    /// The student's half of dual confirmation (`resolved-by-student`).
    StudentConfirm,
}

impl Intent {
    /// Returns the string representation used on the command line and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Move(status) => status.as_str(),
            Intent::AdminResolve => "resolved-by-admin",
            Intent::StudentConfirm => "resolved-by-student",
        }
    }

    /// The status that is actually stored when this intent succeeds.
    pub fn stored_status(&self) -> Status {
        match self {
            Intent::Move(status) => *status,
            Intent::AdminResolve => Status::PendingStudentConfirmation,
            Intent::StudentConfirm => Status::Resolved,
        }
    }

    /// Folds plain moves into the resolution intents they stand for.
    ///
    /// An administrator entering `pending-student-confirmation` is making the
    /// resolution claim; a student entering `resolved` is confirming it.
    pub fn normalize(self, role: Role) -> Intent {
        match (self, role) {
            (Intent::Move(Status::PendingStudentConfirmation), Role::Admin) => Intent::AdminResolve,
            (Intent::Move(Status::Resolved), Role::Student) => Intent::StudentConfirm,
            (intent, _) => intent,
        }
    }
}

impl From<Status> for Intent {
    fn from(status: Status) -> Self {
        Intent::Move(status)
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Intent {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "resolved-by-admin" => Ok(Intent::AdminResolve),
            "resolved-by-student" => Ok(Intent::StudentConfirm),
            other => other
                .parse::<Status>()
                .map(Intent::Move)
                .map_err(|_| Error::InvalidIntent(s.to_string())),
        }
    }
}

/// An audit record of one status change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusEvent {
    /// The status entered.
    pub status: Status,
    /// When the change happened.
    pub timestamp: DateTime<Utc>,
    /// Who made the change.
    pub actor_id: String,
    pub actor_role: Role,
    /// Free-text explanation; mandatory for resolution-adjacent statuses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Evidence URLs; mandatory for administrators.
    #[serde(default)]
    pub attachments: Vec<String>,
}

impl StatusEvent {
    /// Creates an event without notes or attachments.
    pub fn new(status: Status, actor: &Actor, timestamp: DateTime<Utc>) -> Self {
        StatusEvent {
            status,
            timestamp,
            actor_id: actor.id.clone(),
            actor_role: actor.role,
            notes: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the notes for this event (builder pattern).
    pub fn with_notes(mut self, notes: Option<String>) -> Self {
        self.notes = notes;
        self
    }

    /// Sets the attachments for this event (builder pattern).
    pub fn with_attachments(mut self, attachments: Vec<String>) -> Self {
        self.attachments = attachments;
        self
    }
}

/// A facility complaint moving through the lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Unique identifier (format: `{prefix}-{hash}`).
    pub id: String,
    /// Short description of the problem.
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Opaque category label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Where on campus the problem is.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Current workflow state; always the status of the last history entry.
    pub status: Status,
    /// Append-only audit trail, oldest first.
    pub status_history: Vec<StatusEvent>,
    pub resolved_by_admin: bool,
    pub resolved_by_student: bool,
    /// When the student submitted the issue.
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_resolution_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_confirmation_time: Option<DateTime<Utc>>,
    /// The student who owns the issue.
    pub creator_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
    /// Optimistic concurrency counter, bumped on every write.
    pub version: u64,
}

impl Issue {
    /// Creates a freshly submitted issue with its seed status event.
    pub fn submit(id: String, title: String, creator: &Actor, created_at: DateTime<Utc>) -> Self {
        Issue {
            id,
            title,
            description: None,
            category: None,
            location: None,
            status: Status::Submitted,
            status_history: vec![StatusEvent::new(Status::Submitted, creator, created_at)],
            resolved_by_admin: false,
            resolved_by_student: false,
            created_at,
            updated_at: created_at,
            admin_resolution_time: None,
            student_confirmation_time: None,
            creator_id: creator.id.clone(),
            assignee_id: None,
            version: 0,
        }
    }

    /// Returns the most recent status event.
    pub fn latest_event(&self) -> Option<&StatusEvent> {
        self.status_history.last()
    }

    /// Returns true if `actor` is the student who submitted this issue.
    pub fn is_owned_by(&self, actor: &Actor) -> bool {
        actor.role == Role::Student && actor.id == self.creator_id
    }

    /// Checks the structural invariants of the lifecycle.
    ///
    /// History is non-empty, `status` mirrors the last event, and `resolved`
    /// implies both confirmations with student after admin.
    pub fn is_consistent(&self) -> bool {
        let Some(last) = self.latest_event() else {
            return false;
        };
        if last.status != self.status {
            return false;
        }
        if self.resolved_by_student && !self.resolved_by_admin {
            return false;
        }
        if self.status == Status::Resolved
            && !(self.resolved_by_admin && self.resolved_by_student)
        {
            return false;
        }
        true
    }
}

/// A comment left on an issue. Comments never change status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Database-assigned identifier.
    pub id: i64,
    pub issue_id: String,
    pub author_id: String,
    pub author_role: Role,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment; the id is assigned by the store.
    pub fn new(issue_id: String, author: &Actor, body: String, created_at: DateTime<Utc>) -> Self {
        Comment {
            id: 0, // Will be set by database
            issue_id,
            author_id: author.id.clone(),
            author_role: author.role,
            body,
            created_at,
        }
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
