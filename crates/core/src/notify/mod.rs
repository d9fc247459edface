// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Notifications: who hears about lifecycle events and how they are stored.
//!
//! - [`targeting`] decides the audiences for an event (pure rules).
//! - [`dispatcher`] persists notifications and tracks their read state.
//!
//! An audience is a set of tokens. A token is either a role keyword
//! (`"admin"`, `"student"`) or a user id. A notification is visible to a
//! reader whose [`AudienceFilter`] shares at least one token with it.

pub mod dispatcher;
pub mod targeting;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::issue::{Actor, Role};

pub use dispatcher::{Dispatcher, NotificationView};
pub use targeting::{notifications_for, targets_for, LifecycleEvent};

/// Recipients of a notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Audience(BTreeSet<String>);

impl Audience {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role pool (builder pattern).
    pub fn with_role(mut self, role: Role) -> Self {
        self.0.insert(role.as_str().to_string());
        self
    }

    /// Adds a specific user (builder pattern).
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.0.insert(user_id.into());
        self
    }

    /// Builds an audience from raw tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Audience(tokens.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn contains_role(&self, role: Role) -> bool {
        self.contains(role.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns true if the audience is nothing but the acting user.
    pub fn is_only(&self, user_id: &str) -> bool {
        self.0.len() == 1 && self.0.contains(user_id)
    }

    /// Returns true if any token is shared with `filter`.
    pub fn intersects(&self, filter: &AudienceFilter) -> bool {
        filter.0.iter().any(|t| self.0.contains(t))
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tokens: Vec<&str> = self.iter().collect();
        write!(f, "{{{}}}", tokens.join(", "))
    }
}

/// Tokens a reader listens on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AudienceFilter(BTreeSet<String>);

impl AudienceFilter {
    /// Builds a filter from raw tokens.
    pub fn from_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        AudienceFilter(tokens.into_iter().map(Into::into).collect())
    }

    /// The inbox of an actor.
    ///
    /// Administrators listen on the admin pool and their own id. Students
    /// listen on their own id only: every student-bound audience names its
    /// owner, while the bare `"student"` token would match every student.
    pub fn for_actor(actor: &Actor) -> Self {
        match actor.role {
            Role::Admin => Self::from_tokens([Role::Admin.as_str(), actor.id.as_str()]),
            Role::Student => Self::from_tokens([actor.id.as_str()]),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// What kind of lifecycle event produced a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A student submitted a new issue.
    Submitted,
    /// An issue moved to another status.
    StatusChanged,
    /// The student confirmed the resolution.
    Resolved,
    /// An administrator was assigned.
    Assigned,
    /// Someone commented on an issue.
    Commented,
}

impl NotificationKind {
    /// Returns the string representation used in storage and display.
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationKind::Submitted => "submitted",
            NotificationKind::StatusChanged => "status_changed",
            NotificationKind::Resolved => "resolved",
            NotificationKind::Assigned => "assigned",
            NotificationKind::Commented => "commented",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "submitted" => Ok(NotificationKind::Submitted),
            "status_changed" => Ok(NotificationKind::StatusChanged),
            "resolved" => Ok(NotificationKind::Resolved),
            "assigned" => Ok(NotificationKind::Assigned),
            "commented" => Ok(NotificationKind::Commented),
            _ => Err(Error::InvalidNotificationKind(s.to_string())),
        }
    }
}

/// A notification that has not been stored yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationDraft {
    pub audience: Audience,
    pub kind: NotificationKind,
    pub message: String,
    pub related_issue_id: Option<String>,
}

/// A stored notification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Database-assigned identifier.
    pub id: i64,
    pub audience: Audience,
    pub kind: NotificationKind,
    pub message: String,
    /// Flips false -> true once, never back.
    pub read: bool,
    /// Issue to navigate to; not an ownership link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_issue_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
