// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Issue lifecycle service.
//!
//! The only writer of issue status. A transition runs in three stages:
//!
//! 1. Validate and build: ownership, the dual-confirmation precondition, then
//!    the audit append (transition table, notes, evidence) on a copy of the
//!    issue. Any failure here leaves storage untouched.
//! 2. Commit the new status, history entry, and confirmation fields in one
//!    version-guarded write.
//! 3. Publish to the change feed and fan out notifications. Failures here
//!    are logged and never undo stage 2.
//!
//! An issue whose stored status is not a known value can still be moved by
//! an administrator to one of the recovery targets of
//! [`allowed_next_raw`]. The write is guarded on the stored string.

use crate::audit::{append_event, normalize_notes, record_event, validate_input};
use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::feed::ChangeFeed;
use crate::issue::{Actor, Comment, Intent, Issue, Role, Status};
use crate::notify::{notifications_for, Dispatcher, LifecycleEvent};
use crate::resolution;
use crate::store::{IssueCommit, IssueStore, NotificationStore};
use crate::transition::{allowed_next_raw, format_targets};

/// Details of a new issue report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewIssue {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
}

impl NewIssue {
    pub fn new(title: impl Into<String>) -> Self {
        NewIssue {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// A status change asked for by an actor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    pub intent: Intent,
    pub notes: Option<String>,
    /// Evidence URLs, already uploaded.
    pub attachments: Vec<String>,
}

impl TransitionRequest {
    pub fn new(intent: impl Into<Intent>) -> Self {
        TransitionRequest {
            intent: intent.into(),
            notes: None,
            attachments: Vec::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_attachments<I, S>(mut self, attachments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attachments = attachments.into_iter().map(Into::into).collect();
        self
    }
}

fn clean_optional(value: Option<String>) -> Option<String> {
    normalize_notes(value.as_deref())
}

/// Orchestrates validation, persistence, and notification for issue changes.
pub struct Lifecycle<'a> {
    issues: &'a dyn IssueStore,
    dispatcher: Dispatcher<'a>,
    clock: &'a dyn Clock,
    feed: Option<&'a ChangeFeed>,
}

impl<'a> Lifecycle<'a> {
    pub fn new(
        issues: &'a dyn IssueStore,
        notifications: &'a dyn NotificationStore,
        clock: &'a dyn Clock,
    ) -> Self {
        Lifecycle {
            issues,
            dispatcher: Dispatcher::new(notifications, clock),
            clock,
            feed: None,
        }
    }

    /// Publishes committed changes to `feed` (builder pattern).
    pub fn with_feed(mut self, feed: &'a ChangeFeed) -> Self {
        self.dispatcher = self.dispatcher.with_feed(feed);
        self.feed = Some(feed);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher<'a> {
        &self.dispatcher
    }

    /// Files a new issue on behalf of a student.
    pub fn submit(&self, id: String, actor: &Actor, new: NewIssue) -> Result<Issue> {
        if actor.role != Role::Student {
            return Err(Error::PermissionDenied {
                role: actor.role.to_string(),
                action: "submit issues".to_string(),
            });
        }
        let title = new.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("title cannot be empty".to_string()));
        }

        let mut issue = Issue::submit(id, title.to_string(), actor, self.clock.now());
        issue.description = clean_optional(new.description);
        issue.category = clean_optional(new.category);
        issue.location = clean_optional(new.location);

        self.issues.insert_issue(&issue)?;
        tracing::info!(issue = %issue.id, actor = %actor.id, "issue submitted");

        self.after_commit(&issue, LifecycleEvent::Submitted {
            issue: &issue,
            actor,
        });
        Ok(issue)
    }

    /// Re-reads the issue and applies `request` to its current state.
    ///
    /// An unreadable stored status takes the recovery path instead.
    pub fn transition(
        &self,
        issue_id: &str,
        actor: &Actor,
        request: &TransitionRequest,
    ) -> Result<Issue> {
        match self.issues.get_issue(issue_id) {
            Ok(issue) => self.request_transition(&issue, actor, request),
            Err(Error::CorruptedData(reason)) => {
                let raw_status = self.issues.raw_status(issue_id)?;
                if raw_status.parse::<Status>().is_ok() {
                    return Err(Error::CorruptedData(reason));
                }
                self.recover(issue_id, &raw_status, actor, request)
            }
            Err(e) => Err(e),
        }
    }

    /// Moves an issue out of an unrecognised stored status.
    ///
    /// Only plain moves to [`allowed_next_raw`] targets are accepted, with the
    /// usual notes and evidence rules.
    fn recover(
        &self,
        issue_id: &str,
        raw_status: &str,
        actor: &Actor,
        request: &TransitionRequest,
    ) -> Result<Issue> {
        let intent = request.intent.normalize(actor.role);
        let target = intent.stored_status();
        let allowed = allowed_next_raw(raw_status, actor.role);
        if !matches!(intent, Intent::Move(_)) || !allowed.contains(&target) {
            return Err(Error::InvalidTransition {
                from: raw_status.to_string(),
                to: target.to_string(),
                role: actor.role.to_string(),
                valid_targets: format_targets(allowed),
            });
        }
        validate_input(actor, target, request.notes.as_deref(), &request.attachments)?;

        let (issue, stored) = self.issues.get_issue_raw(issue_id)?;
        if stored != raw_status {
            return Err(Error::ConcurrentModification {
                id: issue.id,
                expected: format!("{raw_status} at version {}", issue.version),
            });
        }

        let mut next = issue.clone();
        let event = record_event(
            &mut next,
            actor,
            target,
            request.notes.as_deref(),
            &request.attachments,
            self.clock.now(),
        );
        next.version = issue.version.saturating_add(1);

        self.issues.commit_transition(&IssueCommit {
            issue: &next,
            event: &event,
            expected_status: raw_status,
            expected_version: issue.version,
        })?;
        tracing::warn!(
            issue = %next.id,
            actor = %actor.id,
            from = raw_status,
            to = %next.status,
            "recovered issue from unrecognised status"
        );

        self.after_commit(&next, LifecycleEvent::StatusChanged {
            issue: &next,
            actor,
            from: issue.status,
        });
        Ok(next)
    }

    /// Applies `request` to `issue` as `actor` and returns the updated issue.
    ///
    /// `issue` is the caller's snapshot; if storage has moved on since it was
    /// read, nothing is written and [`Error::ConcurrentModification`] is
    /// returned.
    pub fn request_transition(
        &self,
        issue: &Issue,
        actor: &Actor,
        request: &TransitionRequest,
    ) -> Result<Issue> {
        if actor.role == Role::Student && !issue.is_owned_by(actor) {
            return Err(Error::NotIssueOwner {
                actor: actor.id.clone(),
                issue: issue.id.clone(),
            });
        }

        let intent = request.intent.normalize(actor.role);
        resolution::check_preconditions(issue, intent)?;

        let mut next = issue.clone();
        let event = append_event(
            &mut next,
            actor,
            intent.stored_status(),
            request.notes.as_deref(),
            &request.attachments,
            self.clock.now(),
        )?;
        resolution::apply(&mut next, intent, event.timestamp);
        next.version = issue.version.saturating_add(1);

        self.issues.commit_transition(&IssueCommit {
            issue: &next,
            event: &event,
            expected_status: issue.status.as_str(),
            expected_version: issue.version,
        })?;
        tracing::info!(
            issue = %next.id,
            actor = %actor.id,
            intent = %intent,
            from = %issue.status,
            to = %next.status,
            "transition committed"
        );

        self.after_commit(&next, LifecycleEvent::StatusChanged {
            issue: &next,
            actor,
            from: issue.status,
        });
        Ok(next)
    }

    /// Assigns an administrator to a non-terminal issue.
    pub fn assign(&self, issue_id: &str, actor: &Actor, assignee_id: &str) -> Result<Issue> {
        if !actor.is_admin() {
            return Err(Error::PermissionDenied {
                role: actor.role.to_string(),
                action: "assign issues".to_string(),
            });
        }
        let assignee_id = assignee_id.trim();
        if assignee_id.is_empty() {
            return Err(Error::InvalidInput("assignee cannot be empty".to_string()));
        }

        let mut issue = self.issues.get_issue(issue_id)?;
        if issue.status.is_terminal() {
            return Err(Error::InvalidInput(format!(
                "cannot assign {}: issue is {}",
                issue.id, issue.status
            )));
        }

        let now = self.clock.now();
        self.issues
            .set_assignee(&issue.id, issue.version, assignee_id, now)?;
        issue.assignee_id = Some(assignee_id.to_string());
        issue.updated_at = now;
        issue.version = issue.version.saturating_add(1);
        tracing::info!(issue = %issue.id, assignee = assignee_id, "issue assigned");

        self.after_commit(&issue, LifecycleEvent::Assigned {
            issue: &issue,
            actor,
            assignee_id,
        });
        Ok(issue)
    }

    /// Adds a comment. Comments are allowed in every status and never move it.
    pub fn comment(&self, issue_id: &str, actor: &Actor, body: &str) -> Result<Comment> {
        let body = body.trim();
        if body.is_empty() {
            return Err(Error::InvalidInput("comment cannot be empty".to_string()));
        }

        let issue = self.issues.get_issue(issue_id)?;
        if actor.role == Role::Student && !issue.is_owned_by(actor) {
            return Err(Error::NotIssueOwner {
                actor: actor.id.clone(),
                issue: issue.id.clone(),
            });
        }

        let mut comment = Comment::new(issue.id.clone(), actor, body.to_string(), self.clock.now());
        comment.id = self.issues.add_comment(&comment)?;
        tracing::debug!(issue = %issue.id, comment = comment.id, "comment added");

        let drafts = notifications_for(&LifecycleEvent::Commented {
            issue: &issue,
            actor,
            comment: &comment,
        });
        self.dispatcher.dispatch(drafts);
        Ok(comment)
    }

    fn after_commit(&self, issue: &Issue, event: LifecycleEvent<'_>) {
        if let Some(feed) = self.feed {
            feed.publish_issue(issue);
        }
        self.dispatcher.dispatch(notifications_for(&event));
    }
}

#[cfg(test)]
#[path = "lifecycle_tests.rs"]
mod tests;
