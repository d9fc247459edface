// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Notification targeting rules.
//!
//! Pure functions from a lifecycle event to the audiences that should hear
//! about it. Each returned audience becomes one independent notification
//! record with its own read state.
//!
//! | event | audience |
//! |---|---|
//! | status change by an admin | `{student, creator}` |
//! | status change by a student (including submission) | `{admin}` |
//! | issue reaches `resolved` | `{student, creator}` |
//! | assignment | `{admin, assignee}` and `{student, creator}` |
//! | comment | the commenter's counterparty, as for status changes |

use crate::issue::{Actor, Comment, Issue, Role, Status};

use super::{Audience, NotificationDraft, NotificationKind};

/// A committed lifecycle change that may produce notifications.
#[derive(Debug, Clone, Copy)]
pub enum LifecycleEvent<'a> {
    /// A student created the issue.
    Submitted { issue: &'a Issue, actor: &'a Actor },
    /// The issue moved from `from` to its current status.
    StatusChanged {
        issue: &'a Issue,
        actor: &'a Actor,
        from: Status,
    },
    /// An administrator was assigned.
    Assigned {
        issue: &'a Issue,
        actor: &'a Actor,
        assignee_id: &'a str,
    },
    /// A comment was added.
    Commented {
        issue: &'a Issue,
        actor: &'a Actor,
        comment: &'a Comment,
    },
}

impl<'a> LifecycleEvent<'a> {
    pub fn issue(&self) -> &'a Issue {
        match *self {
            LifecycleEvent::Submitted { issue, .. }
            | LifecycleEvent::StatusChanged { issue, .. }
            | LifecycleEvent::Assigned { issue, .. }
            | LifecycleEvent::Commented { issue, .. } => issue,
        }
    }

    pub fn actor(&self) -> &'a Actor {
        match *self {
            LifecycleEvent::Submitted { actor, .. }
            | LifecycleEvent::StatusChanged { actor, .. }
            | LifecycleEvent::Assigned { actor, .. }
            | LifecycleEvent::Commented { actor, .. } => actor,
        }
    }
}

/// The issue's owner: the student pool token plus the creator's id.
fn owner_audience(issue: &Issue) -> Audience {
    Audience::new()
        .with_role(Role::Student)
        .with_user(issue.creator_id.clone())
}

fn admin_pool() -> Audience {
    Audience::new().with_role(Role::Admin)
}

/// The other side of an interaction started by `actor`.
fn counterparty_audience(issue: &Issue, actor: &Actor) -> Audience {
    match actor.role {
        Role::Admin => owner_audience(issue),
        Role::Student => admin_pool(),
    }
}

/// Computes one audience per notification record for `event`.
///
/// Never returns an empty audience, nor one made only of the actor's id.
pub fn targets_for(event: &LifecycleEvent<'_>) -> Vec<Audience> {
    let audiences = match *event {
        LifecycleEvent::Submitted { issue, actor } => vec![counterparty_audience(issue, actor)],
        LifecycleEvent::StatusChanged { issue, actor, .. } => {
            if issue.status == Status::Resolved {
                vec![owner_audience(issue)]
            } else {
                vec![counterparty_audience(issue, actor)]
            }
        }
        LifecycleEvent::Assigned {
            issue, assignee_id, ..
        } => vec![
            admin_pool().with_user(assignee_id),
            owner_audience(issue),
        ],
        LifecycleEvent::Commented { issue, actor, .. } => {
            vec![counterparty_audience(issue, actor)]
        }
    };

    let actor = event.actor();
    audiences
        .into_iter()
        .filter(|a| !a.is_empty() && !a.is_only(&actor.id))
        .collect()
}

/// Builds the notification drafts for `event`, one per target audience.
pub fn notifications_for(event: &LifecycleEvent<'_>) -> Vec<NotificationDraft> {
    let issue = event.issue();
    let related = Some(issue.id.clone());

    let audiences = targets_for(event);
    let mut drafts = Vec::with_capacity(audiences.len());
    for audience in audiences {
        let (kind, message) = describe(event, &audience);
        drafts.push(NotificationDraft {
            audience,
            kind,
            message,
            related_issue_id: related.clone(),
        });
    }
    drafts
}

fn describe(event: &LifecycleEvent<'_>, audience: &Audience) -> (NotificationKind, String) {
    let issue = event.issue();
    let title = &issue.title;
    match *event {
        LifecycleEvent::Submitted { .. } => (
            NotificationKind::Submitted,
            format!("New issue submitted: \"{title}\""),
        ),
        LifecycleEvent::StatusChanged { from, .. } if issue.status == Status::Resolved => (
            NotificationKind::Resolved,
            format!("\"{title}\" is resolved (was {from}); thanks for confirming"),
        ),
        LifecycleEvent::StatusChanged { from, .. } => (
            NotificationKind::StatusChanged,
            format!("\"{title}\" moved from {from} to {}", issue.status),
        ),
        LifecycleEvent::Assigned { assignee_id, .. } => {
            let message = if audience.contains_role(Role::Admin) {
                format!("You were assigned to \"{title}\"")
            } else {
                format!("\"{title}\" was assigned to {assignee_id}")
            };
            (NotificationKind::Assigned, message)
        }
        LifecycleEvent::Commented { actor, comment, .. } => (
            NotificationKind::Commented,
            format!(
                "{} commented on \"{title}\": {}",
                actor.id,
                excerpt(&comment.body)
            ),
        ),
    }
}

const EXCERPT_CHARS: usize = 60;

fn excerpt(body: &str) -> String {
    let body = body.trim();
    if body.chars().count() <= EXCERPT_CHARS {
        return body.to_string();
    }
    let cut: String = body.chars().take(EXCERPT_CHARS).collect();
    format!("{}...", cut.trim_end())
}

#[cfg(test)]
#[path = "targeting_tests.rs"]
mod tests;
