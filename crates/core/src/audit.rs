// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Audit log builder.
//!
//! Validates a requested status change against the transition table and the
//! evidence rules, then appends the resulting [`StatusEvent`] to the issue's
//! history and moves `status` along with it. Nothing is touched when
//! validation fails.

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::issue::{Actor, Issue, Role, Status, StatusEvent};
use crate::transition::check_transition;

/// Trims notes, treating blank text as absent.
pub fn normalize_notes(notes: Option<&str>) -> Option<String> {
    notes
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Drops blank attachment references.
pub fn normalize_attachments(attachments: &[String]) -> Vec<String> {
    attachments
        .iter()
        .map(|a| a.trim())
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

/// Checks that `actor` may move `issue` to `requested` with the given input.
///
/// Order of checks: transition table, resolution notes, administrator
/// evidence.
pub fn validate_event(
    issue: &Issue,
    actor: &Actor,
    requested: Status,
    notes: Option<&str>,
    attachments: &[String],
) -> Result<()> {
    check_transition(issue.status, requested, actor.role)?;
    validate_input(actor, requested, notes, attachments)
}

/// The notes and evidence rules on their own, without the transition table.
pub fn validate_input(
    actor: &Actor,
    requested: Status,
    notes: Option<&str>,
    attachments: &[String],
) -> Result<()> {
    if requested.is_resolution_adjacent() && normalize_notes(notes).is_none() {
        return Err(Error::MissingResolutionNotes {
            status: requested.to_string(),
        });
    }

    if actor.role == Role::Admin && normalize_attachments(attachments).is_empty() {
        return Err(Error::MissingEvidence {
            status: requested.to_string(),
        });
    }

    Ok(())
}

/// Validates and appends a status event, returning the appended event.
///
/// The event timestamp never precedes the previous event's, so history order
/// and timestamp order agree even if the wall clock steps backwards.
pub fn append_event(
    issue: &mut Issue,
    actor: &Actor,
    requested: Status,
    notes: Option<&str>,
    attachments: &[String],
    now: DateTime<Utc>,
) -> Result<StatusEvent> {
    validate_event(issue, actor, requested, notes, attachments)?;
    Ok(record_event(issue, actor, requested, notes, attachments, now))
}

/// Appends a status event without consulting the transition table.
///
/// The caller has already decided the move is allowed and checked the input
/// with [`validate_input`].
pub fn record_event(
    issue: &mut Issue,
    actor: &Actor,
    requested: Status,
    notes: Option<&str>,
    attachments: &[String],
    now: DateTime<Utc>,
) -> StatusEvent {
    let timestamp = match issue.latest_event() {
        Some(last) if last.timestamp > now => last.timestamp,
        _ => now,
    };

    let event = StatusEvent::new(requested, actor, timestamp)
        .with_notes(normalize_notes(notes))
        .with_attachments(normalize_attachments(attachments));

    issue.status_history.push(event.clone());
    issue.status = requested;
    issue.updated_at = timestamp;

    event
}

#[cfg(test)]
#[path = "audit_tests.rs"]
mod tests;
