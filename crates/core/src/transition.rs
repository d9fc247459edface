// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Status transition table.
//!
//! A pure lookup from `(current status, actor role)` to the statuses the
//! actor may move the issue to. Administrators and students have separate
//! tables; terminal statuses have no outbound transitions for anyone.

use crate::error::Error;
use crate::issue::{Role, Status};

use Status::*;

const NONE: &[Status] = &[];

/// Targets an administrator may reach from an unrecognised stored status.
pub const ADMIN_RECOVERY_TARGETS: &[Status] = &[InReview, Assigned, InProgress, Closed];

/// Returns the statuses `role` may move an issue to from `current`.
pub fn allowed_next(current: Status, role: Role) -> &'static [Status] {
    if current.is_terminal() {
        return NONE;
    }
    match role {
        Role::Admin => admin_table(current),
        Role::Student => student_table(current),
    }
}

fn admin_table(current: Status) -> &'static [Status] {
    match current {
        Submitted => &[InReview, Assigned, Delayed],
        InReview => &[Assigned, Delayed, Closed],
        Assigned => &[InProgress, Delayed],
        InProgress => &[WaitingForParts, Delayed, Completed],
        WaitingForParts => &[InProgress, Delayed],
        Delayed => &[InReview, Assigned, InProgress],
        Completed => &[PendingStudentConfirmation],
        PendingStudentConfirmation => &[InProgress, Closed],
        Resolved | Closed => NONE,
    }
}

fn student_table(current: Status) -> &'static [Status] {
    match current {
        PendingStudentConfirmation => &[Resolved],
        _ => NONE,
    }
}

/// Like [`allowed_next`], but for a status string read straight from storage.
///
/// An unrecognised value gives administrators the recovery targets
/// (`in-review`, `assigned`, `in-progress`, `closed`) and students nothing.
/// Reaching that branch means the stored data is suspect, so it is logged.
pub fn allowed_next_raw(current: &str, role: Role) -> &'static [Status] {
    match current.parse::<Status>() {
        Ok(status) => allowed_next(status, role),
        Err(_) => {
            tracing::warn!(
                status = current,
                %role,
                "unrecognised stored status, using recovery transitions"
            );
            match role {
                Role::Admin => ADMIN_RECOVERY_TARGETS,
                Role::Student => NONE,
            }
        }
    }
}

/// Returns true if `role` may move an issue from `current` to `target`.
pub fn can_transition(current: Status, target: Status, role: Role) -> bool {
    allowed_next(current, role).contains(&target)
}

/// Formats a target list for error hints.
pub fn format_targets(targets: &[Status]) -> String {
    if targets.is_empty() {
        return "(none)".to_string();
    }
    targets
        .iter()
        .map(Status::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks a transition, producing the caller-facing error when it is not allowed.
pub fn check_transition(current: Status, target: Status, role: Role) -> Result<(), Error> {
    if can_transition(current, target, role) {
        return Ok(());
    }
    Err(Error::InvalidTransition {
        from: current.to_string(),
        to: target.to_string(),
        role: role.to_string(),
        valid_targets: format_targets(allowed_next(current, role)),
    })
}

#[cfg(test)]
#[path = "transition_tests.rs"]
mod tests;
