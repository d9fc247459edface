// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dual-confirmation resolution protocol.
//!
//! An issue only becomes `resolved` after two independent acknowledgements:
//!
//! 1. The administrator moves a `completed` issue forward with the
//!    `resolved-by-admin` intent. It is stored as
//!    `pending-student-confirmation` and `resolved_by_admin` flips.
//! 2. The owning student confirms with `resolved-by-student`. It is stored
//!    as `resolved` and `resolved_by_student` flips.
//!
//! While the issue waits on the student, the administrator can still reopen
//! it (`in-progress`) or force it `closed`; neither touches the student flag.
//! The confirmation flags and their timestamps are set once and never reset.

use chrono::{DateTime, Duration, Utc};

use crate::error::{Error, Result};
use crate::issue::{Intent, Issue, Status};

/// Which half of the protocol a committed intent completed, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// Ordinary transition, no protocol flag changed.
    None,
    /// The administrator's claim was recorded.
    Admin,
    /// The student's confirmation was recorded; the issue is resolved.
    Student,
}

/// Checks the protocol's ordering rule before any validation runs.
///
/// A student confirmation without the administrator's claim fails whatever
/// the current status is.
pub fn check_preconditions(issue: &Issue, intent: Intent) -> Result<()> {
    if intent == Intent::StudentConfirm && !issue.resolved_by_admin {
        return Err(Error::ResolutionNotAdminConfirmed);
    }
    Ok(())
}

/// Records the confirmation flags for an intent that has just been appended.
pub fn apply(issue: &mut Issue, intent: Intent, at: DateTime<Utc>) -> Confirmation {
    match intent {
        Intent::AdminResolve => {
            if !issue.resolved_by_admin {
                issue.resolved_by_admin = true;
                issue.admin_resolution_time = Some(at);
            }
            Confirmation::Admin
        }
        Intent::StudentConfirm => {
            if !issue.resolved_by_student {
                issue.resolved_by_student = true;
                issue.student_confirmation_time = Some(at);
            }
            Confirmation::Student
        }
        Intent::Move(_) => Confirmation::None,
    }
}

/// Total time to resolution, counted only for fully confirmed issues.
///
/// Force-closed issues are not resolved and yield `None`.
pub fn total_resolution_time(issue: &Issue) -> Option<Duration> {
    if issue.status != Status::Resolved {
        return None;
    }
    issue
        .student_confirmation_time
        .map(|confirmed| confirmed - issue.created_at)
}

/// Time until the administrator's resolution claim.
pub fn admin_resolution_time(issue: &Issue) -> Option<Duration> {
    issue
        .admin_resolution_time
        .map(|claimed| claimed - issue.created_at)
}

#[cfg(test)]
#[path = "resolution_tests.rs"]
mod tests;
