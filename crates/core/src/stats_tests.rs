// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use crate::issue::Actor;
use chrono::{DateTime, Duration, TimeZone, Utc};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
}

fn issue(id: &str) -> Issue {
    Issue::submit(id.into(), "Broken door".into(), &Actor::student("s-1"), t0())
}

fn resolved(id: &str, admin_after: Duration, student_after: Duration) -> Issue {
    let mut issue = issue(id);
    issue.status = Status::Resolved;
    issue.resolved_by_admin = true;
    issue.resolved_by_student = true;
    issue.admin_resolution_time = Some(t0() + admin_after);
    issue.student_confirmation_time = Some(t0() + student_after);
    issue
}

fn force_closed(id: &str, admin_after: Duration) -> Issue {
    let mut issue = issue(id);
    issue.status = Status::Closed;
    issue.resolved_by_admin = true;
    issue.admin_resolution_time = Some(t0() + admin_after);
    issue
}

#[test]
fn empty_input() {
    let stats = ResolutionStats::compute(&[]);
    assert_eq!(stats, ResolutionStats::default());
}

#[test]
fn force_closed_issues_have_no_resolution_time() {
    let issues = vec![
        resolved("fix-1", Duration::hours(1), Duration::hours(2)),
        force_closed("fix-2", Duration::hours(3)),
        issue("fix-3"),
    ];
    let stats = ResolutionStats::compute(&issues);

    assert_eq!(stats.total, 3);
    assert_eq!(stats.resolved, 1);
    assert_eq!(stats.closed, 1);
    assert_eq!(stats.open, 1);
    assert_eq!(stats.mean_resolution_secs, Some(7200));
    assert_eq!(stats.median_resolution_secs, Some(7200));
    // Admin share counts the force-closed claim too.
    assert_eq!(stats.mean_admin_resolution_secs, Some(7200));
}

#[test]
fn median_of_even_count() {
    let issues = vec![
        resolved("fix-1", Duration::hours(1), Duration::hours(1)),
        resolved("fix-2", Duration::hours(1), Duration::hours(3)),
        resolved("fix-3", Duration::hours(1), Duration::hours(5)),
        resolved("fix-4", Duration::hours(1), Duration::hours(11)),
    ];
    let stats = ResolutionStats::compute(&issues);
    assert_eq!(stats.median_resolution_secs, Some(4 * 3600));
    assert_eq!(stats.mean_resolution_secs, Some(5 * 3600));
}

#[test]
fn serializes_without_missing_figures() {
    let stats = ResolutionStats::compute(&[issue("fix-1")]);
    let json = serde_json::to_value(&stats).unwrap();
    assert_eq!(json["open"], 1);
    assert!(json.get("mean_resolution_secs").is_none());
}
