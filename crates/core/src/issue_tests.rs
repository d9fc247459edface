// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

// Status parsing tests
#[parameterized(
    submitted = { "submitted", Status::Submitted },
    in_review = { "in-review", Status::InReview },
    in_review_snake = { "in_review", Status::InReview },
    assigned = { "assigned", Status::Assigned },
    in_progress = { "in-progress", Status::InProgress },
    waiting = { "waiting-for-parts", Status::WaitingForParts },
    delayed = { "delayed", Status::Delayed },
    completed = { "completed", Status::Completed },
    pending = { "pending-student-confirmation", Status::PendingStudentConfirmation },
    resolved = { "resolved", Status::Resolved },
    closed_upper = { "CLOSED", Status::Closed },
)]
fn status_from_str_valid(input: &str, expected: Status) {
    assert_eq!(input.parse::<Status>().unwrap(), expected);
}

#[parameterized(
    invalid = { "invalid" },
    empty = { "" },
    intent = { "resolved-by-admin" },
)]
fn status_from_str_invalid(input: &str) {
    assert!(input.parse::<Status>().is_err());
}

#[test]
fn status_as_str_round_trips_through_parse() {
    for status in Status::ALL {
        assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
    }
}

#[test]
fn status_serializes_kebab_case() {
    let json = serde_json::to_string(&Status::PendingStudentConfirmation).unwrap();
    assert_eq!(json, "\"pending-student-confirmation\"");
}

#[parameterized(
    resolved = { Status::Resolved, true },
    closed = { Status::Closed, true },
    pending = { Status::PendingStudentConfirmation, false },
    submitted = { Status::Submitted, false },
)]
fn status_is_terminal(status: Status, expected: bool) {
    assert_eq!(status.is_terminal(), expected);
    assert_eq!(status.is_active(), !expected);
}

#[test]
fn resolution_adjacent_statuses() {
    let adjacent: Vec<Status> = Status::ALL
        .into_iter()
        .filter(|s| s.is_resolution_adjacent())
        .collect();
    assert_eq!(
        adjacent,
        vec![Status::PendingStudentConfirmation, Status::Resolved]
    );
}

#[parameterized(
    student = { "student", Role::Student },
    admin = { "admin", Role::Admin },
    administrator = { "Administrator", Role::Admin },
)]
fn role_from_str(input: &str, expected: Role) {
    assert_eq!(input.parse::<Role>().unwrap(), expected);
}

#[test]
fn role_counterparty() {
    assert_eq!(Role::Student.counterparty(), Role::Admin);
    assert_eq!(Role::Admin.counterparty(), Role::Student);
}

#[parameterized(
    admin_intent = { "resolved-by-admin", Intent::AdminResolve },
    student_intent = { "resolved_by_student", Intent::StudentConfirm },
    plain_move = { "in-progress", Intent::Move(Status::InProgress) },
)]
fn intent_from_str(input: &str, expected: Intent) {
    assert_eq!(input.parse::<Intent>().unwrap(), expected);
}

#[test]
fn intent_from_str_rejects_garbage() {
    let err = "fixed".parse::<Intent>().unwrap_err();
    assert!(matches!(err, Error::InvalidIntent(_)));
}

#[test]
fn intent_stored_status_differs_from_request() {
    assert_eq!(
        Intent::AdminResolve.stored_status(),
        Status::PendingStudentConfirmation
    );
    assert_eq!(Intent::StudentConfirm.stored_status(), Status::Resolved);
    assert_eq!(
        Intent::Move(Status::Delayed).stored_status(),
        Status::Delayed
    );
}

#[parameterized(
    admin_pending = { Intent::Move(Status::PendingStudentConfirmation), Role::Admin, Intent::AdminResolve },
    student_resolved = { Intent::Move(Status::Resolved), Role::Student, Intent::StudentConfirm },
    admin_resolved = { Intent::Move(Status::Resolved), Role::Admin, Intent::Move(Status::Resolved) },
    student_pending = { Intent::Move(Status::PendingStudentConfirmation), Role::Student, Intent::Move(Status::PendingStudentConfirmation) },
    plain = { Intent::Move(Status::Closed), Role::Admin, Intent::Move(Status::Closed) },
)]
fn intent_normalize(intent: Intent, role: Role, expected: Intent) {
    assert_eq!(intent.normalize(role), expected);
}

#[test]
fn submit_seeds_history() {
    let student = Actor::student("s-1");
    let issue = Issue::submit("fix-1".into(), "Broken tap".into(), &student, Utc::now());

    assert_eq!(issue.status, Status::Submitted);
    assert_eq!(issue.status_history.len(), 1);
    assert_eq!(issue.status_history[0].actor_id, "s-1");
    assert_eq!(issue.status_history[0].actor_role, Role::Student);
    assert_eq!(issue.creator_id, "s-1");
    assert!(issue.is_consistent());
}

#[test]
fn issue_is_owned_by_creator_student_only() {
    let student = Actor::student("s-1");
    let issue = Issue::submit("fix-1".into(), "Broken tap".into(), &student, Utc::now());

    assert!(issue.is_owned_by(&student));
    assert!(!issue.is_owned_by(&Actor::student("s-2")));
    assert!(!issue.is_owned_by(&Actor::admin("s-1")));
}

#[test]
fn inconsistent_when_status_drifts_from_history() {
    let student = Actor::student("s-1");
    let mut issue = Issue::submit("fix-1".into(), "Broken tap".into(), &student, Utc::now());
    issue.status = Status::InReview;
    assert!(!issue.is_consistent());
}

#[test]
fn inconsistent_when_student_confirms_before_admin() {
    let student = Actor::student("s-1");
    let mut issue = Issue::submit("fix-1".into(), "Broken tap".into(), &student, Utc::now());
    issue.resolved_by_student = true;
    assert!(!issue.is_consistent());
}

#[test]
fn issue_serializes_camel_case_fields() {
    let student = Actor::student("s-1");
    let issue = Issue::submit("fix-1".into(), "Broken tap".into(), &student, Utc::now());
    let json = serde_json::to_value(&issue).unwrap();

    assert!(json.get("statusHistory").is_some());
    assert!(json.get("resolvedByAdmin").is_some());
    assert!(json.get("creatorId").is_some());
    assert_eq!(json["statusHistory"][0]["actorRole"], "student");
}
