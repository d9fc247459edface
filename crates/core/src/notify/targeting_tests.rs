// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use chrono::Utc;
use yare::parameterized;

fn issue_in(status: Status) -> Issue {
    let mut issue = Issue::submit(
        "fix-1".into(),
        "Broken window in dorm B".into(),
        &Actor::student("s-1"),
        Utc::now(),
    );
    issue.status = status;
    issue
}

fn owner() -> Audience {
    Audience::new().with_role(Role::Student).with_user("s-1")
}

#[parameterized(
    in_review = { Status::InReview },
    assigned = { Status::Assigned },
    in_progress = { Status::InProgress },
    delayed = { Status::Delayed },
    pending = { Status::PendingStudentConfirmation },
    closed = { Status::Closed },
)]
fn admin_status_change_targets_owner_only(status: Status) {
    let issue = issue_in(status);
    let admin = Actor::admin("a-1");
    let event = LifecycleEvent::StatusChanged {
        issue: &issue,
        actor: &admin,
        from: Status::Submitted,
    };

    let targets = targets_for(&event);
    assert_eq!(targets, vec![owner()]);
    assert!(!targets[0].contains_role(Role::Admin));
}

#[test]
fn submission_targets_admin_pool() {
    let issue = issue_in(Status::Submitted);
    let student = Actor::student("s-1");
    let event = LifecycleEvent::Submitted {
        issue: &issue,
        actor: &student,
    };
    assert_eq!(targets_for(&event), vec![Audience::new().with_role(Role::Admin)]);
}

#[test]
fn resolution_targets_owner_not_admins() {
    let issue = issue_in(Status::Resolved);
    let student = Actor::student("s-1");
    let event = LifecycleEvent::StatusChanged {
        issue: &issue,
        actor: &student,
        from: Status::PendingStudentConfirmation,
    };

    let drafts = notifications_for(&event);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].audience, owner());
    assert_eq!(drafts[0].kind, NotificationKind::Resolved);
}

#[test]
fn student_status_change_targets_admins() {
    let issue = issue_in(Status::InReview);
    let student = Actor::student("s-1");
    let event = LifecycleEvent::StatusChanged {
        issue: &issue,
        actor: &student,
        from: Status::Submitted,
    };
    assert_eq!(targets_for(&event), vec![Audience::new().with_role(Role::Admin)]);
}

#[test]
fn assignment_produces_two_independent_audiences() {
    let issue = issue_in(Status::InReview);
    let admin = Actor::admin("a-1");
    let event = LifecycleEvent::Assigned {
        issue: &issue,
        actor: &admin,
        assignee_id: "a-2",
    };

    let drafts = notifications_for(&event);
    assert_eq!(drafts.len(), 2);
    assert_eq!(
        drafts[0].audience,
        Audience::new().with_role(Role::Admin).with_user("a-2")
    );
    assert_eq!(drafts[1].audience, owner());
    assert!(drafts.iter().all(|d| d.kind == NotificationKind::Assigned));
    assert!(drafts[0].message.contains("You were assigned"));
    assert!(drafts[1].message.contains("a-2"));
}

#[test]
fn self_assignment_still_reaches_the_pool() {
    let issue = issue_in(Status::InReview);
    let admin = Actor::admin("a-1");
    let event = LifecycleEvent::Assigned {
        issue: &issue,
        actor: &admin,
        assignee_id: "a-1",
    };
    let targets = targets_for(&event);
    assert_eq!(targets.len(), 2);
    assert!(targets.iter().all(|a| !a.is_only("a-1")));
}

#[test]
fn comment_by_admin_targets_owner() {
    let issue = issue_in(Status::InProgress);
    let admin = Actor::admin("a-1");
    let comment = Comment::new(issue.id.clone(), &admin, "Parts ordered".into(), Utc::now());
    let event = LifecycleEvent::Commented {
        issue: &issue,
        actor: &admin,
        comment: &comment,
    };

    let drafts = notifications_for(&event);
    assert_eq!(drafts.len(), 1);
    assert_eq!(drafts[0].audience, owner());
    assert!(drafts[0].message.contains("Parts ordered"));
}

#[test]
fn comment_by_student_targets_admins_never_students() {
    let issue = issue_in(Status::InProgress);
    let student = Actor::student("s-1");
    let comment = Comment::new(issue.id.clone(), &student, "Still leaking".into(), Utc::now());
    let event = LifecycleEvent::Commented {
        issue: &issue,
        actor: &student,
        comment: &comment,
    };

    let targets = targets_for(&event);
    assert_eq!(targets, vec![Audience::new().with_role(Role::Admin)]);
    assert!(!targets[0].contains_role(Role::Student));
}

#[test]
fn drafts_link_back_to_issue() {
    let issue = issue_in(Status::InReview);
    let admin = Actor::admin("a-1");
    let event = LifecycleEvent::StatusChanged {
        issue: &issue,
        actor: &admin,
        from: Status::Submitted,
    };
    let drafts = notifications_for(&event);
    assert_eq!(drafts[0].related_issue_id.as_deref(), Some("fix-1"));
    assert!(drafts[0].message.contains("submitted"));
    assert!(drafts[0].message.contains("in-review"));
}

#[test]
fn long_comments_are_shortened() {
    let long = "x".repeat(200);
    let short = excerpt(&long);
    assert!(short.ends_with("..."));
    assert!(short.chars().count() < 70);
    assert_eq!(excerpt("  short  "), "short");
}

#[test]
fn audiences_are_never_empty() {
    let issue = issue_in(Status::InReview);
    let admin = Actor::admin("a-1");
    let student = Actor::student("s-1");
    let comment = Comment::new(issue.id.clone(), &student, "hi".into(), Utc::now());
    let events = [
        LifecycleEvent::Submitted {
            issue: &issue,
            actor: &student,
        },
        LifecycleEvent::StatusChanged {
            issue: &issue,
            actor: &admin,
            from: Status::Submitted,
        },
        LifecycleEvent::Assigned {
            issue: &issue,
            actor: &admin,
            assignee_id: "a-2",
        },
        LifecycleEvent::Commented {
            issue: &issue,
            actor: &student,
            comment: &comment,
        },
    ];
    for event in &events {
        for audience in targets_for(event) {
            assert!(!audience.is_empty());
            assert!(!audience.is_only(&event.actor().id));
        }
    }
}
