// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]

use super::*;
use yare::parameterized;

#[parameterized(
    issue_not_found = { Error::IssueNotFound("fix-123".into()), "fix-123" },
    not_confirmed = { Error::ResolutionNotAdminConfirmed, "administrator" },
    empty_audience = { Error::EmptyAudience, "audience" },
    missing_notes = { Error::MissingResolutionNotes { status: "resolved".into() }, "notes" },
    missing_evidence = { Error::MissingEvidence { status: "assigned".into() }, "evidence" },
)]
fn error_display_contains(err: Error, expected: &str) {
    assert!(err.to_string().contains(expected));
}

#[test]
fn error_invalid_transition_display() {
    let err = Error::InvalidTransition {
        from: "submitted".into(),
        to: "in-progress".into(),
        role: "admin".into(),
        valid_targets: "in-review, assigned, delayed".into(),
    };
    let msg = err.to_string();
    assert!(msg.contains("submitted"));
    assert!(msg.contains("in-progress"));
    assert!(msg.contains("admin"));
    assert!(msg.contains("in-review, assigned, delayed"));
}

#[test]
fn only_concurrent_modification_is_retryable() {
    let conflict = Error::ConcurrentModification {
        id: "fix-1".into(),
        expected: "in-review@2".into(),
    };
    assert!(conflict.is_retryable());
    assert!(!Error::ResolutionNotAdminConfirmed.is_retryable());
    assert!(!Error::EmptyAudience.is_retryable());
}

#[test]
fn error_from_io() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: Error = io_err.into();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn error_from_json() {
    let json_err = serde_json::from_str::<()>("invalid").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json(_)));
}
