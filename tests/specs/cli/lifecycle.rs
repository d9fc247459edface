// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for the issue lifecycle: report, move, resolve, confirm.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;
use yare::parameterized;

fn fd() -> Command {
    let mut cmd = cargo_bin_cmd!("fixdesk");
    cmd.env_remove("FIXDESK_ACTOR")
        .env_remove("FIXDESK_ROLE")
        .env_remove("FIXDESK_LOG")
        .env_remove("RUST_LOG");
    cmd
}

fn init_temp() -> TempDir {
    let temp = TempDir::new().unwrap();
    fd().arg("init")
        .arg("--prefix")
        .arg("fix")
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn as_student(temp: &TempDir) -> Command {
    let mut cmd = fd();
    cmd.args(["--as", "s-1"]).current_dir(temp.path());
    cmd
}

fn as_admin(temp: &TempDir) -> Command {
    let mut cmd = fd();
    cmd.args(["--as", "a-1", "--role", "admin"])
        .current_dir(temp.path());
    cmd
}

fn report(temp: &TempDir, title: &str) -> String {
    let output = as_student(temp)
        .args(["new", title, "-o", "id"])
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn photo(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("photo.jpg");
    std::fs::write(&path, b"jpeg bytes").unwrap();
    path
}

fn admin_move(temp: &TempDir, id: &str, status: &str) {
    as_admin(temp)
        .args(["move", id, status, "-n", "progress"])
        .arg("-e")
        .arg(photo(temp))
        .assert()
        .success();
}

fn show_json(temp: &TempDir, id: &str) -> serde_json::Value {
    let output = as_admin(temp)
        .args(["show", id, "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn resolve(temp: &TempDir, id: &str) {
    for status in ["in-review", "assigned", "in-progress", "completed"] {
        admin_move(temp, id, status);
    }
    as_admin(temp)
        .args(["resolve", id, "-n", "Replaced the washer"])
        .arg("-e")
        .arg(photo(temp))
        .assert()
        .success()
        .stdout(predicate::str::contains("waiting for the student to confirm"));
}

// =============================================================================
// Setup and reporting
// =============================================================================

#[test]
fn commands_outside_a_project_fail() {
    let temp = TempDir::new().unwrap();
    as_student(&temp)
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not initialized"));
}

#[test]
fn report_creates_submitted_issue() {
    let temp = init_temp();
    as_student(&temp)
        .args(["new", "Leaking tap", "--location", "Block C"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Reported fix-"));

    as_student(&temp)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("(submitted)"))
        .stdout(predicate::str::contains("Leaking tap"));
}

#[test]
fn admins_cannot_report() {
    let temp = init_temp();
    as_admin(&temp)
        .args(["new", "Leaking tap"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot submit issues"));
}

#[test]
fn unknown_actor_is_explained() {
    let temp = init_temp();
    fd().args(["new", "Leaking tap"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no actor configured"));
}

#[test]
fn actor_from_environment() {
    let temp = init_temp();
    fd().args(["new", "Leaking tap"])
        .env("FIXDESK_ACTOR", "s-9")
        .current_dir(temp.path())
        .assert()
        .success();
}

#[test]
fn directory_flag() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    let elsewhere = TempDir::new().unwrap();
    fd().args(["--as", "s-1", "-C"])
        .arg(temp.path())
        .args(["show", &id])
        .current_dir(elsewhere.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Leaking tap"));
}

// =============================================================================
// Transitions
// =============================================================================

#[test]
fn admin_moves_need_evidence() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    as_admin(&temp)
        .args(["move", &id, "in-review"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("evidence is required"));
}

#[test]
fn invalid_transition_lists_valid_targets() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    as_admin(&temp)
        .args(["move", &id, "completed"])
        .arg("-e")
        .arg(photo(&temp))
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid status transition"))
        .stderr(predicate::str::contains("in-review, assigned, delayed"));
}

#[parameterized(
    unknown_word = { "fixed" },
    typo = { "in-reveiw" },
)]
fn unknown_status_is_rejected(status: &str) {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    as_admin(&temp)
        .args(["move", &id, status])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid request"));
}

#[test]
fn transitions_lists_moves_for_role() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    as_admin(&temp)
        .args(["transitions", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("  in-review"))
        .stdout(predicate::str::contains("  delayed"));
    as_student(&temp)
        .args(["transitions", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("no moves available"));
}

// =============================================================================
// Dual confirmation
// =============================================================================

#[test]
fn full_resolution_flow() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    resolve(&temp, &id);

    let pending = show_json(&temp, &id);
    assert_eq!(pending["status"], "pending-student-confirmation");
    assert_eq!(pending["resolvedByAdmin"], true);
    assert_eq!(pending["resolvedByStudent"], false);

    as_student(&temp)
        .args(["confirm", &id, "-n", "Works now"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed"));

    let resolved = show_json(&temp, &id);
    assert_eq!(resolved["status"], "resolved");
    assert_eq!(resolved["resolvedByStudent"], true);
    assert_eq!(resolved["statusHistory"].as_array().unwrap().len(), 7);
    assert!(resolved["studentConfirmationTime"].is_string());
}

#[test]
fn early_confirmation_is_refused() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    as_student(&temp)
        .args(["confirm", &id, "-n", "Fixed?"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be confirmed yet"));
    assert_eq!(show_json(&temp, &id)["status"], "submitted");
}

#[test]
fn another_student_cannot_confirm() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    resolve(&temp, &id);
    fd().args(["--as", "s-2", "confirm", &id, "-n", "Works"])
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not own"));
}

#[test]
fn resolved_issues_are_final() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    resolve(&temp, &id);
    as_student(&temp)
        .args(["confirm", &id, "-n", "Works now"])
        .assert()
        .success();

    as_admin(&temp)
        .args(["move", &id, "in-progress", "-n", "again"])
        .arg("-e")
        .arg(photo(&temp))
        .assert()
        .failure()
        .stderr(predicate::str::contains("(none)"));

    // Comments are still allowed.
    as_admin(&temp)
        .args(["comment", &id, "Thanks for confirming"])
        .assert()
        .success();
}

#[test]
fn stats_after_resolution() {
    let temp = init_temp();
    let id = report(&temp, "Leaking tap");
    report(&temp, "Broken window");
    resolve(&temp, &id);
    as_student(&temp)
        .args(["confirm", &id, "-n", "Works now"])
        .assert()
        .success();

    let output = as_admin(&temp)
        .args(["stats", "-o", "json"])
        .output()
        .unwrap();
    let stats: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["resolved"], 1);
    assert_eq!(stats["open"], 1);
}
