// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rust specs for notifications: inbox, read, assignment and comments.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

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
    fd().args(["init", "--prefix", "fix"])
        .current_dir(temp.path())
        .assert()
        .success();
    temp
}

fn run_as(temp: &TempDir, actor: &str, role: &str) -> Command {
    let mut cmd = fd();
    cmd.args(["--as", actor, "--role", role])
        .current_dir(temp.path());
    cmd
}

fn report(temp: &TempDir, student: &str, title: &str) -> String {
    let output = run_as(temp, student, "student")
        .args(["new", title, "-o", "id"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

fn inbox_json(temp: &TempDir, actor: &str, role: &str) -> serde_json::Value {
    let output = run_as(temp, actor, role)
        .args(["inbox", "-o", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn admins_are_told_about_reports() {
    let temp = init_temp();
    let id = report(&temp, "s-1", "Leaking tap");

    run_as(&temp, "a-1", "admin")
        .arg("inbox")
        .assert()
        .success()
        .stdout(predicate::str::contains("New issue submitted"))
        .stdout(predicate::str::contains(id.as_str()))
        .stdout(predicate::str::contains("1 unread"));

    // The reporter is not notified about their own report.
    let inbox = inbox_json(&temp, "s-1", "student");
    assert_eq!(inbox["unread"], 0);
}

#[test]
fn assignment_notifies_assignee_and_reporter() {
    let temp = init_temp();
    let id = report(&temp, "s-1", "Leaking tap");
    run_as(&temp, "a-1", "admin")
        .args(["assign", &id, "a-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Assigned"));

    let student = inbox_json(&temp, "s-1", "student");
    assert_eq!(student["unread"], 1);
    assert_eq!(student["notifications"][0]["kind"], "assigned");

    run_as(&temp, "a-2", "admin")
        .arg("inbox")
        .assert()
        .success()
        .stdout(predicate::str::contains("You were assigned"));
}

#[test]
fn students_do_not_see_each_other() {
    let temp = init_temp();
    let id = report(&temp, "s-1", "Leaking tap");
    run_as(&temp, "a-1", "admin")
        .args(["comment", &id, "Plumber booked"])
        .assert()
        .success();

    assert_eq!(inbox_json(&temp, "s-1", "student")["unread"], 1);
    assert_eq!(inbox_json(&temp, "s-2", "student")["unread"], 0);

    run_as(&temp, "s-2", "student")
        .args(["show", &id])
        .assert()
        .failure();
}

#[test]
fn read_one_then_all() {
    let temp = init_temp();
    report(&temp, "s-1", "Leaking tap");
    report(&temp, "s-1", "Broken window");
    report(&temp, "s-1", "No heating");

    let inbox = inbox_json(&temp, "a-1", "admin");
    assert_eq!(inbox["unread"], 3);
    let newest = inbox["notifications"][0]["id"].as_i64().unwrap();

    run_as(&temp, "a-1", "admin")
        .args(["read", &newest.to_string()])
        .assert()
        .success();
    assert_eq!(inbox_json(&temp, "a-1", "admin")["unread"], 2);

    run_as(&temp, "a-1", "admin")
        .args(["inbox", "--unread"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2 unread"));

    run_as(&temp, "a-1", "admin")
        .args(["read", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Marked 2 notification(s) as read"));
    assert_eq!(inbox_json(&temp, "a-1", "admin")["unread"], 0);
}

#[test]
fn cannot_read_another_inbox() {
    let temp = init_temp();
    report(&temp, "s-1", "Leaking tap");
    let inbox = inbox_json(&temp, "a-1", "admin");
    let id = inbox["notifications"][0]["id"].as_i64().unwrap();

    run_as(&temp, "s-1", "student")
        .args(["read", &id.to_string()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not in your inbox"));
}
