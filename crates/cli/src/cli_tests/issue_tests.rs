// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn init_requires_prefix() {
    assert!(parse(&["fixdesk", "init"]).is_err());
    let cli = parse(&["fixdesk", "init", "--prefix", "fix"]).unwrap();
    match cli.command {
        Command::Init { prefix } => assert_eq!(prefix, "fix"),
        _ => panic!("Expected Init command"),
    }
}

#[test]
fn new_with_all_fields() {
    let cli = parse(&[
        "fixdesk",
        "new",
        "No heating",
        "-d",
        "Radiator cold since Monday",
        "-c",
        "hvac",
        "--location",
        "B12",
        "-o",
        "id",
    ])
    .unwrap();
    match cli.command {
        Command::New {
            title,
            description,
            category,
            location,
            output,
        } => {
            assert_eq!(title, "No heating");
            assert_eq!(description.as_deref(), Some("Radiator cold since Monday"));
            assert_eq!(category.as_deref(), Some("hvac"));
            assert_eq!(location.as_deref(), Some("B12"));
            assert_eq!(output, OutputFormat::Id);
        }
        _ => panic!("Expected New command"),
    }
}

#[test]
fn new_rejects_blank_title() {
    assert!(parse(&["fixdesk", "new", "   "]).is_err());
}

#[test]
fn assign_and_comment() {
    let cli = parse(&["fixdesk", "assign", "fix-1", "a-2"]).unwrap();
    match cli.command {
        Command::Assign { id, assignee } => {
            assert_eq!(id, "fix-1");
            assert_eq!(assignee, "a-2");
        }
        _ => panic!("Expected Assign command"),
    }

    assert!(parse(&["fixdesk", "comment", "fix-1", ""]).is_err());
}

#[test]
fn list_filters() {
    let cli = parse(&["fixdesk", "list", "-s", "in-progress", "--mine", "-o", "json"]).unwrap();
    match cli.command {
        Command::List {
            status,
            mine,
            output,
        } => {
            assert_eq!(status.as_deref(), Some("in-progress"));
            assert!(mine);
            assert_eq!(output, OutputFormat::Json);
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn show_defaults_to_text() {
    let cli = parse(&["fixdesk", "show", "fix-1"]).unwrap();
    match cli.command {
        Command::Show { id, output } => {
            assert_eq!(id, "fix-1");
            assert_eq!(output, OutputFormat::Text);
        }
        _ => panic!("Expected Show command"),
    }
}
