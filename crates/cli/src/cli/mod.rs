// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

/// Output format for commands supporting structured output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    /// Print only the issue id (`new` only)
    Id,
}

/// Who is acting, as given on the command line.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct ActorArgs {
    /// Act as this user id (overrides FIXDESK_ACTOR and the config [actor] table)
    #[arg(long = "as", global = true, value_name = "id")]
    pub id: Option<String>,

    /// Role of the acting user: student or admin (default: student)
    #[arg(long, global = true, value_name = "role")]
    pub role: Option<String>,
}

#[derive(Parser)]
#[command(name = "fixdesk")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track campus facility issues from report to confirmed resolution")]
#[command(
    long_about = "Track campus facility issues from report to confirmed resolution.\n\n\
    Students report problems, administrators work them, and an issue only counts as \
    resolved once both sides have confirmed the fix."
)]
pub struct Cli {
    /// Run as if fixdesk was started in <path>
    #[arg(short = 'C', long = "directory", global = true, value_name = "path")]
    pub directory: Option<String>,

    #[command(flatten)]
    pub actor: ActorArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Initialize fixdesk in the current directory
    #[command(after_help = "\
Examples:
  fixdesk init --prefix fix        Create .fixdesk/ with ids like fix-a1b2c3d4")]
    Init {
        /// Prefix for issue ids (2+ lowercase alphanumeric, at least one letter)
        #[arg(long)]
        prefix: String,
    },

    /// Report a new facility issue (students)
    #[command(after_help = "\
Examples:
  fixdesk new \"Leaking tap\"                        Report with a title only
  fixdesk new \"No heating\" -c hvac --location B12  Report with category and room
  fixdesk new \"Broken lock\" -o id                  Print only the new id")]
    New {
        /// Short description of the problem
        #[arg(value_parser = non_empty_string)]
        title: String,

        /// Longer description
        #[arg(long, short)]
        description: Option<String>,

        /// Category label (e.g. plumbing, electrical)
        #[arg(long, short)]
        category: Option<String>,

        /// Where the problem is
        #[arg(long)]
        location: Option<String>,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Move an issue to a new status
    #[command(name = "move")]
    #[command(after_help = "\
Examples:
  fixdesk move fix-1a2b in-review                       Start reviewing
  fixdesk move fix-1a2b delayed -n \"Waiting on vendor\"  Move with a note
  fixdesk move fix-1a2b completed -e after.jpg          Attach evidence")]
    Move {
        /// Issue id
        id: String,

        /// Target status, or resolved-by-admin / resolved-by-student
        status: String,

        /// Notes for the history entry
        #[arg(long, short)]
        notes: Option<String>,

        /// Evidence file(s) to upload and attach
        #[arg(long = "evidence", short = 'e', value_name = "FILE")]
        evidence: Vec<PathBuf>,
    },

    /// Mark an issue resolved and ask the student to confirm (admins)
    Resolve {
        /// Issue id
        id: String,

        /// What was done to fix the problem
        #[arg(long, short, value_parser = non_empty_string)]
        notes: String,

        /// Evidence file(s) showing the fix
        #[arg(long = "evidence", short = 'e', value_name = "FILE", required = true)]
        evidence: Vec<PathBuf>,
    },

    /// Confirm that a resolved issue is really fixed (students)
    Confirm {
        /// Issue id
        id: String,

        /// Confirmation notes
        #[arg(long, short, value_parser = non_empty_string)]
        notes: String,

        /// Optional evidence file(s)
        #[arg(long = "evidence", short = 'e', value_name = "FILE")]
        evidence: Vec<PathBuf>,
    },

    /// Assign an administrator to an issue (admins)
    Assign {
        /// Issue id
        id: String,

        /// Administrator user id
        #[arg(value_parser = non_empty_string)]
        assignee: String,
    },

    /// Comment on an issue
    Comment {
        /// Issue id
        id: String,

        /// Comment text
        #[arg(value_parser = non_empty_string)]
        text: String,
    },

    /// Show an issue with its history and comments
    Show {
        /// Issue id
        id: String,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List issues
    #[command(after_help = "\
Examples:
  fixdesk list                     All issues you can see
  fixdesk list -s in-progress      Only issues in progress
  fixdesk list --mine              Issues you reported, or are assigned to")]
    List {
        /// Filter by status
        #[arg(long, short)]
        status: Option<String>,

        /// Only issues reported by (students) or assigned to (admins) you
        #[arg(long)]
        mine: bool,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// List the statuses you can move an issue to
    Transitions {
        /// Issue id
        id: String,
    },

    /// Show your notifications, newest first
    Inbox {
        /// Only unread notifications
        #[arg(long)]
        unread: bool,

        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },

    /// Mark notifications as read
    Read {
        /// Notification id
        #[arg(required_unless_present = "all", conflicts_with = "all")]
        id: Option<i64>,

        /// Mark every notification in your inbox as read
        #[arg(long)]
        all: bool,
    },

    /// Resolution time statistics
    Stats {
        #[arg(long = "output", short = 'o', value_enum, default_value = "text")]
        output: OutputFormat,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
