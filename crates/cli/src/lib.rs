// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fixdesk - command-line front end for the facility issue engine.
//!
//! This crate owns everything around the engine in `fd-core`: project
//! configuration in `.fixdesk/`, actor resolution, issue id generation,
//! evidence uploads and terminal output.
//!
//! # Initialization
//!
//! ```rust,ignore
//! use fixdesk::{init_work_dir, find_work_dir, get_db_path, Config};
//! use fd_core::Database;
//!
//! let work_dir = init_work_dir(Path::new("."), "fix")?;
//!
//! let work_dir = find_work_dir()?;
//! let config = Config::load(&work_dir)?;
//! let db = Database::open(&get_db_path(&work_dir, &config))?;
//! ```

mod cli;
mod commands;
mod display;

pub mod config;
pub mod error;
pub mod id;

pub use cli::{ActorArgs, Cli, Command, OutputFormat};
pub use config::{find_work_dir, get_db_path, get_evidence_dir, init_work_dir, Config};
pub use error::{Error, Result};

use fd_core::identity::PartialIdentity;

/// Execute a parsed command line. This is the main entry point for library
/// users and provides a testable way to run commands without process execution.
pub fn run(cli: Cli) -> Result<()> {
    if let Some(directory) = &cli.directory {
        std::env::set_current_dir(directory)?;
    }
    let flags = PartialIdentity::new(cli.actor.id, cli.actor.role);

    match cli.command {
        Command::Init { prefix } => commands::init::run(prefix),
        Command::New {
            title,
            description,
            category,
            location,
            output,
        } => commands::new::run(&flags, title, description, category, location, output),
        Command::Move {
            id,
            status,
            notes,
            evidence,
        } => commands::transition::run_move(&flags, id, &status, notes, evidence),
        Command::Resolve {
            id,
            notes,
            evidence,
        } => commands::transition::run_resolve(&flags, id, notes, evidence),
        Command::Confirm {
            id,
            notes,
            evidence,
        } => commands::transition::run_confirm(&flags, id, notes, evidence),
        Command::Assign { id, assignee } => commands::assign::run(&flags, &id, &assignee),
        Command::Comment { id, text } => commands::comment::run(&flags, &id, &text),
        Command::Show { id, output } => commands::show::run(&flags, &id, output),
        Command::List {
            status,
            mine,
            output,
        } => commands::list::run(&flags, status, mine, output),
        Command::Transitions { id } => commands::transitions::run(&flags, &id),
        Command::Inbox { unread, output } => commands::inbox::run(&flags, unread, output),
        Command::Read { id, all } => commands::read::run(&flags, id, all),
        Command::Stats { output } => commands::stats::run(&flags, output),
    }
}
