// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, Clock, Database, Issue, IssueStore, Lifecycle, NewIssue, SystemClock};

use super::{current_actor, open_db};
use crate::cli::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::id::generate_unique_id;

pub fn run(
    flags: &PartialIdentity,
    title: String,
    description: Option<String>,
    category: Option<String>,
    location: Option<String>,
    output: OutputFormat,
) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;

    let mut new = NewIssue::new(title);
    new.description = description;
    new.category = category;
    new.location = location;

    let issue = run_impl(&db, &config, &actor, new)?;
    match output {
        OutputFormat::Text => println!("Reported {}: {}", issue.id, issue.title),
        OutputFormat::Id => println!("{}", issue.id),
        OutputFormat::Json => println!("{}", serde_json::to_string(&issue)?),
    }
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(
    db: &Database,
    config: &Config,
    actor: &Actor,
    new: NewIssue,
) -> Result<Issue> {
    let clock = SystemClock;
    let id = generate_unique_id(
        &config.prefix,
        new.title.trim(),
        &actor.id,
        &clock.now(),
        |id| db.issue_exists(id),
    )?;
    let issue = Lifecycle::new(db, db, &clock).submit(id, actor, new)?;
    Ok(issue)
}

#[cfg(test)]
#[path = "new_tests.rs"]
mod tests;
