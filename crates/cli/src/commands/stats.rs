// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, Database, IssueStore, ResolutionStats};

use super::list::filter_for;
use super::{current_actor, open_db};
use crate::cli::OutputFormat;
use crate::display::format_stats;
use crate::error::Result;

pub fn run(flags: &PartialIdentity, format: OutputFormat) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    let stats = run_impl(&db, &actor)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&stats)?),
        OutputFormat::Text | OutputFormat::Id => println!("{}", format_stats(&stats)),
    }
    Ok(())
}

/// Internal implementation that accepts db for testing.
///
/// Covers the issues the actor can list: everything for administrators,
/// their own reports for students.
pub(crate) fn run_impl(db: &Database, actor: &Actor) -> Result<ResolutionStats> {
    let issues = db.list_issues(&filter_for(actor, None, false))?;
    Ok(ResolutionStats::compute(&issues))
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
