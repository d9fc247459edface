// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, Database, Issue, IssueFilter, IssueStore, Status};

use super::{current_actor, open_db};
use crate::cli::OutputFormat;
use crate::display::format_issue_line;
use crate::error::Result;

pub fn run(
    flags: &PartialIdentity,
    status: Option<String>,
    mine: bool,
    format: OutputFormat,
) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    let status = status.map(|s| s.parse::<Status>()).transpose()?;
    let issues = run_impl(&db, &actor, status, mine)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&issues)?),
        OutputFormat::Id => {
            for issue in &issues {
                println!("{}", issue.id);
            }
        }
        OutputFormat::Text => {
            for issue in &issues {
                println!("{}", format_issue_line(issue));
            }
        }
    }
    Ok(())
}

/// The filter an actor's listing runs with.
///
/// Students are always limited to their own reports; `mine` narrows an
/// administrator's view to issues assigned to them.
pub(crate) fn filter_for(actor: &Actor, status: Option<Status>, mine: bool) -> IssueFilter {
    let mut filter = IssueFilter::default();
    if let Some(status) = status {
        filter = filter.with_status(status);
    }
    if !actor.is_admin() {
        filter = filter.created_by(actor.id.clone());
    } else if mine {
        filter = filter.assigned_to(actor.id.clone());
    }
    filter
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(
    db: &Database,
    actor: &Actor,
    status: Option<Status>,
    mine: bool,
) -> Result<Vec<Issue>> {
    Ok(db.list_issues(&filter_for(actor, status, mine))?)
}

#[cfg(test)]
#[path = "list_tests.rs"]
mod tests;
