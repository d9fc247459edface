// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, Comment, Database, Issue, IssueStore};
use serde::Serialize;

use super::{current_actor, ensure_visible, open_db};
use crate::cli::OutputFormat;
use crate::display::format_issue_details;
use crate::error::Result;

#[derive(Serialize)]
struct IssueDetails {
    #[serde(flatten)]
    issue: Issue,
    comments: Vec<Comment>,
}

pub fn run(flags: &PartialIdentity, id: &str, format: OutputFormat) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    println!("{}", run_impl(&db, &actor, id, format)?);
    Ok(())
}

/// Internal implementation that accepts db for testing; returns the rendered output.
pub(crate) fn run_impl(
    db: &Database,
    actor: &Actor,
    id: &str,
    format: OutputFormat,
) -> Result<String> {
    let issue = db.get_issue(id)?;
    ensure_visible(&issue, actor)?;
    let comments = db.get_comments(id)?;

    match format {
        OutputFormat::Json => Ok(serde_json::to_string(&IssueDetails { issue, comments })?),
        OutputFormat::Id => Ok(issue.id),
        OutputFormat::Text => Ok(format_issue_details(&issue, &comments)),
    }
}

#[cfg(test)]
#[path = "show_tests.rs"]
mod tests;
