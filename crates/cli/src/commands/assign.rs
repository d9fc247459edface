// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, Database, Issue, Lifecycle, SystemClock};

use super::{current_actor, open_db};
use crate::error::Result;

pub fn run(flags: &PartialIdentity, id: &str, assignee: &str) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    let issue = run_impl(&db, &actor, id, assignee)?;
    if let Some(assignee) = &issue.assignee_id {
        println!("Assigned {} to {}", issue.id, assignee);
    }
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(db: &Database, actor: &Actor, id: &str, assignee: &str) -> Result<Issue> {
    let clock = SystemClock;
    Ok(Lifecycle::new(db, db, &clock).assign(id, actor, assignee)?)
}

#[cfg(test)]
#[path = "assign_tests.rs"]
mod tests;
