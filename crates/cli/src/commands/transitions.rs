// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::transition::allowed_next_raw;
use fd_core::{Actor, Database, IssueStore, Status};

use super::{current_actor, ensure_visible, open_db};
use crate::error::Result;

pub fn run(flags: &PartialIdentity, id: &str) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    let (current, targets) = run_impl(&db, &actor, id)?;

    if targets.is_empty() {
        println!("{} is {}; no moves available to a {}", id, current, actor.role);
        return Ok(());
    }
    println!("{} is {}; as {} you can move it to:", id, current, actor.role);
    for target in targets {
        println!("  {}", target);
    }
    Ok(())
}

/// Internal implementation that accepts db for testing.
///
/// Reads the stored status without parsing the whole issue, so an
/// administrator can still see the recovery moves for a damaged record.
pub(crate) fn run_impl(
    db: &Database,
    actor: &Actor,
    id: &str,
) -> Result<(String, &'static [Status])> {
    let current = db.raw_status(id)?;
    if !actor.is_admin() {
        ensure_visible(&db.get_issue(id)?, actor)?;
    }
    let targets = allowed_next_raw(&current, actor.role);
    Ok((current, targets))
}

#[cfg(test)]
#[path = "transitions_tests.rs"]
mod tests;
