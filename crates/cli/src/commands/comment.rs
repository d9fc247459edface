// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, Comment, Database, Lifecycle, SystemClock};

use super::{current_actor, open_db};
use crate::error::Result;

pub fn run(flags: &PartialIdentity, id: &str, text: &str) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    let comment = run_impl(&db, &actor, id, text)?;
    println!("Commented on {}", comment.issue_id);
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(db: &Database, actor: &Actor, id: &str, text: &str) -> Result<Comment> {
    let clock = SystemClock;
    Ok(Lifecycle::new(db, db, &clock).comment(id, actor, text)?)
}

#[cfg(test)]
#[path = "comment_tests.rs"]
mod tests;
