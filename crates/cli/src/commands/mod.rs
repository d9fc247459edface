// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod assign;
pub mod comment;
pub mod inbox;
pub mod init;
pub mod list;
pub mod new;
pub mod read;
pub mod show;
pub mod stats;
#[cfg(test)]
#[path = "mod_tests.rs"]
pub mod testing;
pub mod transition;
pub mod transitions;

use std::path::PathBuf;

use fd_core::identity::{EnvIdentity, PartialIdentity};
use fd_core::{Actor, Database, Error as CoreError, IdentityChain, IdentityResolver, Issue};

use crate::config::{find_work_dir, get_db_path, Config};
use crate::error::Result;

/// Helper to open the database from the current context.
pub fn open_db() -> Result<(Database, Config, PathBuf)> {
    let work_dir = find_work_dir()?;
    let config = Config::load(&work_dir)?;
    let db_path = get_db_path(&work_dir, &config);
    let db = Database::open(&db_path)?;
    Ok((db, config, work_dir))
}

/// Resolves who is acting: command-line flags, then the environment, then
/// the config `[actor]` table.
pub fn current_actor(flags: &PartialIdentity, config: &Config) -> Result<Actor> {
    let actor = IdentityChain::new()
        .then(flags.clone())
        .then(EnvIdentity::from_process())
        .then(config.actor_identity())
        .current_actor()?;
    tracing::debug!(actor = %actor.id, role = %actor.role, "resolved actor");
    Ok(actor)
}

/// Students only see the issues they reported.
pub(crate) fn ensure_visible(issue: &Issue, actor: &Actor) -> Result<()> {
    if actor.is_admin() || issue.is_owned_by(actor) {
        return Ok(());
    }
    Err(CoreError::NotIssueOwner {
        actor: actor.id.clone(),
        issue: issue.id.clone(),
    }
    .into())
}
