// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, AudienceFilter, Database, Dispatcher, NotificationStore, SystemClock};

use super::{current_actor, open_db};
use crate::error::{Error, Result};

pub fn run(flags: &PartialIdentity, id: Option<i64>, all: bool) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;

    if all {
        let changed = run_all_impl(&db, &actor)?;
        println!("Marked {} notification(s) as read", changed);
        return Ok(());
    }
    if let Some(id) = id {
        run_impl(&db, &actor, id)?;
        println!("Marked notification {} as read", id);
    }
    Ok(())
}

/// Marks one notification read. It has to be in the actor's inbox.
pub(crate) fn run_impl(db: &Database, actor: &Actor, id: i64) -> Result<()> {
    let filter = AudienceFilter::for_actor(actor);
    let notification = db.get_notification(id)?;
    if !notification.audience.intersects(&filter) {
        return Err(Error::NotInInbox(id));
    }
    let clock = SystemClock;
    Dispatcher::new(db, &clock).mark_read(id)?;
    Ok(())
}

/// Internal implementation of `read --all`.
pub(crate) fn run_all_impl(db: &Database, actor: &Actor) -> Result<usize> {
    let clock = SystemClock;
    Ok(Dispatcher::new(db, &clock).mark_all_read(&AudienceFilter::for_actor(actor))?)
}

#[cfg(test)]
#[path = "read_tests.rs"]
mod tests;
