// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use fd_core::identity::PartialIdentity;
use fd_core::{Actor, AudienceFilter, Database, Dispatcher, Notification, SystemClock};
use serde::Serialize;

use super::{current_actor, open_db};
use crate::cli::OutputFormat;
use crate::display::format_notification_line;
use crate::error::Result;

/// An actor's notifications, newest first, with the unread total.
#[derive(Debug, Serialize)]
pub struct Inbox {
    pub unread: usize,
    pub notifications: Vec<Notification>,
}

pub fn run(flags: &PartialIdentity, unread_only: bool, format: OutputFormat) -> Result<()> {
    let (db, config, _work_dir) = open_db()?;
    let actor = current_actor(flags, &config)?;
    let inbox = run_impl(&db, &actor, unread_only)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&inbox)?),
        OutputFormat::Id => {
            for notification in &inbox.notifications {
                println!("{}", notification.id);
            }
        }
        OutputFormat::Text => {
            for notification in &inbox.notifications {
                println!("{}", format_notification_line(notification));
            }
            println!("{} unread", inbox.unread);
        }
    }
    Ok(())
}

/// Internal implementation that accepts db for testing.
pub(crate) fn run_impl(db: &Database, actor: &Actor, unread_only: bool) -> Result<Inbox> {
    let clock = SystemClock;
    let dispatcher = Dispatcher::new(db, &clock);
    let mut notifications = dispatcher.list_for(&AudienceFilter::for_actor(actor))?;
    let unread = notifications.iter().filter(|n| !n.read).count();
    if unread_only {
        notifications.retain(|n| !n.read);
    }
    Ok(Inbox {
        unread,
        notifications,
    })
}

#[cfg(test)]
#[path = "inbox_tests.rs"]
mod tests;
