// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Notification dispatcher.
//!
//! Persists notification drafts, tracks read state, and feeds live inbox
//! views. Dispatch is best-effort: a failed write is logged and never
//! reaches the lifecycle operation that caused it.

use std::sync::{Arc, Mutex};

use crate::clock::Clock;
use crate::error::{Error, Result};
use crate::feed::{ChangeFeed, FeedQuery, Snapshot, Subscription};
use crate::store::NotificationStore;

use super::{AudienceFilter, Notification, NotificationDraft};

/// Stores notifications and publishes inbox changes.
pub struct Dispatcher<'a> {
    store: &'a dyn NotificationStore,
    clock: &'a dyn Clock,
    feed: Option<&'a ChangeFeed>,
}

impl<'a> Dispatcher<'a> {
    pub fn new(store: &'a dyn NotificationStore, clock: &'a dyn Clock) -> Self {
        Dispatcher {
            store,
            clock,
            feed: None,
        }
    }

    /// Publishes inbox changes to `feed` (builder pattern).
    pub fn with_feed(mut self, feed: &'a ChangeFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    /// Stores one notification, unread, stamped with the current time.
    ///
    /// An empty audience is rejected. A failed write is logged and yields
    /// `Ok(None)`, so a notification never blocks the change that caused it.
    pub fn create(&self, draft: NotificationDraft) -> Result<Option<Notification>> {
        if draft.audience.is_empty() {
            return Err(Error::EmptyAudience);
        }

        let mut notification = Notification {
            id: 0,
            audience: draft.audience,
            kind: draft.kind,
            message: draft.message,
            read: false,
            related_issue_id: draft.related_issue_id,
            created_at: self.clock.now(),
        };
        notification.id = match self.store.insert_notification(&notification) {
            Ok(id) => id,
            Err(e) => {
                let failure = Error::NotificationDispatch(e.to_string());
                tracing::warn!(
                    issue = notification.related_issue_id.as_deref().unwrap_or("-"),
                    error = %failure,
                    "notification dropped"
                );
                return Ok(None);
            }
        };
        tracing::info!(
            notification = notification.id,
            kind = %notification.kind,
            audience = %notification.audience,
            "notification created"
        );
        self.publish();
        Ok(Some(notification))
    }

    /// Stores every draft independently.
    ///
    /// Failures are logged and skipped; the notifications that were stored
    /// are returned.
    pub fn dispatch(&self, drafts: Vec<NotificationDraft>) -> Vec<Notification> {
        let mut created = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let related = draft.related_issue_id.clone();
            match self.create(draft) {
                Ok(Some(notification)) => created.push(notification),
                Ok(None) => {}
                Err(e) => tracing::warn!(
                    issue = related.as_deref().unwrap_or("-"),
                    error = %e,
                    "notification dropped"
                ),
            }
        }
        created
    }

    /// Marks one notification as read. Marking it again is a no-op.
    pub fn mark_read(&self, id: i64) -> Result<()> {
        if self.store.mark_read(id)? {
            tracing::debug!(notification = id, "notification marked read");
            self.publish();
        }
        Ok(())
    }

    /// Marks everything visible through `filter` as read; returns how many changed.
    pub fn mark_all_read(&self, filter: &AudienceFilter) -> Result<usize> {
        let changed = self.store.mark_all_read(filter)?;
        if changed > 0 {
            self.publish();
        }
        Ok(changed)
    }

    /// Notifications visible through `filter`, newest first.
    pub fn list_for(&self, filter: &AudienceFilter) -> Result<Vec<Notification>> {
        self.store.list_notifications(filter)
    }

    pub fn unread_count(&self, filter: &AudienceFilter) -> Result<usize> {
        Ok(self.list_for(filter)?.iter().filter(|n| !n.read).count())
    }

    /// Opens a live inbox for `filter`, seeded with the current list.
    ///
    /// Returns `None` when the dispatcher has no feed attached.
    pub fn watch(&self, filter: &AudienceFilter) -> Result<Option<NotificationView>> {
        let Some(feed) = self.feed else {
            return Ok(None);
        };
        let initial = self.list_for(filter)?;
        Ok(Some(NotificationView::attach(feed, filter.clone(), initial)))
    }

    fn publish(&self) {
        if let Some(feed) = self.feed {
            feed.publish_notifications(self.store);
        }
    }
}

/// A live inbox kept current by the change feed.
pub struct NotificationView {
    latest: Arc<Mutex<Vec<Notification>>>,
    _subscription: Subscription,
}

impl NotificationView {
    fn attach(feed: &ChangeFeed, filter: AudienceFilter, initial: Vec<Notification>) -> Self {
        let latest = Arc::new(Mutex::new(initial));
        let sink = Arc::clone(&latest);
        let subscription = feed.subscribe(FeedQuery::Notifications(filter), move |snapshot| {
            if let Snapshot::Notifications(list) = snapshot {
                *sink.lock().unwrap_or_else(|e| e.into_inner()) = list.clone();
            }
        });
        NotificationView {
            latest,
            _subscription: subscription,
        }
    }

    /// The most recent snapshot, newest first.
    pub fn notifications(&self) -> Vec<Notification> {
        self.latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Unread count derived from the latest snapshot.
    pub fn unread_count(&self) -> usize {
        self.latest
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|n| !n.read)
            .count()
    }
}

#[cfg(test)]
#[path = "dispatcher_tests.rs"]
mod tests;
