// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! In-process change feed.
//!
//! Views subscribe to a query and receive a fresh snapshot of its result
//! after every committed write that could affect it:
//!
//! - [`FeedQuery::Issue`] gets the issue document after each write to it.
//! - [`FeedQuery::Notifications`] gets the complete, re-queried list for its
//!   filter after each notification write.
//!
//! Callbacks run on the writer's thread after the write has committed and
//! must not subscribe or unsubscribe from inside the callback.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::issue::Issue;
use crate::notify::{AudienceFilter, Notification};
use crate::store::NotificationStore;

/// What a subscriber is watching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedQuery {
    /// One issue document.
    Issue(String),
    /// The notification list visible through a filter.
    Notifications(AudienceFilter),
}

/// The current result of a [`FeedQuery`].
#[derive(Debug, Clone, PartialEq)]
pub enum Snapshot {
    Issue(Issue),
    Notifications(Vec<Notification>),
}

type Callback = Arc<dyn Fn(&Snapshot) + Send + Sync>;

struct Subscriber {
    id: u64,
    query: FeedQuery,
    on_change: Callback,
}

#[derive(Default)]
struct FeedInner {
    next_id: AtomicU64,
    subscribers: Mutex<Vec<Subscriber>>,
}

/// Broadcasts committed changes to subscribed views.
#[derive(Clone, Default)]
pub struct ChangeFeed {
    inner: Arc<FeedInner>,
}

impl ChangeFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `on_change` for `query`. Dropping the returned
    /// [`Subscription`] unsubscribes.
    pub fn subscribe<F>(&self, query: FeedQuery, on_change: F) -> Subscription
    where
        F: Fn(&Snapshot) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::SeqCst);
        let mut subscribers = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        subscribers.push(Subscriber {
            id,
            query,
            on_change: Arc::new(on_change),
        });
        tracing::debug!(subscription = id, "feed subscription added");
        Subscription {
            id,
            feed: Arc::downgrade(&self.inner),
        }
    }

    /// Number of live subscriptions.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .len()
    }

    /// Delivers `issue` to everyone watching it.
    pub fn publish_issue(&self, issue: &Issue) {
        let targets = self.matching(|query| matches!(query, FeedQuery::Issue(id) if *id == issue.id));
        if targets.is_empty() {
            return;
        }
        let snapshot = Snapshot::Issue(issue.clone());
        for (_, on_change) in targets {
            on_change(&snapshot);
        }
    }

    /// Re-runs every notification query against `store` and delivers the results.
    ///
    /// A failing query is logged and that subscriber is skipped.
    pub fn publish_notifications(&self, store: &dyn NotificationStore) {
        let targets = self.matching(|query| matches!(query, FeedQuery::Notifications(_)));
        for (query, on_change) in targets {
            let FeedQuery::Notifications(filter) = query else {
                continue;
            };
            match store.list_notifications(&filter) {
                Ok(list) => on_change(&Snapshot::Notifications(list)),
                Err(e) => tracing::warn!(error = %e, "failed to refresh notification feed"),
            }
        }
    }

    /// Clones out matching callbacks so none run under the lock.
    fn matching<P>(&self, predicate: P) -> Vec<(FeedQuery, Callback)>
    where
        P: Fn(&FeedQuery) -> bool,
    {
        let subscribers = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner());
        subscribers
            .iter()
            .filter(|s| predicate(&s.query))
            .map(|s| (s.query.clone(), Arc::clone(&s.on_change)))
            .collect()
    }
}

/// Handle for an active subscription.
pub struct Subscription {
    id: u64,
    feed: Weak<FeedInner>,
}

impl Subscription {
    /// Stops delivery. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {
        drop(self);
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.feed.upgrade() {
            let mut subscribers = inner.subscribers.lock().unwrap_or_else(|e| e.into_inner());
            subscribers.retain(|s| s.id != self.id);
            tracing::debug!(subscription = self.id, "feed subscription removed");
        }
    }
}

#[cfg(test)]
#[path = "feed_tests.rs"]
mod tests;
