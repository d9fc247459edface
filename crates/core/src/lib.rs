// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! fd-core: issue lifecycle and notification engine for fixdesk
//!
//! This crate provides the facility issue model, the status transition
//! table, the dual-confirmation resolution protocol, notification targeting
//! and dispatch, and the SQLite document store used by the fixdesk CLI.

pub mod audit;
pub mod clock;
pub mod db;
pub mod error;
pub mod evidence;
pub mod feed;
pub mod identity;
pub mod issue;
pub mod lifecycle;
pub mod notify;
pub mod resolution;
pub mod stats;
pub mod store;
pub mod transition;

pub use clock::{Clock, ManualClock, SystemClock};
pub use db::Database;
pub use error::{Error, Result};
pub use evidence::FsEvidenceStore;
pub use feed::{ChangeFeed, FeedQuery, Snapshot, Subscription};
pub use identity::{IdentityChain, IdentityResolver};
pub use issue::{Actor, Comment, Intent, Issue, Role, Status, StatusEvent};
pub use lifecycle::{Lifecycle, NewIssue, TransitionRequest};
pub use notify::{Audience, AudienceFilter, Dispatcher, Notification, NotificationKind};
pub use stats::ResolutionStats;
pub use store::{EvidenceStore, IssueFilter, IssueStore, NotificationStore};
