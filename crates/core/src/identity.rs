// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Actor identity resolution.
//!
//! The engine trusts whatever [`Actor`] it is handed and never reads ambient
//! identity itself. Front ends build one here from explicit flags, the
//! environment, or configuration, in that order.

#[cfg(test)]
#[path = "identity_tests.rs"]
mod tests;

use crate::error::{Error, Result};
use crate::issue::{Actor, Role};

/// Environment variable naming the acting user.
pub const ACTOR_ENV: &str = "FIXDESK_ACTOR";
/// Environment variable naming the acting user's role.
pub const ROLE_ENV: &str = "FIXDESK_ROLE";

/// Source of the current actor.
///
/// Returns [`Error::UnknownActor`] when this source has no identity to offer.
pub trait IdentityResolver {
    fn current_actor(&self) -> Result<Actor>;
}

impl IdentityResolver for Actor {
    fn current_actor(&self) -> Result<Actor> {
        Ok(self.clone())
    }
}

/// Builds an actor from loose parts. The role defaults to student.
pub fn actor_from_parts(id: Option<&str>, role: Option<&str>) -> Result<Actor> {
    let id = id.map(str::trim).filter(|s| !s.is_empty());
    let Some(id) = id else {
        return Err(Error::UnknownActor);
    };
    let role = match role.map(str::trim).filter(|s| !s.is_empty()) {
        Some(role) => role.parse()?,
        None => Role::Student,
    };
    Ok(Actor::new(id, role))
}

/// An identity given as optional id and role strings (flags, config files).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialIdentity {
    pub id: Option<String>,
    pub role: Option<String>,
}

impl PartialIdentity {
    pub fn new(id: Option<String>, role: Option<String>) -> Self {
        PartialIdentity { id, role }
    }
}

impl IdentityResolver for PartialIdentity {
    fn current_actor(&self) -> Result<Actor> {
        actor_from_parts(self.id.as_deref(), self.role.as_deref())
    }
}

type Lookup = fn(&str) -> Option<String>;

fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Reads the actor from [`ACTOR_ENV`] and [`ROLE_ENV`].
pub struct EnvIdentity<F = Lookup> {
    lookup: F,
}

impl EnvIdentity {
    /// Reads the real process environment.
    pub fn from_process() -> Self {
        EnvIdentity {
            lookup: process_env,
        }
    }
}

impl<F> EnvIdentity<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Reads variables through `lookup` instead of the process environment.
    pub fn with_lookup(lookup: F) -> Self {
        EnvIdentity { lookup }
    }
}

impl<F> IdentityResolver for EnvIdentity<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn current_actor(&self) -> Result<Actor> {
        let id = (self.lookup)(ACTOR_ENV);
        let role = (self.lookup)(ROLE_ENV);
        actor_from_parts(id.as_deref(), role.as_deref())
    }
}

/// Tries each resolver in turn; the first that knows the actor wins.
///
/// Errors other than [`Error::UnknownActor`] (a malformed role, say) stop
/// the chain.
#[derive(Default)]
pub struct IdentityChain<'a> {
    sources: Vec<Box<dyn IdentityResolver + 'a>>,
}

impl<'a> IdentityChain<'a> {
    pub fn new() -> Self {
        IdentityChain {
            sources: Vec::new(),
        }
    }

    /// Appends a lower-priority source (builder pattern).
    pub fn then(mut self, source: impl IdentityResolver + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }
}

impl IdentityResolver for IdentityChain<'_> {
    fn current_actor(&self) -> Result<Actor> {
        for source in &self.sources {
            match source.current_actor() {
                Err(Error::UnknownActor) => continue,
                other => return other,
            }
        }
        Err(Error::UnknownActor)
    }
}
