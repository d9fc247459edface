// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Wall clock abstraction for lifecycle timestamps.
//!
//! Every timestamp the engine stamps (`created_at`, status events,
//! confirmation times, notifications) comes from a [`Clock`] so tests can
//! inject a deterministic one.

use chrono::{DateTime, Duration, Utc};
use std::sync::Mutex;

/// Source of the current wall clock time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// System clock implementation using [`Utc::now`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

impl<C: Clock> Clock for &C {
    fn now(&self) -> DateTime<Utc> {
        (*self).now()
    }
}

/// A manually driven clock.
///
/// Each call to [`Clock::now`] returns the current reading and then moves
/// the clock forward by `step`. A zero step freezes time.
#[derive(Debug)]
pub struct ManualClock {
    current: Mutex<DateTime<Utc>>,
    step: Duration,
}

impl ManualClock {
    /// Creates a frozen clock at `start`.
    pub fn new(start: DateTime<Utc>) -> Self {
        Self::with_step(start, Duration::zero())
    }

    /// Creates a clock at `start` that advances by `step` on every reading.
    pub fn with_step(start: DateTime<Utc>, step: Duration) -> Self {
        ManualClock {
            current: Mutex::new(start),
            step,
        }
    }

    /// Moves the clock forward without taking a reading.
    pub fn advance(&self, by: Duration) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        *current += by;
    }

    /// Returns the next reading without advancing.
    pub fn peek(&self) -> DateTime<Utc> {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        let reading = *current;
        *current += self.step;
        reading
    }
}

#[cfg(test)]
#[path = "clock_tests.rs"]
mod tests;
