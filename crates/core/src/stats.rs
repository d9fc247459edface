// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution-time reporting.
//!
//! Only issues that completed dual confirmation (status `resolved`) count
//! toward total resolution time. Force-closed issues are counted separately
//! and never contribute a resolution time. The administrator's share is
//! reported on its own and never mixed into the total.

use serde::Serialize;

use crate::issue::{Issue, Status};
use crate::resolution::{admin_resolution_time, total_resolution_time};

/// Aggregate resolution figures over a set of issues.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResolutionStats {
    pub total: usize,
    pub open: usize,
    pub resolved: usize,
    /// Closed without student confirmation.
    pub closed: usize,
    /// Mean of `student_confirmation_time - created_at`, resolved issues only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_resolution_secs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median_resolution_secs: Option<i64>,
    /// Mean of `admin_resolution_time - created_at` over every issue with an
    /// administrator claim, whatever happened next.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_admin_resolution_secs: Option<i64>,
}

fn mean(values: &[i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    let len = i64::try_from(values.len()).ok()?;
    Some(values.iter().sum::<i64>() / len)
}

fn median(values: &mut [i64]) -> Option<i64> {
    if values.is_empty() {
        return None;
    }
    values.sort_unstable();
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        Some((values[mid - 1] + values[mid]) / 2)
    } else {
        Some(values[mid])
    }
}

impl ResolutionStats {
    pub fn compute(issues: &[Issue]) -> Self {
        let mut stats = ResolutionStats {
            total: issues.len(),
            ..Default::default()
        };
        let mut totals = Vec::new();
        let mut admin = Vec::new();

        for issue in issues {
            match issue.status {
                Status::Resolved => stats.resolved += 1,
                Status::Closed => stats.closed += 1,
                _ => stats.open += 1,
            }
            if let Some(duration) = total_resolution_time(issue) {
                totals.push(duration.num_seconds());
            }
            if let Some(duration) = admin_resolution_time(issue) {
                admin.push(duration.num_seconds());
            }
        }

        stats.mean_resolution_secs = mean(&totals);
        stats.median_resolution_secs = median(&mut totals);
        stats.mean_admin_resolution_secs = mean(&admin);
        stats
    }
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
