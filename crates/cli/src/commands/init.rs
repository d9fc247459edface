// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use fd_core::Database;

use crate::config::{get_db_path, init_work_dir, Config};
use crate::error::Result;

pub fn run(prefix: String) -> Result<()> {
    let target_path = std::env::current_dir()?;
    run_impl(&target_path, &prefix)
}

/// Internal implementation that accepts the target directory for testing.
pub(crate) fn run_impl(target_path: &Path, prefix: &str) -> Result<()> {
    let work_dir = init_work_dir(target_path, prefix)?;

    let config = Config::load(&work_dir)?;
    Database::open(&get_db_path(&work_dir, &config))?;
    tracing::info!(work_dir = %work_dir.display(), prefix, "initialized");

    println!("Initialized fixdesk at {}", work_dir.display());
    println!("Prefix: {}", prefix);
    Ok(())
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
