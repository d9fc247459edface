// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Project configuration management.
//!
//! Configuration is stored in `.fixdesk/config.toml` and includes:
//! - `prefix`: The prefix for issue ids (e.g., "fix" → "fix-a1b2c3d4")
//! - `database`: Optional database path (relative to project root or absolute)
//! - `evidence_dir`: Optional directory for uploaded evidence files
//! - `[actor]`: Optional default identity for this checkout

use fd_core::identity::PartialIdentity;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::id::validate_prefix;

const WORK_DIR_NAME: &str = ".fixdesk";
const CONFIG_FILE_NAME: &str = "config.toml";
const DB_FILE_NAME: &str = "issues.db";
const EVIDENCE_DIR_NAME: &str = "evidence";
const GITIGNORE_FILE_NAME: &str = ".gitignore";

/// Project configuration stored in `.fixdesk/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix for issue ids (2+ lowercase alphanumeric with at least one letter).
    pub prefix: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence_dir: Option<String>,
    /// Used when neither flags nor environment name an actor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actor: Option<ActorConfig>,
}

/// The `[actor]` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActorConfig {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

impl Config {
    /// Creates a new config with the given prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPrefix`] if prefix is not 2+ lowercase alphanumeric with at least one letter.
    pub fn new(prefix: String) -> Result<Self> {
        if !validate_prefix(&prefix) {
            return Err(Error::InvalidPrefix);
        }
        Ok(Config {
            prefix,
            database: None,
            evidence_dir: None,
            actor: None,
        })
    }

    /// Loads configuration from the given `.fixdesk/` directory.
    pub fn load(work_dir: &Path) -> Result<Self> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = fs::read_to_string(&config_path)
            .map_err(|e| Error::Config(format!("failed to read config: {}", e)))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;
        if !validate_prefix(&config.prefix) {
            return Err(Error::InvalidPrefix);
        }
        Ok(config)
    }

    /// Saves configuration to the given `.fixdesk/` directory.
    pub fn save(&self, work_dir: &Path) -> Result<()> {
        let config_path = work_dir.join(CONFIG_FILE_NAME);
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    /// The `[actor]` table as the last link of the identity chain.
    pub fn actor_identity(&self) -> PartialIdentity {
        match &self.actor {
            Some(actor) => PartialIdentity::new(Some(actor.id.clone()), actor.role.clone()),
            None => PartialIdentity::default(),
        }
    }
}

/// Find the .fixdesk directory by walking up from the current directory
pub fn find_work_dir() -> Result<PathBuf> {
    let mut current = std::env::current_dir()?;
    loop {
        let work_dir = current.join(WORK_DIR_NAME);
        if work_dir.is_dir() {
            return Ok(work_dir);
        }
        if !current.pop() {
            return Err(Error::NotInitialized);
        }
    }
}

/// Resolves a configured path against the project root (the parent of `.fixdesk/`).
fn project_path(work_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        work_dir.parent().unwrap_or(work_dir).join(path)
    }
}

/// Get the database path from config
pub fn get_db_path(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.database {
        Some(database) => project_path(work_dir, database),
        None => work_dir.join(DB_FILE_NAME),
    }
}

/// Get the evidence directory from config
pub fn get_evidence_dir(work_dir: &Path, config: &Config) -> PathBuf {
    match &config.evidence_dir {
        Some(dir) => project_path(work_dir, dir),
        None => work_dir.join(EVIDENCE_DIR_NAME),
    }
}

/// Initialize a new .fixdesk directory at the given path
pub fn init_work_dir(path: &Path, prefix: &str) -> Result<PathBuf> {
    let work_dir = path.join(WORK_DIR_NAME);

    if work_dir.join(CONFIG_FILE_NAME).exists() {
        return Err(Error::AlreadyInitialized(work_dir.display().to_string()));
    }

    let config = Config::new(prefix.to_string())?;
    fs::create_dir_all(&work_dir)?;
    config.save(&work_dir)?;
    write_gitignore(&work_dir)?;

    Ok(work_dir)
}

/// Keeps the database and uploaded evidence out of version control.
fn write_gitignore(work_dir: &Path) -> Result<()> {
    let content = format!(
        "# Local database\n{DB_FILE_NAME}\n{DB_FILE_NAME}-*\n\n# Uploaded evidence\n{EVIDENCE_DIR_NAME}/\n"
    );
    fs::write(work_dir.join(GITIGNORE_FILE_NAME), content)?;
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
