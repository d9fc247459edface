// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use chrono::{DateTime, SecondsFormat, Utc};
use sha2::{Digest, Sha256};

/// Number of digest bytes kept in an issue id (8 hex chars).
const HASH_BYTES: usize = 4;

/// Derive an issue id from the report's title, reporter and time.
///
/// Format: `{prefix}-{hash}` where hash is the first 8 hex chars of
/// SHA256(title, creator, created_at).
pub fn generate_id(
    prefix: &str,
    title: &str,
    creator_id: &str,
    created_at: &DateTime<Utc>,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update([0u8]);
    hasher.update(creator_id.as_bytes());
    hasher.update([0u8]);
    hasher.update(created_at.to_rfc3339_opts(SecondsFormat::Nanos, true).as_bytes());
    let digest = hasher.finalize();
    format!("{}-{}", prefix, hex::encode(&digest[..HASH_BYTES]))
}

/// Like [`generate_id`], appending `-2`, `-3`, ... until `exists` says the id is free.
pub fn generate_unique_id<F>(
    prefix: &str,
    title: &str,
    creator_id: &str,
    created_at: &DateTime<Utc>,
    exists: F,
) -> Result<String, fd_core::Error>
where
    F: Fn(&str) -> Result<bool, fd_core::Error>,
{
    let base_id = generate_id(prefix, title, creator_id, created_at);
    if !exists(&base_id)? {
        return Ok(base_id);
    }

    let mut suffix = 2u32;
    loop {
        let id = format!("{}-{}", base_id, suffix);
        if !exists(&id)? {
            return Ok(id);
        }
        suffix += 1;
    }
}

/// Validate that a prefix is valid (2+ lowercase alphanumeric with at least one letter)
pub fn validate_prefix(prefix: &str) -> bool {
    prefix.len() >= 2
        && prefix
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && prefix.chars().any(|c| c.is_ascii_lowercase())
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
