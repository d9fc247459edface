// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Filesystem evidence store.
//!
//! Files are stored under their content digest so uploading the same photo
//! twice yields the same URL.

use sha2::{Digest, Sha256};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::store::EvidenceStore;

/// Stores evidence blobs as `{sha256}.{ext}` in one directory.
#[derive(Debug, Clone)]
pub struct FsEvidenceStore {
    root: PathBuf,
}

impl FsEvidenceStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FsEvidenceStore { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads `path` and uploads its contents under its file name.
    pub fn upload_file(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.upload(&name, &bytes)
    }
}

/// Lowercase extension of `file_name`, if it is a plain alphanumeric one.
fn extension(file_name: &str) -> Option<String> {
    let ext = Path::new(file_name).extension()?.to_str()?;
    if ext.is_empty() || ext.len() > 10 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

impl EvidenceStore for FsEvidenceStore {
    fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<String> {
        if bytes.is_empty() {
            return Err(Error::InvalidInput(format!(
                "evidence file '{file_name}' is empty"
            )));
        }

        let digest = hex::encode(Sha256::digest(bytes));
        let stored_name = match extension(file_name) {
            Some(ext) => format!("{digest}.{ext}"),
            None => digest,
        };

        fs::create_dir_all(&self.root)?;
        let root = fs::canonicalize(&self.root)?;
        let target = root.join(&stored_name);
        if !target.exists() {
            fs::write(&target, bytes)?;
            tracing::debug!(file = file_name, stored = %stored_name, "evidence stored");
        }
        Ok(file_url(&target))
    }
}

#[cfg(test)]
#[path = "evidence_tests.rs"]
mod tests;
