//! Persistent storage for the last display value.

use super::types::CacheEntry;
use crate::usage_paths;
use anyhow::{Context, Result};
use std::path::PathBuf;

/// Storage for the single cache entry shared by all lookups.
pub trait CacheStore {
    /// Returns `Ok(None)` when nothing has been written yet.
    fn read_entry(&self) -> Result<Option<CacheEntry>>;

    /// Replaces the stored value; the entry's timestamp becomes "now".
    fn write_entry(&self, value: &str) -> Result<()>;
}

/// Plain-text cache file whose mtime is the entry timestamp.
///
/// Writes go straight to the file without locking or a rename step, so
/// concurrent invocations race and the last writer wins.
pub struct FileCacheStore {
    path: PathBuf,
}

impl FileCacheStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The host-wide cache file for `kind`.
    pub fn at_default_location(kind: &str) -> Self {
        Self::new(usage_paths::cache_file_path(kind))
    }
}

impl CacheStore for FileCacheStore {
    fn read_entry(&self) -> Result<Option<CacheEntry>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let modified = std::fs::metadata(&self.path)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to stat cache file: {}", self.path.display()))?;
        let value = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read cache file: {}", self.path.display()))?;

        Ok(Some(CacheEntry { value, modified }))
    }

    fn write_entry(&self, value: &str) -> Result<()> {
        std::fs::write(&self.path, value)
            .with_context(|| format!("Failed to write cache file: {}", self.path.display()))
    }
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
