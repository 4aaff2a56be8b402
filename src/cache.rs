//! Timed file cache for API responses.
//!
//! One JSON file per API command, stored under a fixed prefix in a configurable
//! directory. An entry is fresh while its mtime is younger than the configured
//! maximum age; the hourly/daily call limits of the remote service make this
//! worthwhile even at a 60 second TTL. No locking: single-process use only.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::Result;

/// Default time-to-live for a cache entry.
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(60);

const CACHE_PREFIX: &str = ".cache_keynoteapi_response_";

/// Single-entry-per-key JSON file cache with mtime-based freshness.
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    max_age: Duration,
}

impl ResponseCache {
    pub fn new(dir: PathBuf, max_age: Duration) -> Self {
        Self { dir, max_age }
    }

    /// Cache in the system temp directory with the default TTL.
    pub fn new_default() -> Self {
        Self::new(std::env::temp_dir(), DEFAULT_MAX_AGE)
    }

    /// Map a command key to its on-disk slot.
    ///
    /// The key is sanitized here so externally influenced command names cannot
    /// escape the cache directory or collide through path separators.
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let mut slot = String::with_capacity(key.len());
        for ch in key.chars() {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                slot.push(ch);
            } else {
                slot.push('-');
            }
        }
        self.dir.join(format!("{CACHE_PREFIX}{slot}"))
    }

    /// Whether a stored entry for `key` exists and is younger than the TTL.
    /// A missing entry is never fresh.
    pub fn is_fresh(&self, key: &str) -> bool {
        let path = self.entry_path(key);
        let Some(modified) = mtime(&path) else {
            debug!(key, "no cache entry");
            return false;
        };
        match SystemTime::now().duration_since(modified) {
            Ok(age) => age < self.max_age,
            // mtime in the future: count as fresh
            Err(_) => true,
        }
    }

    /// Serialize `value` as JSON into the slot for `key`, overwriting any
    /// prior entry.
    pub fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.entry_path(key);
        let encoded = serde_json::to_vec(value)?;
        fs::write(&path, encoded)?;
        debug!(key, path = %path.display(), "cached API response");
        Ok(())
    }

    /// Deserialize the stored entry for `key`. Fails if the entry is absent
    /// or not valid JSON.
    pub fn read<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let raw = fs::read(self.entry_path(key))?;
        Ok(serde_json::from_slice(&raw)?)
    }
}

fn mtime(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).and_then(|meta| meta.modified()).ok()
}
