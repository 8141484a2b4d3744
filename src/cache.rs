//! The durable cache document: activity-id sequence plus record store.
//!
//! Loaded once at process start, mutated in place by each sync cycle, and
//! written back atomically (temp file + rename) so a crash never leaves a
//! half-written cache behind.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{RecordId, RecordMap};

/// Process-durable sync state.
///
/// `activity_ids` is the reconciled remote ordering, newest first, with no
/// duplicates; `records` is everything learned so far.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityCache {
    pub activity_ids: Vec<RecordId>,
    pub records: RecordMap,
}

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("failed to read cache {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The cache exists but does not parse. Fatal by policy: syncing on top
    /// of state we could not read would overwrite it on the next save.
    #[error("cache {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write cache {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Load the cache document. An absent file is a normal first run and yields
/// the empty state; anything else that goes wrong is an error.
pub fn load(path: &Path) -> Result<ActivityCache, CacheError> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "no cache yet, starting empty");
            return Ok(ActivityCache::default());
        }
        Err(e) => {
            return Err(CacheError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    serde_json::from_slice(&bytes).map_err(|e| CacheError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the cache document atomically next to its final location.
pub fn save(path: &Path, cache: &ActivityCache) -> Result<(), CacheError> {
    let write_err = |source: io::Error| CacheError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = path
        .parent()
        .ok_or_else(|| write_err(io::Error::other("cache path has no parent directory")))?;
    fs::create_dir_all(dir).map_err(write_err)?;

    let payload = serde_json::to_vec(cache).map_err(|e| CacheError::Write {
        path: path.to_path_buf(),
        source: io::Error::other(e),
    })?;

    let temp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    fs::write(temp.path(), payload).map_err(write_err)?;
    temp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
