//! Process-wide memo of loaded tables, keyed by file identity.
//!
//! A key combines the dataset kind, the canonical path and the file's
//! modification signature (mtime and length). Editing a file therefore
//! yields a new key and a fresh load; stale entries for the same path are
//! dropped when that happens. Entries can also be evicted by hand with
//! [`DatasetCache::invalidate`] and [`DatasetCache::clear`].

use log::debug;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::SystemTime;

use crate::core::error::{DashboardError, Result};
use crate::core::types::DatasetKind;
use crate::data::table::Table;

static GLOBAL_CACHE: Lazy<DatasetCache> = Lazy::new(DatasetCache::default);

/// Identity of one loaded file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub kind: DatasetKind,
    pub path: PathBuf,
    pub modified: Option<SystemTime>,
    pub len: u64,
}

impl CacheKey {
    /// Build the key for `path` from its current metadata.
    pub fn for_file(kind: DatasetKind, path: &Path) -> Result<Self> {
        let canonical = fs::canonicalize(path)
            .map_err(|_| DashboardError::FileNotFound(path.display().to_string()))?;
        let metadata = fs::metadata(&canonical)?;

        Ok(Self {
            kind,
            path: canonical,
            modified: metadata.modified().ok(),
            len: metadata.len(),
        })
    }
}

/// Hit/miss counters, mostly useful for logging and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

#[derive(Debug, Default)]
struct CacheState {
    entries: FxHashMap<CacheKey, Arc<Table>>,
    hits: u64,
    misses: u64,
}

#[derive(Debug, Default)]
pub struct DatasetCache {
    state: Mutex<CacheState>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cache shared by every render in this process
    pub fn global() -> &'static DatasetCache {
        &GLOBAL_CACHE
    }

    fn lock(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Return the cached table for `key`, or run `load` and remember its result.
    ///
    /// Failed loads are not cached.
    pub fn get_or_load<F>(&self, key: CacheKey, load: F) -> Result<Arc<Table>>
    where
        F: FnOnce() -> Result<Table>,
    {
        {
            let mut state = self.lock();
            if let Some(table) = state.entries.get(&key).cloned() {
                state.hits += 1;
                debug!("Cache hit for {} ({})", key.kind, key.path.display());
                return Ok(table);
            }
            state.misses += 1;
        }

        debug!("Cache miss for {} ({})", key.kind, key.path.display());
        let table = Arc::new(load()?);

        let mut state = self.lock();
        state
            .entries
            .retain(|existing, _| !(existing.kind == key.kind && existing.path == key.path));
        let table = state.entries.entry(key).or_insert(table).clone();
        Ok(table)
    }

    /// Drop every entry loaded from `path`. Returns how many were removed.
    pub fn invalidate(&self, path: &Path) -> usize {
        let target = fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
        let mut state = self.lock();
        let before = state.entries.len();
        state.entries.retain(|key, _| key.path != target);
        before - state.entries.len()
    }

    pub fn clear(&self) {
        self.lock().entries.clear();
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> CacheStats {
        let state = self.lock();
        CacheStats {
            hits: state.hits,
            misses: state.misses,
            entries: state.entries.len(),
        }
    }
}
