//! Thread-safe handle around [`FileCache`]
//!
//! Every operation takes the one mutex for its whole duration, so the list
//! splice and the index update are never observed half done.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::cache::FileCache;
use crate::config::CacheConfig;
use crate::error::Result;
use crate::record::CachedFile;
use crate::stats::StatsSnapshot;

/// Cloneable, lock-protected [`FileCache`]
#[derive(Debug, Clone)]
pub struct SharedFileCache {
    inner: Arc<Mutex<FileCache>>,
}

impl SharedFileCache {
    /// Create a shared cache from a [`CacheConfig`]
    pub fn new(config: CacheConfig) -> Result<Self> {
        Ok(Self::from_cache(FileCache::with_config(config)?))
    }

    /// Wrap an existing cache
    pub fn from_cache(cache: FileCache) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
        }
    }

    /// Insert a new record; see [`FileCache::put`]
    pub fn put(
        &self,
        key: &str,
        content_type: &str,
        payload: &[u8],
    ) -> Result<Option<CachedFile>> {
        self.inner.lock().put(key, content_type, payload)
    }

    /// Look up and promote a record, returning an owned snapshot
    pub fn get(&self, key: &str) -> Option<CachedFile> {
        self.inner.lock().get(key).map(|view| view.to_cached_file())
    }

    /// Return the cached record for `key`, loading and inserting it on a miss
    ///
    /// `load` runs under the lock and yields `(content_type, payload)`. A
    /// loader error is returned as-is and nothing is inserted.
    ///
    /// # Returns
    /// * `Ok((file, true))` - Cache hit
    /// * `Ok((file, false))` - Loaded and inserted
    pub fn get_or_insert_with<F, E>(
        &self,
        key: &str,
        load: F,
    ) -> std::result::Result<(CachedFile, bool), E>
    where
        F: FnOnce() -> std::result::Result<(String, Vec<u8>), E>,
    {
        let mut cache = self.inner.lock();

        if let Some(view) = cache.get(key) {
            return Ok((view.to_cached_file(), true));
        }

        let (content_type, payload) = load()?;
        let file = CachedFile {
            key: key.to_owned(),
            content_type,
            payload: payload.into(),
        };

        // The miss above was observed under this same guard
        let inserted = cache.put(key, &file.content_type, &file.payload);
        debug_assert!(inserted.is_ok(), "key resident after miss: {:?}", inserted);

        Ok((file, false))
    }

    /// Get current number of resident records
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Get cache capacity
    pub fn max_size(&self) -> usize {
        self.inner.lock().max_size()
    }

    /// Snapshot of the cache statistics
    pub fn stats(&self) -> StatsSnapshot {
        self.inner.lock().stats().snapshot()
    }

    /// Run the invariant checker under the lock
    pub fn check_invariants(&self) -> Result<()> {
        self.inner.lock().check_invariants()
    }
}
