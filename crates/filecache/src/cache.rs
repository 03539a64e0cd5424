//! FileCache: fixed-capacity LRU cache of file contents

use std::collections::HashSet;

use crate::config::CacheConfig;
use crate::error::{Error, Result};
use crate::index::HashIndex;
use crate::lru::LruList;
use crate::record::{CacheRecord, CachedFile, RecordView};
use crate::stats::{CacheStats, Counter};

/// LRU cache mapping a key to a content type and payload
///
/// The recency list owns every record; the hash index only holds handles
/// into it. Both are updated together by every mutating call.
#[derive(Debug)]
pub struct FileCache {
    /// Recency ordered records (owner)
    list: LruList,

    /// Key lookup (non-owning)
    index: HashIndex,

    /// Maximum number of resident records
    max_size: usize,

    /// Cache statistics
    stats: CacheStats,
}

impl FileCache {
    /// Create an empty cache
    ///
    /// # Arguments
    /// * `max_size` - Maximum number of resident records, at least 1
    /// * `hash_hint` - Index sizing hint, 0 for the default
    ///
    /// # Returns
    /// * `Result<FileCache>` - `Error::InvalidCapacity` if `max_size` is 0
    pub fn new(max_size: usize, hash_hint: usize) -> Result<Self> {
        Self::with_config(CacheConfig {
            max_size,
            hash_hint,
        })
    }

    /// Create an empty cache from a [`CacheConfig`]
    pub fn with_config(config: CacheConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            list: LruList::with_capacity(config.max_size),
            index: HashIndex::new(config.hash_hint),
            max_size: config.max_size,
            stats: CacheStats::new(),
        })
    }

    /// Insert a new record at the most-recently-used position
    ///
    /// The key, content type and payload are copied, so the caller may
    /// reuse its buffers afterwards. If the insert pushes the cache over
    /// capacity the least recently used record is evicted and returned.
    ///
    /// # Returns
    /// * `Ok(None)` - Inserted without eviction
    /// * `Ok(Some(file))` - Inserted, `file` was evicted
    /// * `Err(Error::DuplicateKey)` - Key already resident, cache untouched
    pub fn put(
        &mut self,
        key: &str,
        content_type: &str,
        payload: &[u8],
    ) -> Result<Option<CachedFile>> {
        if self.index.contains(key) {
            return Err(Error::DuplicateKey(key.to_owned()));
        }

        let handle = self
            .list
            .push_front(CacheRecord::new(key, content_type, payload));
        self.index.put(key, handle);
        self.stats.record(Counter::Insert);

        // One insert can overflow by at most one record
        if self.list.len() > self.max_size {
            if let Some(evicted) = self.list.pop_back() {
                self.index.delete(&evicted.key);
                self.stats.record(Counter::Eviction);
                return Ok(Some(evicted.into_cached_file()));
            }
        }

        Ok(None)
    }

    /// Look up a record and promote it to most recently used
    ///
    /// A miss leaves the cache unchanged.
    pub fn get(&mut self, key: &str) -> Option<RecordView<'_>> {
        let Some(handle) = self.index.get(key) else {
            self.stats.record(Counter::Miss);
            return None;
        };

        self.list.move_to_front(handle);
        self.stats.record(Counter::Hit);
        self.list.get(handle).map(RecordView::new)
    }

    /// Look up a record without touching recency or statistics
    pub fn peek(&self, key: &str) -> Option<RecordView<'_>> {
        let handle = self.index.get(key)?;
        self.list.get(handle).map(RecordView::new)
    }

    /// Check whether `key` is resident
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains(key)
    }

    /// Get current number of resident records
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.list.len() == 0
    }

    /// Get cache capacity
    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Get cache statistics
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Keys from most to least recently used
    pub fn keys_by_recency(&self) -> Vec<&str> {
        self.list.iter().map(|(_, record)| record.key.as_str()).collect()
    }

    /// Tear the cache down, returning the number of records released
    ///
    /// The index goes first, then the records from head to tail.
    pub fn destroy(self) -> usize {
        let FileCache {
            mut list, index, ..
        } = self;

        index.destroy();
        list.clear()
    }

    /// Verify that the recency list and the index agree
    ///
    /// Walks the list in both directions and cross-checks every key
    /// against the index. Returns the first violation found.
    pub fn check_invariants(&self) -> Result<()> {
        let corrupted = |msg: String| Err(Error::Corrupted(msg));

        if self.list.len() > self.max_size {
            return corrupted(format!(
                "size {} exceeds capacity {}",
                self.list.len(),
                self.max_size
            ));
        }
        if self.list.len() != self.index.len() {
            return corrupted(format!(
                "list holds {} records but index holds {}",
                self.list.len(),
                self.index.len()
            ));
        }

        if let Some(head) = self.list.head() {
            match self.list.get(head) {
                Some(record) if record.prev.is_none() => {}
                Some(_) => return corrupted("head has a previous link".to_string()),
                None => return corrupted("head handle is stale".to_string()),
            }
        }

        let mut seen = HashSet::new();
        let mut previous = None;
        let mut cursor = self.list.head();
        let limit = self.list.slot_count();

        while let Some(handle) = cursor {
            if seen.len() > limit {
                return corrupted("cycle in recency list".to_string());
            }

            let Some(record) = self.list.get(handle) else {
                return corrupted(format!("stale link {:?}", handle));
            };
            if record.prev != previous {
                return corrupted(format!("broken back link at {:?}", record.key));
            }
            if !seen.insert(record.key.as_str()) {
                return corrupted(format!("duplicate key {:?}", record.key));
            }
            if self.index.get(&record.key) != Some(handle) {
                return corrupted(format!("index disagrees on {:?}", record.key));
            }

            previous = Some(handle);
            cursor = record.next;
        }

        if previous != self.list.tail() {
            return corrupted("forward walk does not end at tail".to_string());
        }
        if seen.len() != self.list.len() {
            return corrupted(format!(
                "walked {} records but size is {}",
                seen.len(),
                self.list.len()
            ));
        }
        if let Some(key) = self.index.keys().find(|key| !seen.contains(key)) {
            return corrupted(format!("index key {:?} not in list", key));
        }

        Ok(())
    }
}
