//! Hash index from key to record handle
//!
//! The index only ever stores [`RecordHandle`]s. Handles are `Copy` and
//! carry no ownership, so dropping or clearing the index can never release
//! a record; that is the job of the recency list that minted them.

use std::collections::HashMap;

use ahash::RandomState;

use crate::record::RecordHandle;

/// Bucket count used when the caller passes a capacity hint of 0
pub(crate) const DEFAULT_CAPACITY_HINT: usize = 128;

/// Key -> handle mapping with O(1) expected lookup
#[derive(Debug)]
pub(crate) struct HashIndex {
    map: HashMap<String, RecordHandle, RandomState>,
}

impl HashIndex {
    /// Create an index sized for `capacity_hint` entries (0 selects the default)
    pub(crate) fn new(capacity_hint: usize) -> Self {
        let capacity = if capacity_hint == 0 {
            DEFAULT_CAPACITY_HINT
        } else {
            capacity_hint
        };

        Self {
            map: HashMap::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }

    /// Insert or overwrite the mapping for `key`
    pub(crate) fn put(&mut self, key: &str, handle: RecordHandle) {
        self.map.insert(key.to_owned(), handle);
    }

    /// Look up the handle registered for `key`
    pub(crate) fn get(&self, key: &str) -> Option<RecordHandle> {
        self.map.get(key).copied()
    }

    /// Remove the mapping for `key`
    ///
    /// Callers only delete keys they know are present.
    pub(crate) fn delete(&mut self, key: &str) {
        let removed = self.map.remove(key);
        debug_assert!(removed.is_some(), "deleted absent key {:?}", key);
    }

    /// Whether `key` has a mapping
    pub(crate) fn contains(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Number of mappings
    pub(crate) fn len(&self) -> usize {
        self.map.len()
    }

    /// Iterate over all keys in unspecified order
    pub(crate) fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.map.keys().map(String::as_str)
    }

    /// Release index storage, returning how many mappings were dropped
    ///
    /// Records referenced by the dropped handles are untouched.
    pub(crate) fn destroy(self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_put_get() {
        let mut index = HashIndex::new(0);
        let handle = RecordHandle::new(3, 1);

        index.put("/a.html", handle);

        assert_eq!(index.get("/a.html"), Some(handle));
        assert_eq!(index.get("/b.html"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_index_overwrite() {
        let mut index = HashIndex::new(4);

        index.put("/a.html", RecordHandle::new(0, 0));
        index.put("/a.html", RecordHandle::new(5, 2));

        assert_eq!(index.get("/a.html"), Some(RecordHandle::new(5, 2)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_index_delete() {
        let mut index = HashIndex::new(0);

        index.put("/a.html", RecordHandle::new(0, 0));
        index.put("/b.html", RecordHandle::new(1, 0));
        index.delete("/a.html");

        assert!(!index.contains("/a.html"));
        assert!(index.contains("/b.html"));
        assert_eq!(index.destroy(), 1);
    }

    #[test]
    fn test_index_default_hint() {
        let index = HashIndex::new(0);
        assert!(index.map.capacity() >= DEFAULT_CAPACITY_HINT);
        assert_eq!(index.len(), 0);
    }
}
