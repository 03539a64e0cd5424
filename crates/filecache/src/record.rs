//! Cache records, handles and views

use bytes::Bytes;

/// Stable, non-owning reference to a record slot in the recency list
///
/// A handle is only ever minted by the list that owns the slot. The
/// generation changes every time the slot is released, so a handle kept
/// past eviction resolves to nothing instead of to whichever record
/// reused the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct RecordHandle {
    slot: usize,
    generation: u32,
}

impl RecordHandle {
    pub(crate) fn new(slot: usize, generation: u32) -> Self {
        Self { slot, generation }
    }

    pub(crate) fn slot(self) -> usize {
        self.slot
    }

    pub(crate) fn generation(self) -> u32 {
        self.generation
    }
}

/// One resident cache entry
///
/// Key, content type and payload are fixed at creation; only the
/// recency links move.
#[derive(Debug)]
pub(crate) struct CacheRecord {
    pub(crate) key: String,
    pub(crate) content_type: String,
    pub(crate) payload: Bytes,
    pub(crate) prev: Option<RecordHandle>,
    pub(crate) next: Option<RecordHandle>,
}

impl CacheRecord {
    /// Copy caller data into a new unlinked record
    pub(crate) fn new(key: &str, content_type: &str, payload: &[u8]) -> Self {
        Self {
            key: key.to_owned(),
            content_type: content_type.to_owned(),
            payload: Bytes::copy_from_slice(payload),
            prev: None,
            next: None,
        }
    }

    pub(crate) fn into_cached_file(self) -> CachedFile {
        CachedFile {
            key: self.key,
            content_type: self.content_type,
            payload: self.payload,
        }
    }
}

/// Read-only view of a resident record
///
/// Borrows the cache, so it cannot outlive the record's residence.
#[derive(Debug, Clone, Copy)]
pub struct RecordView<'a> {
    record: &'a CacheRecord,
}

impl<'a> RecordView<'a> {
    pub(crate) fn new(record: &'a CacheRecord) -> Self {
        Self { record }
    }

    /// Key the record is stored under
    pub fn key(&self) -> &'a str {
        &self.record.key
    }

    /// Content-type tag supplied at insertion
    pub fn content_type(&self) -> &'a str {
        &self.record.content_type
    }

    /// Payload bytes
    pub fn payload(&self) -> &'a [u8] {
        &self.record.payload
    }

    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.record.payload.len()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.record.payload.is_empty()
    }

    /// Owned snapshot of the record (the payload is shared, not copied)
    pub fn to_cached_file(&self) -> CachedFile {
        CachedFile {
            key: self.record.key.clone(),
            content_type: self.record.content_type.clone(),
            payload: self.record.payload.clone(),
        }
    }
}

/// Owned snapshot of a record
///
/// Returned by the shared cache and for records evicted by `put`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedFile {
    /// Key the record was stored under
    pub key: String,
    /// Content-type tag
    pub content_type: String,
    /// Payload bytes
    pub payload: Bytes,
}

impl CachedFile {
    /// Payload length in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Check if the payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
