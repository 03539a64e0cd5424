//! Recency list for the LRU cache
//!
//! Records live in an arena of slots and are linked by [`RecordHandle`]
//! rather than by pointer, so splicing stays O(1) without any shared
//! ownership. Head is the most recently used record, tail the least.

use crate::record::{CacheRecord, RecordHandle};

/// Arena slot; the generation is bumped every time the slot is released
#[derive(Debug)]
struct Slot {
    generation: u32,
    record: Option<CacheRecord>,
}

/// Doubly-linked recency list backed by a slot arena
#[derive(Debug)]
pub(crate) struct LruList {
    slots: Vec<Slot>,
    free_list: Vec<usize>,
    head: Option<RecordHandle>,
    tail: Option<RecordHandle>,
    len: usize,
}

impl LruList {
    /// Create an empty list with room for `capacity` records
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn head(&self) -> Option<RecordHandle> {
        self.head
    }

    pub(crate) fn tail(&self) -> Option<RecordHandle> {
        self.tail
    }

    /// Number of slots ever allocated (live or free)
    pub(crate) fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Resolve a handle; stale handles resolve to `None`
    pub(crate) fn get(&self, handle: RecordHandle) -> Option<&CacheRecord> {
        let slot = self.slots.get(handle.slot())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.record.as_ref()
    }

    fn get_mut(&mut self, handle: RecordHandle) -> Option<&mut CacheRecord> {
        let slot = self.slots.get_mut(handle.slot())?;
        if slot.generation != handle.generation() {
            return None;
        }
        slot.record.as_mut()
    }

    /// Insert a record at the head, returning its handle
    pub(crate) fn push_front(&mut self, mut record: CacheRecord) -> RecordHandle {
        record.prev = None;
        record.next = self.head;

        let handle = self.alloc(record);

        match self.head {
            Some(old_head) => {
                if let Some(node) = self.get_mut(old_head) {
                    node.prev = Some(handle);
                }
            }
            None => self.tail = Some(handle),
        }

        self.head = Some(handle);
        self.len += 1;
        handle
    }

    /// Promote a resident record to the head
    pub(crate) fn move_to_front(&mut self, handle: RecordHandle) {
        if self.head == Some(handle) {
            return;
        }

        let (prev, next) = match self.get(handle) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        if self.tail == Some(handle) {
            self.tail = prev;
            if let Some(prev) = prev {
                if let Some(node) = self.get_mut(prev) {
                    node.next = None;
                }
            }
        } else {
            if let Some(prev) = prev {
                if let Some(node) = self.get_mut(prev) {
                    node.next = next;
                }
            }
            if let Some(next) = next {
                if let Some(node) = self.get_mut(next) {
                    node.prev = prev;
                }
            }
        }

        let old_head = self.head;
        if let Some(node) = self.get_mut(handle) {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(old_head) = old_head {
            if let Some(node) = self.get_mut(old_head) {
                node.prev = Some(handle);
            }
        }

        self.head = Some(handle);
    }

    /// Detach and return the tail (least recently used) record
    pub(crate) fn pop_back(&mut self) -> Option<CacheRecord> {
        let tail = self.tail?;
        let record = self.release(tail)?;

        self.tail = record.prev;
        match record.prev {
            Some(prev) => {
                if let Some(node) = self.get_mut(prev) {
                    node.next = None;
                }
            }
            None => self.head = None,
        }

        Some(record)
    }

    /// Release every record from head to tail, returning how many were released
    pub(crate) fn clear(&mut self) -> usize {
        let mut released = 0;
        let mut cursor = self.head;

        while let Some(handle) = cursor {
            cursor = match self.release(handle) {
                Some(record) => {
                    released += 1;
                    record.next
                }
                None => None,
            };
        }

        self.head = None;
        self.tail = None;
        released
    }

    /// Iterate from head (most recent) to tail (least recent)
    pub(crate) fn iter(&self) -> Iter<'_> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    fn alloc(&mut self, record: CacheRecord) -> RecordHandle {
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx];
            slot.record = Some(record);
            RecordHandle::new(idx, slot.generation)
        } else {
            let idx = self.slots.len();
            self.slots.push(Slot {
                generation: 0,
                record: Some(record),
            });
            RecordHandle::new(idx, 0)
        }
    }

    /// Take a record out of its slot without touching neighbour links
    fn release(&mut self, handle: RecordHandle) -> Option<CacheRecord> {
        let slot = self.slots.get_mut(handle.slot())?;
        if slot.generation != handle.generation() {
            return None;
        }

        let record = slot.record.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(handle.slot());
        self.len -= 1;
        Some(record)
    }
}

/// Head-to-tail iterator over resident records
pub(crate) struct Iter<'a> {
    list: &'a LruList,
    cursor: Option<RecordHandle>,
    remaining: usize,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (RecordHandle, &'a CacheRecord);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.cursor?;
        let record = self.list.get(handle)?;
        self.cursor = record.next;
        self.remaining -= 1;
        Some((handle, record))
    }
}
