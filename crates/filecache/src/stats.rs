//! Cache statistics tracking

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Event counted by [`CacheStats`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Counter {
    Hit,
    Miss,
    Insert,
    Eviction,
}

impl Counter {
    const COUNT: usize = 4;
}

/// Hit/miss/insert/eviction counters
///
/// Purely observational; the cache never reads them back.
#[derive(Debug, Default)]
pub struct CacheStats {
    counters: [AtomicU64; Counter::COUNT],
}

impl CacheStats {
    /// Create new stats tracker
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&self, counter: Counter) {
        self.counters[counter as usize].fetch_add(1, Ordering::Relaxed);
    }

    fn load(&self, counter: Counter) -> u64 {
        self.counters[counter as usize].load(Ordering::Relaxed)
    }

    /// Lookups that found a resident record
    pub fn hits(&self) -> u64 {
        self.load(Counter::Hit)
    }

    /// Lookups that found nothing
    pub fn misses(&self) -> u64 {
        self.load(Counter::Miss)
    }

    /// Successful inserts
    pub fn inserts(&self) -> u64 {
        self.load(Counter::Insert)
    }

    /// Records evicted on overflow
    pub fn evictions(&self) -> u64 {
        self.load(Counter::Eviction)
    }

    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        self.snapshot().hit_ratio()
    }

    /// Copy the current counters into a plain value
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hits: self.hits(),
            misses: self.misses(),
            inserts: self.inserts(),
            evictions: self.evictions(),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in &self.counters {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time copy of [`CacheStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Lookups that found a resident record
    pub hits: u64,
    /// Lookups that found nothing
    pub misses: u64,
    /// Successful inserts
    pub inserts: u64,
    /// Records evicted on overflow
    pub evictions: u64,
}

impl StatsSnapshot {
    /// Calculate hit ratio (0.0 to 1.0)
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hits={} misses={} inserts={} evictions={} hit_ratio={:.2}",
            self.hits,
            self.misses,
            self.inserts,
            self.evictions,
            self.hit_ratio()
        )
    }
}
