//! Cache construction parameters

use crate::error::{Error, Result};

/// Default maximum number of resident records
pub const DEFAULT_MAX_SIZE: usize = 10;

/// Parameters for building a [`FileCache`](crate::FileCache)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident records (must be at least 1)
    pub max_size: usize,
    /// Hash index sizing hint; 0 picks the index default
    pub hash_hint: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_SIZE,
            hash_hint: 0,
        }
    }
}

impl CacheConfig {
    /// Set the maximum number of resident records
    pub fn with_max_size(mut self, max_size: usize) -> Self {
        self.max_size = max_size;
        self
    }

    /// Set the hash index sizing hint
    pub fn with_hash_hint(mut self, hash_hint: usize) -> Self {
        self.hash_hint = hash_hint;
        self
    }

    /// Reject configurations the cache cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.max_size == 0 {
            return Err(Error::InvalidCapacity(self.max_size));
        }
        Ok(())
    }
}
