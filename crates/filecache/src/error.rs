//! Error types for filecache

use std::fmt;

/// Result type alias for filecache operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for cache operations
///
/// A lookup miss is not an error; `get` reports it as `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cache was constructed with a capacity of zero
    InvalidCapacity(usize),

    /// Key is already resident in the cache
    DuplicateKey(String),

    /// List and index disagree (reported by the invariant checker)
    Corrupted(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidCapacity(size) => {
                write!(f, "Invalid capacity: {} (must be at least 1)", size)
            }
            Error::DuplicateKey(key) => write!(f, "Duplicate key: {}", key),
            Error::Corrupted(msg) => write!(f, "Cache corrupted: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::InvalidCapacity(0).to_string(),
            "Invalid capacity: 0 (must be at least 1)"
        );
        assert_eq!(
            Error::DuplicateKey("/index.html".to_string()).to_string(),
            "Duplicate key: /index.html"
        );
    }
}
