//! # filecache
//!
//! Fixed-capacity LRU cache mapping a path-like key to a content type and
//! an immutable byte payload.
//!
//! ## Architecture
//! - **Recency list**: arena of records linked by generational handles (O(1) splice)
//! - **Hash index**: AHash map from key to handle (O(1) lookup, never owns records)
//! - **FileCache**: keeps list and index in step on every `put`/`get`
//! - **SharedFileCache**: single-mutex wrapper for multi-threaded callers
//!
//! ```
//! use filecache::FileCache;
//!
//! let mut cache = FileCache::new(2, 0).unwrap();
//! cache.put("/index.html", "text/html", b"<h1>hi</h1>").unwrap();
//!
//! let page = cache.get("/index.html").unwrap();
//! assert_eq!(page.content_type(), "text/html");
//! assert_eq!(page.len(), 11);
//! ```
//!
//! Record handles and the hash index are internal; callers only ever see
//! keys and views.
//!
//! ```compile_fail
//! use filecache::HashIndex;
//! ```
//!
//! ```compile_fail
//! use filecache::RecordHandle;
//! ```

#![warn(missing_docs)]

mod cache;
mod config;
mod error;
mod index;
mod lru;
mod record;
mod shared;
mod stats;

pub use cache::FileCache;
pub use config::{CacheConfig, DEFAULT_MAX_SIZE};
pub use error::{Error, Result};
pub use record::{CachedFile, RecordView};
pub use shared::SharedFileCache;
pub use stats::{CacheStats, StatsSnapshot};
