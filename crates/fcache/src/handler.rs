//! Request handler: cache lookup with disk fallback

use std::io;

use anyhow::{Context, Result};
use bytes::Bytes;
use filecache::FileCache;
use tracing::debug;

use crate::loader::DocumentRoot;
use crate::mime;

/// Response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    NotFound,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::NotFound => 404,
        }
    }
}

/// Where a response body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Disk,
}

/// One served request
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: Status,
    pub content_type: String,
    pub body: Bytes,
    pub source: Source,
}

pub struct RequestHandler {
    cache: FileCache,
    root: DocumentRoot,
    files: DocumentRoot,
}

impl RequestHandler {
    pub fn new(cache: FileCache, root: DocumentRoot, files: DocumentRoot) -> Self {
        Self { cache, root, files }
    }

    pub fn cache(&self) -> &FileCache {
        &self.cache
    }

    /// Serve `request_path` from the cache, loading and caching it on a miss
    pub fn handle(&mut self, request_path: &str) -> Result<Response> {
        if let Some(view) = self.cache.get(request_path) {
            debug!(path = request_path, len = view.len(), "cache hit");
            let file = view.to_cached_file();
            return Ok(Response {
                status: Status::Ok,
                content_type: file.content_type,
                body: file.payload,
                source: Source::Cache,
            });
        }

        let data = match self.root.load(request_path) {
            Ok(data) => data,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = request_path, "not found");
                return self.not_found();
            }
            Err(err) => {
                return Err(err).with_context(|| format!("loading {}", request_path));
            }
        };

        let content_type = mime::content_type_for(request_path);
        debug!(
            path = request_path,
            len = data.len(),
            content_type,
            "cache miss, loaded from disk"
        );

        if let Some(evicted) = self.cache.put(request_path, content_type, &data)? {
            debug!(path = %evicted.key, "evicted");
        }

        Ok(Response {
            status: Status::Ok,
            content_type: content_type.to_string(),
            body: data.into(),
            source: Source::Disk,
        })
    }

    /// The 404 page is served from disk every time and never cached
    fn not_found(&self) -> Result<Response> {
        let body = self.files.load("/404.html").with_context(|| {
            format!("cannot find 404 page in {}", self.files.path().display())
        })?;

        Ok(Response {
            status: Status::NotFound,
            content_type: mime::content_type_for("404.html").to_string(),
            body: body.into(),
            source: Source::Disk,
        })
    }

    /// Tear down the cache, returning how many records it released
    pub fn shutdown(self) -> usize {
        self.cache.destroy()
    }
}
