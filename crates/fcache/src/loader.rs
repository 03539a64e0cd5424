//! File loading from a document root

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Directory that request paths are resolved against
#[derive(Debug, Clone)]
pub struct DocumentRoot {
    root: PathBuf,
}

impl DocumentRoot {
    /// Create a document root at `root`
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory this root serves from
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Map a request path such as `/css/site.css` to a file under the root
    ///
    /// Paths that would climb out of the root are rejected with
    /// `InvalidInput`.
    pub fn resolve(&self, request_path: &str) -> io::Result<PathBuf> {
        let relative = Path::new(request_path.trim_start_matches('/'));
        let mut resolved = self.root.clone();

        for component in relative.components() {
            match component {
                Component::Normal(part) => resolved.push(part),
                Component::CurDir => {}
                _ => {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("request path escapes document root: {}", request_path),
                    ))
                }
            }
        }

        Ok(resolved)
    }

    /// Read the whole file behind `request_path`
    pub fn load(&self, request_path: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(request_path)?;
        if path.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is a directory", path.display()),
            ));
        }
        fs::read(path)
    }
}
