//! fcache - serve files from a document root through an LRU cache

mod config;
mod handler;
mod loader;
mod mime;
mod output;

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use filecache::FileCache;
use tracing::{debug, info, warn};

use crate::config::{Args, Settings};
use crate::handler::RequestHandler;
use crate::loader::DocumentRoot;

fn main() -> Result<()> {
    // Initialize tracing; stdout is reserved for responses
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let settings = Settings::from_args(&args)?;

    info!("Starting fcache v{}", env!("CARGO_PKG_VERSION"));
    info!("Document root: {}", settings.root.display());
    info!("Cache capacity: {}", settings.cache.max_size);

    let cache = FileCache::with_config(settings.cache).context("creating cache")?;
    let mut handler = RequestHandler::new(
        cache,
        DocumentRoot::new(&settings.root),
        DocumentRoot::new(&settings.files),
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.paths.is_empty() {
        serve_lines(&mut handler, io::stdin().lock(), &mut out, args.cat)?;
    } else {
        for path in &args.paths {
            serve(&mut handler, &mut out, path, args.cat)?;
        }
    }

    if args.stats {
        writeln!(out, "{}", handler.cache().stats().snapshot())?;
    }
    out.flush()?;

    let released = handler.shutdown();
    debug!("Released {} cached files", released);

    Ok(())
}

/// Serve one request per input line; lines that are not UTF-8 are skipped
fn serve_lines<R: BufRead, W: Write>(
    handler: &mut RequestHandler,
    input: R,
    out: &mut W,
    cat: bool,
) -> Result<()> {
    for (lineno, line) in input.split(b'\n').enumerate() {
        let line = line.context("reading request paths")?;
        let path = match std::str::from_utf8(&line) {
            Ok(path) => path.trim(),
            Err(e) => {
                warn!("Skipping request line {}: {}", lineno + 1, e);
                continue;
            }
        };
        if !path.is_empty() {
            serve(handler, out, path, cat)?;
        }
    }
    Ok(())
}

/// Serve one request; a failed request is logged and does not stop the run
fn serve<W: Write>(
    handler: &mut RequestHandler,
    out: &mut W,
    path: &str,
    cat: bool,
) -> Result<()> {
    match handler.handle(path) {
        Ok(response) => output::send(out, path, &response, cat).context("writing response")?,
        Err(e) => warn!("Error serving {}: {:#}", path, e),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn handler(dir: &TempDir) -> RequestHandler {
        let root = dir.path().join("www");
        let files = dir.path().join("sf");
        fs::create_dir_all(&root).unwrap();
        fs::create_dir_all(&files).unwrap();
        fs::write(root.join("a.txt"), b"abc").unwrap();

        let cache = FileCache::new(4, 0).unwrap();
        RequestHandler::new(cache, DocumentRoot::new(root), DocumentRoot::new(files))
    }

    #[test]
    fn test_serve_lines_skips_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let mut handler = handler(&dir);
        let mut out = Vec::new();

        serve_lines(&mut handler, &b"/a.txt\n\xff\n/a.txt\n"[..], &mut out, false).unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "200 text/plain 3 miss /a.txt\n200 text/plain 3 hit /a.txt\n"
        );
        assert_eq!(handler.cache().stats().hits(), 1);
    }

    #[test]
    fn test_serve_lines_ignores_blank_and_crlf() {
        let dir = TempDir::new().unwrap();
        let mut handler = handler(&dir);
        let mut out = Vec::new();

        serve_lines(&mut handler, &b"\n  \r\n/a.txt\r\n"[..], &mut out, false).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "200 text/plain 3 miss /a.txt\n");
    }

    #[test]
    fn test_failed_request_does_not_stop_run() {
        let dir = TempDir::new().unwrap();
        let mut handler = handler(&dir);
        let mut out = Vec::new();

        // no 404.html in sf, so the missing file is an error
        serve_lines(&mut handler, &b"/nope.txt\n/a.txt\n"[..], &mut out, false).unwrap();

        assert_eq!(String::from_utf8(out).unwrap(), "200 text/plain 3 miss /a.txt\n");
    }
}
