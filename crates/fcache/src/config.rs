//! Command-line and config-file settings

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use filecache::{CacheConfig, DEFAULT_MAX_SIZE};
use serde::Deserialize;

const DEFAULT_ROOT: &str = "./serverroot";
const DEFAULT_FILES: &str = "./serverfiles";

#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Document root that request paths are served from
    #[arg(short, long, env = "FCACHE_ROOT")]
    pub root: Option<PathBuf>,

    /// Directory holding 404.html
    #[arg(short, long, env = "FCACHE_FILES")]
    pub files: Option<PathBuf>,

    /// Cache capacity (number of files)
    #[arg(short, long, env = "FCACHE_CAPACITY")]
    pub capacity: Option<usize>,

    /// Hash index sizing hint (0 for default)
    #[arg(long, env = "FCACHE_HASH_HINT")]
    pub hash_hint: Option<usize>,

    /// JSON config file
    #[arg(long, env = "FCACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write file contents to stdout after each status line
    #[arg(long)]
    pub cat: bool,

    /// Print cache statistics when done
    #[arg(long)]
    pub stats: bool,

    /// Request paths; read from stdin (one per line) when empty
    pub paths: Vec<String>,
}

/// Optional settings loaded from `--config`
#[derive(Debug, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub root: Option<PathBuf>,
    pub files: Option<PathBuf>,
    pub capacity: Option<usize>,
    pub hash_hint: Option<usize>,
}

impl FileConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        serde_json::from_str(&raw).with_context(|| format!("parsing config {}", path.display()))
    }
}

/// Effective settings after merging flags, config file and defaults
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub root: PathBuf,
    pub files: PathBuf,
    pub cache: CacheConfig,
}

impl Settings {
    /// Flags (or their env vars) win over the config file, which wins over defaults
    pub fn resolve(args: &Args, file: FileConfig) -> Result<Self> {
        let cache = CacheConfig::default()
            .with_max_size(args.capacity.or(file.capacity).unwrap_or(DEFAULT_MAX_SIZE))
            .with_hash_hint(args.hash_hint.or(file.hash_hint).unwrap_or(0));
        cache.validate().context("invalid cache settings")?;

        Ok(Self {
            root: args
                .root
                .clone()
                .or(file.root)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ROOT)),
            files: args
                .files
                .clone()
                .or(file.files)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_FILES)),
            cache,
        })
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Self::resolve(args, file)
    }
}
