//! Server Configuration
//!
//! Read from the environment (and `.env` via dotenvy).

use std::path::PathBuf;

use anyhow::{bail, Result};

/// Which price feed backs the service
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FeedKind {
    /// Synthetic closes, no files needed
    Mock,

    /// `<dir>/<SYMBOL>.json` row files
    File(PathBuf),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub feed: FeedKind,

    /// On-disk cache for fetched histories
    pub cache_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".into());

        let feed = match lookup("PRICE_FEED").as_deref().map(str::trim) {
            None | Some("" | "mock") => FeedKind::Mock,
            Some("file") => {
                let Some(dir) = lookup("PRICE_DATA_DIR") else {
                    bail!("PRICE_FEED=file requires PRICE_DATA_DIR");
                };
                FeedKind::File(PathBuf::from(dir))
            }
            Some(other) => bail!("Unknown PRICE_FEED '{other}' (expected 'mock' or 'file')"),
        };

        let cache_dir = lookup("PRICE_CACHE_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            feed,
            cache_dir,
        })
    }
}
