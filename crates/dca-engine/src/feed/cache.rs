//! Caching Price Feed
//!
//! Wraps another feed and remembers every `(symbol, start, end)` request in
//! memory, optionally persisting the rows to a cache directory so later runs
//! skip the upstream call entirely.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::file::parse_rows;
use super::PriceFeed;
use crate::error::Result;
use crate::series::{normalize_symbol, PriceSeries};

type CacheKey = (String, NaiveDate, NaiveDate);

pub struct CachedPriceFeed<F> {
    inner: F,
    memory: RwLock<HashMap<CacheKey, PriceSeries>>,
    cache_dir: Option<PathBuf>,
}

impl<F: PriceFeed> CachedPriceFeed<F> {
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            memory: RwLock::new(HashMap::new()),
            cache_dir: None,
        }
    }

    /// Persist fetched series as JSON under `dir`
    #[must_use]
    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub const fn inner(&self) -> &F {
        &self.inner
    }

    /// Number of series held in memory
    pub async fn cached_len(&self) -> usize {
        self.memory.read().await.len()
    }

    pub async fn clear(&self) {
        self.memory.write().await.clear();
    }

    fn disk_path(&self, key: &CacheKey) -> Option<PathBuf> {
        let (symbol, start, end) = key;
        self.cache_dir
            .as_ref()
            .map(|dir| dir.join(format!("{symbol}_{start}_{end}.json")))
    }

    async fn read_disk(&self, key: &CacheKey) -> Option<PriceSeries> {
        let path = self.disk_path(key)?;
        let raw = tokio::fs::read_to_string(&path).await.ok()?;
        match parse_rows(&key.0, &raw) {
            Ok(series) => Some(series),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable cache file");
                None
            }
        }
    }

    async fn write_disk(&self, key: &CacheKey, series: &PriceSeries) -> Result<()> {
        let Some(path) = self.disk_path(key) else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string(&series.bars())?;
        tokio::fs::write(&path, raw).await?;
        Ok(())
    }
}

#[async_trait]
impl<F: PriceFeed> PriceFeed for CachedPriceFeed<F> {
    async fn history(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let key: CacheKey = (normalize_symbol(symbol)?, start, end);

        if let Some(series) = self.memory.read().await.get(&key) {
            tracing::debug!(symbol = %key.0, "price cache hit");
            return Ok(series.clone());
        }

        let series = match self.read_disk(&key).await {
            Some(series) => {
                tracing::debug!(symbol = %key.0, "price disk cache hit");
                series
            }
            None => {
                let series = self.inner.history(&key.0, start, end).await?;
                if let Err(e) = self.write_disk(&key, &series).await {
                    tracing::warn!(symbol = %key.0, error = %e, "failed to persist price cache");
                }
                series
            }
        };

        self.memory.write().await.insert(key, series.clone());
        Ok(series)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
