//! JSON File Price Feed
//!
//! Reads `<dir>/<SYMBOL>.json`, each file a list of `{"date", "close"}` rows.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::NaiveDate;

use super::PriceFeed;
use crate::error::{DcaError, Result};
use crate::series::{normalize_symbol, PriceBar, PriceSeries};

pub struct JsonFilePriceFeed {
    dir: PathBuf,
}

impl JsonFilePriceFeed {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding `symbol`'s rows; rejects symbols that are not plain tickers
    pub fn path_for(&self, symbol: &str) -> Result<PathBuf> {
        Ok(self.dir.join(format!("{}.json", normalize_symbol(symbol)?)))
    }
}

/// Parse a rows file into a series
pub(crate) fn parse_rows(symbol: &str, raw: &str) -> Result<PriceSeries> {
    let bars: Vec<PriceBar> = serde_json::from_str(raw)?;
    PriceSeries::new(symbol, bars)
}

#[async_trait]
impl PriceFeed for JsonFilePriceFeed {
    async fn history(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let symbol = normalize_symbol(symbol)?;
        let path = self.path_for(&symbol)?;
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(DcaError::SeriesNotFound(symbol));
            }
            Err(e) => return Err(e.into()),
        };

        let series = parse_rows(&symbol, &raw)?.between(start, end);
        if series.is_empty() {
            return Err(DcaError::EmptySeries(series.symbol().to_string()));
        }

        tracing::debug!(path = %path.display(), rows = series.len(), "loaded price file");
        Ok(series)
    }

    fn name(&self) -> &str {
        "JsonFileFeed"
    }
}
