//! Price Feeds
//!
//! Sources of historical closes. The engine only needs a `PriceBook`; feeds
//! are how one gets filled.

mod cache;
mod file;
mod mock;

pub use cache::CachedPriceFeed;
pub use file::JsonFilePriceFeed;
pub use mock::MockPriceFeed;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};
use crate::model::TargetAllocation;
use crate::series::{PriceBook, PriceSeries};

/// Historical price source (Strategy pattern)
///
/// Implement this for each data vendor or storage format.
#[async_trait]
pub trait PriceFeed: Send + Sync {
    /// Daily closes for `symbol` within `[start, end]`
    async fn history(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries>;

    /// Load several symbols, collecting failures instead of stopping at the first
    async fn histories(&self, symbols: &[&str], start: NaiveDate, end: NaiveDate) -> LoadOutcome {
        let mut outcome = LoadOutcome::default();
        for symbol in symbols {
            match self.history(symbol, start, end).await {
                Ok(series) => {
                    outcome.book.insert(series);
                }
                Err(e) => {
                    tracing::warn!(feed = self.name(), symbol, error = %e, "failed to load history");
                    outcome.failures.push(LoadFailure {
                        symbol: symbol.trim().to_uppercase(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        outcome
    }

    /// Feed name
    fn name(&self) -> &str;
}

/// Symbol that could not be loaded
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadFailure {
    pub symbol: String,
    pub reason: String,
}

/// Series that loaded, and the ones that did not
#[derive(Clone, Debug, Default)]
pub struct LoadOutcome {
    pub book: PriceBook,
    pub failures: Vec<LoadFailure>,
}

impl LoadOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Load the series every allocation needs
///
/// Individual failures are reported in the outcome; it is only an error when
/// nothing loads at all.
pub async fn load_price_book<F: PriceFeed + ?Sized>(
    feed: &F,
    allocations: &[TargetAllocation],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<LoadOutcome> {
    let symbols: Vec<&str> = allocations.iter().map(|a| a.symbol.as_str()).collect();
    let outcome = feed.histories(&symbols, start, end).await;

    if outcome.book.is_empty() && !symbols.is_empty() {
        return Err(DcaError::Feed(format!(
            "no price history could be loaded from {} for {}",
            feed.name(),
            symbols.join(", ")
        )));
    }

    tracing::info!(
        feed = feed.name(),
        loaded = outcome.book.len(),
        failed = outcome.failures.len(),
        "price book loaded"
    );
    Ok(outcome)
}
