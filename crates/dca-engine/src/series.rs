//! Historical Price Series
//!
//! Daily closing prices indexed by trading date. A date missing from a series
//! is a non-trading day; lookups never interpolate.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};

/// Longest accepted ticker
pub const MAX_SYMBOL_LEN: usize = 16;

/// Trim and uppercase a ticker, rejecting anything outside `[A-Z0-9.^=-]`
///
/// Symbols end up in file names, so separators and the like never get through.
pub fn normalize_symbol(raw: &str) -> Result<String> {
    let symbol = raw.trim().to_uppercase();
    if symbol.is_empty() {
        return Err(DcaError::InvalidConfiguration("Symbol is empty".into()));
    }
    if symbol.len() > MAX_SYMBOL_LEN {
        return Err(DcaError::InvalidConfiguration(format!(
            "Symbol {symbol} is longer than {MAX_SYMBOL_LEN} characters"
        )));
    }
    let valid = symbol
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || matches!(c, '.' | '^' | '=' | '-'));
    if !valid || symbol.chars().all(|c| c == '.') {
        return Err(DcaError::InvalidConfiguration(format!("Invalid symbol '{}'", raw.trim())));
    }
    Ok(symbol)
}

/// One trading day's close, the row format used by feeds and on-disk caches
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close: Decimal,
}

impl PriceBar {
    pub const fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }
}

/// Immutable close history for a single instrument
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PriceSeries {
    symbol: String,
    closes: BTreeMap<NaiveDate, Decimal>,
}

impl PriceSeries {
    /// Build a series from bars in any order. Later duplicates overwrite
    /// earlier ones; non-positive closes are rejected.
    pub fn new(symbol: impl Into<String>, bars: impl IntoIterator<Item = PriceBar>) -> Result<Self> {
        let symbol = normalize_symbol(&symbol.into())?;

        let mut closes = BTreeMap::new();
        for bar in bars {
            if bar.close <= Decimal::ZERO {
                return Err(DcaError::InvalidPrice {
                    symbol,
                    date: bar.date,
                    price: bar.close,
                });
            }
            closes.insert(bar.date, bar.close);
        }

        Ok(Self { symbol, closes })
    }

    pub fn from_closes(
        symbol: impl Into<String>,
        closes: impl IntoIterator<Item = (NaiveDate, Decimal)>,
    ) -> Result<Self> {
        Self::new(symbol, closes.into_iter().map(|(date, close)| PriceBar::new(date, close)))
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn has_price(&self, date: NaiveDate) -> bool {
        self.closes.contains_key(&date)
    }

    /// Exact close on `date`
    pub fn price_at(&self, date: NaiveDate) -> Result<Decimal> {
        self.closes
            .get(&date)
            .copied()
            .ok_or_else(|| DcaError::PriceUnavailable {
                symbol: self.symbol.clone(),
                date,
            })
    }

    /// Most recent close at or before `date`
    pub fn price_on_or_before(&self, date: NaiveDate) -> Option<(NaiveDate, Decimal)> {
        self.closes
            .range(..=date)
            .next_back()
            .map(|(d, p)| (*d, *p))
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next().copied()
    }

    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.closes.keys().next_back().copied()
    }

    pub fn latest_price(&self) -> Option<(NaiveDate, Decimal)> {
        self.closes.iter().next_back().map(|(d, p)| (*d, *p))
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Trading dates in ascending order
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.closes.keys().copied()
    }

    pub fn bars(&self) -> Vec<PriceBar> {
        self.closes
            .iter()
            .map(|(date, close)| PriceBar::new(*date, *close))
            .collect()
    }

    /// Copy of the rows inside `[start, end]`
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let closes = if start > end {
            BTreeMap::new()
        } else {
            self.closes
                .range(start..=end)
                .map(|(d, p)| (*d, *p))
                .collect()
        };

        Self {
            symbol: self.symbol.clone(),
            closes,
        }
    }
}

/// Symbol-keyed collection of shared series
///
/// Series are handed out as `Arc`s so independent portfolios can read the
/// same history from different threads.
#[derive(Clone, Debug, Default)]
pub struct PriceBook {
    series: HashMap<String, Arc<PriceSeries>>,
}

impl PriceBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace the series for its symbol
    pub fn insert(&mut self, series: PriceSeries) -> Arc<PriceSeries> {
        let shared = Arc::new(series);
        self.series
            .insert(shared.symbol().to_string(), Arc::clone(&shared));
        shared
    }

    pub fn get(&self, symbol: &str) -> Option<Arc<PriceSeries>> {
        self.series.get(&symbol.trim().to_uppercase()).cloned()
    }

    pub fn series(&self, symbol: &str) -> Result<Arc<PriceSeries>> {
        self.get(symbol)
            .ok_or_else(|| DcaError::SeriesNotFound(symbol.trim().to_uppercase()))
    }

    pub fn has_price(&self, symbol: &str, date: NaiveDate) -> bool {
        self.get(symbol).is_some_and(|s| s.has_price(date))
    }

    pub fn price_at(&self, symbol: &str, date: NaiveDate) -> Result<Decimal> {
        self.series(symbol)?.price_at(date)
    }

    pub fn latest_date(&self, symbol: &str) -> Option<NaiveDate> {
        self.get(symbol).and_then(|s| s.latest_date())
    }

    pub fn symbols(&self) -> Vec<&str> {
        let mut symbols: Vec<&str> = self.series.keys().map(String::as_str).collect();
        symbols.sort_unstable();
        symbols
    }

    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
