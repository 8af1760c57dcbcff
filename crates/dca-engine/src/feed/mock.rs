//! Mock Price Feed
//!
//! For testing and demo purposes. Generates deterministic weekday closes for
//! a fixed set of ETFs, drifting upward from a base price.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::PriceFeed;
use crate::error::{DcaError, Result};
use crate::series::{normalize_symbol, PriceBar, PriceSeries};

/// Mock feed with synthetic closes
pub struct MockPriceFeed {
    /// Extra non-trading days on top of weekends and fixed holidays
    closed: HashSet<NaiveDate>,
}

impl Default for MockPriceFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPriceFeed {
    pub fn new() -> Self {
        Self {
            closed: HashSet::new(),
        }
    }

    /// Mark extra dates as market closures
    #[must_use]
    pub fn with_closed_dates(mut self, dates: impl IntoIterator<Item = NaiveDate>) -> Self {
        self.closed.extend(dates);
        self
    }

    /// Base close on 2020-01-02 and daily drift for a symbol
    fn profile(symbol: &str) -> Option<(Decimal, Decimal)> {
        // (base_price, daily_drift)
        match symbol {
            "VGT" => Some((dec!(245.00), dec!(0.0009))),
            "SOXX" => Some((dec!(260.00), dec!(0.0011))),
            "VOO" => Some((dec!(300.00), dec!(0.0004))),
            "SPY" => Some((dec!(325.00), dec!(0.0004))),
            "QQQ" => Some((dec!(215.00), dec!(0.0007))),
            "VTI" => Some((dec!(165.00), dec!(0.0004))),
            "BND" => Some((dec!(84.00), dec!(0.00002))),
            "VXUS" => Some((dec!(57.00), dec!(0.0001))),
            _ => None,
        }
    }

    fn is_trading_day(&self, date: NaiveDate) -> bool {
        if matches!(date.weekday(), Weekday::Sat | Weekday::Sun) {
            return false;
        }
        // New Year's Day, Independence Day, Christmas
        if matches!((date.month(), date.day()), (1, 1) | (7, 4) | (12, 25)) {
            return false;
        }
        !self.closed.contains(&date)
    }

    fn close(base: Decimal, drift: Decimal, date: NaiveDate) -> Decimal {
        let epoch = NaiveDate::from_ymd_opt(2020, 1, 2).unwrap_or(date);
        let days = Decimal::from((date - epoch).num_days().max(0));
        // Small weekly ripple so consecutive closes differ
        let ripple = Decimal::from(date.weekday().num_days_from_monday()) * dec!(0.002);
        (base * (Decimal::ONE + drift * days + ripple)).round_dp(2)
    }
}

#[async_trait]
impl PriceFeed for MockPriceFeed {
    async fn history(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Result<PriceSeries> {
        let symbol = normalize_symbol(symbol)?;
        let (base, drift) =
            Self::profile(&symbol).ok_or_else(|| DcaError::SeriesNotFound(symbol.clone()))?;

        let bars = start
            .iter_days()
            .take_while(|d| *d <= end)
            .filter(|d| self.is_trading_day(*d))
            .map(|d| PriceBar::new(d, Self::close(base, drift, d)));

        PriceSeries::new(symbol, bars)
    }

    fn name(&self) -> &str {
        "MockFeed"
    }
}
