//! Domain Models
//!
//! Holdings and the purchase records they accumulate.
//! Uses `rust_decimal` for all monetary values - never use f64 for money!

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};
use crate::series::{normalize_symbol, PriceSeries};

/// How a purchase converts currency into units
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseMode {
    /// Exact division, spends the full amount
    #[default]
    Fractional,

    /// Floors to whole units; the unspent remainder goes back to the caller
    WholeUnits,
}

/// Requested weight for one symbol
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAllocation {
    pub symbol: String,
    pub weight: Decimal,
}

impl TargetAllocation {
    pub fn new(symbol: impl Into<String>, weight: Decimal) -> Self {
        Self {
            symbol: symbol.into().trim().to_uppercase(),
            weight,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let symbol = normalize_symbol(&self.symbol)?;
        validate_weight(&symbol, self.weight)
    }
}

fn validate_weight(symbol: &str, weight: Decimal) -> Result<()> {
    if weight < Decimal::ZERO || weight > Decimal::ONE {
        return Err(DcaError::InvalidConfiguration(format!(
            "Weight for {symbol} must be within [0, 1], got {weight}"
        )));
    }
    Ok(())
}

/// A recorded purchase
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Purchase {
    pub date: NaiveDate,
    pub price: Decimal,
    pub amount: Decimal,
    pub units: Decimal,
}

/// Outcome of a single `Holding::purchase`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Fill {
    pub date: NaiveDate,
    pub price: Decimal,
    pub units: Decimal,

    /// Currency actually deployed
    pub spent: Decimal,

    /// Requested amount minus `spent`; non-zero only for whole-unit fills
    pub remainder: Decimal,
}

/// One instrument's position, bound to its price history
#[derive(Clone, Debug)]
pub struct Holding {
    symbol: String,
    target_weight: Decimal,
    series: Arc<PriceSeries>,
    capital_committed: Decimal,
    units_held: Decimal,
    purchases: Vec<Purchase>,
}

impl Holding {
    pub fn new(symbol: impl Into<String>, target_weight: Decimal, series: Arc<PriceSeries>) -> Result<Self> {
        let symbol = normalize_symbol(&symbol.into())?;
        validate_weight(&symbol, target_weight)?;

        if series.symbol() != symbol {
            return Err(DcaError::InvalidConfiguration(format!(
                "Holding {symbol} bound to price series for {}",
                series.symbol()
            )));
        }
        if series.is_empty() {
            return Err(DcaError::EmptySeries(symbol));
        }

        Ok(Self {
            symbol,
            target_weight,
            series,
            capital_committed: Decimal::ZERO,
            units_held: Decimal::ZERO,
            purchases: Vec::new(),
        })
    }

    /// Bind a holding to the series it was built for
    pub fn for_series(series: Arc<PriceSeries>, target_weight: Decimal) -> Result<Self> {
        let symbol = series.symbol().to_string();
        Self::new(symbol, target_weight, series)
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub const fn target_weight(&self) -> Decimal {
        self.target_weight
    }

    pub fn series(&self) -> &Arc<PriceSeries> {
        &self.series
    }

    pub const fn capital_committed(&self) -> Decimal {
        self.capital_committed
    }

    pub const fn units_held(&self) -> Decimal {
        self.units_held
    }

    pub fn purchases(&self) -> &[Purchase] {
        &self.purchases
    }

    /// Buy `amount` worth of units at the close on `date`
    pub fn purchase(&mut self, amount: Decimal, date: NaiveDate, mode: PurchaseMode) -> Result<Fill> {
        if amount < Decimal::ZERO {
            return Err(DcaError::InvalidConfiguration(format!(
                "Purchase amount for {} must not be negative, got {amount}",
                self.symbol
            )));
        }

        let price = self.series.price_at(date)?;
        let overflow = |what: &str| DcaError::Overflow(format!("{what} for {} on {date}", self.symbol));

        let raw_units = amount.checked_div(price).ok_or_else(|| overflow("units"))?;
        let (units, spent) = match mode {
            PurchaseMode::Fractional => (raw_units, amount),
            PurchaseMode::WholeUnits => {
                let units = raw_units.floor();
                (units, units.checked_mul(price).ok_or_else(|| overflow("spent"))?)
            }
        };

        if spent > Decimal::ZERO {
            let units_held = self.units_held.checked_add(units).ok_or_else(|| overflow("units held"))?;
            let capital_committed = self
                .capital_committed
                .checked_add(spent)
                .ok_or_else(|| overflow("capital committed"))?;
            self.units_held = units_held;
            self.capital_committed = capital_committed;
            self.purchases.push(Purchase {
                date,
                price,
                amount: spent,
                units,
            });
            tracing::debug!(
                symbol = %self.symbol,
                %date,
                %price,
                %units,
                %spent,
                "filled purchase"
            );
        }

        Ok(Fill {
            date,
            price,
            units,
            spent,
            remainder: amount - spent,
        })
    }

    /// Value at the exact close on `date`
    pub fn value_at(&self, date: NaiveDate) -> Result<Decimal> {
        self.value_with(self.series.price_at(date)?)
    }

    /// Value at the most recent close on or before `date`
    pub fn value_as_of(&self, date: NaiveDate) -> Result<Decimal> {
        let (_, price) = self
            .series
            .price_on_or_before(date)
            .ok_or_else(|| DcaError::PriceUnavailable {
                symbol: self.symbol.clone(),
                date,
            })?;
        self.value_with(price)
    }

    /// Value at the last close in the series
    pub fn latest_value(&self) -> Result<Decimal> {
        self.series
            .latest_price()
            .map_or(Ok(Decimal::ZERO), |(_, price)| self.value_with(price))
    }

    fn value_with(&self, price: Decimal) -> Result<Decimal> {
        self.units_held
            .checked_mul(price)
            .ok_or_else(|| DcaError::Overflow(format!("value of {}", self.symbol)))
    }

    /// Capital committed per unit held
    pub fn average_cost(&self) -> Option<Decimal> {
        if self.units_held.is_zero() {
            return None;
        }
        Some(self.capital_committed / self.units_held)
    }

    pub fn snapshot(&self) -> HoldingSnapshot {
        HoldingSnapshot {
            symbol: self.symbol.clone(),
            target_weight: self.target_weight,
            units_held: self.units_held,
            capital_committed: self.capital_committed,
        }
    }
}

/// Read-only view of a holding for reports
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoldingSnapshot {
    pub symbol: String,
    pub target_weight: Decimal,
    pub units_held: Decimal,
    pub capital_committed: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn vgt() -> Arc<PriceSeries> {
        Arc::new(
            PriceSeries::from_closes(
                "VGT",
                [
                    (day(2023, 1, 3), dec!(300)),
                    (day(2023, 1, 4), dec!(250)),
                    (day(2023, 1, 5), dec!(330)),
                ],
            )
            .unwrap(),
        )
    }

    #[test]
    fn test_fractional_purchase() {
        let mut holding = Holding::new("vgt", dec!(0.3), vgt()).unwrap();
        assert_eq!(holding.symbol(), "VGT");

        let fill = holding
            .purchase(dec!(600), day(2023, 1, 3), PurchaseMode::Fractional)
            .unwrap();
        assert_eq!(fill.units, dec!(2));
        assert_eq!(fill.spent, dec!(600));
        assert_eq!(fill.remainder, Decimal::ZERO);
        assert_eq!(holding.units_held(), dec!(2));
        assert_eq!(holding.capital_committed(), dec!(600));
    }

    #[test]
    fn test_whole_unit_purchase_returns_remainder() {
        let mut holding = Holding::for_series(vgt(), dec!(1)).unwrap();

        let fill = holding
            .purchase(dec!(700), day(2023, 1, 4), PurchaseMode::WholeUnits)
            .unwrap();
        assert_eq!(fill.units, dec!(2));
        assert_eq!(fill.spent, dec!(500));
        assert_eq!(fill.remainder, dec!(200));
        assert_eq!(holding.capital_committed(), dec!(500));
    }

    #[test]
    fn test_whole_unit_purchase_below_price_records_nothing() {
        let mut holding = Holding::for_series(vgt(), dec!(1)).unwrap();

        let fill = holding
            .purchase(dec!(100), day(2023, 1, 3), PurchaseMode::WholeUnits)
            .unwrap();
        assert_eq!(fill.units, Decimal::ZERO);
        assert_eq!(fill.remainder, dec!(100));
        assert!(holding.purchases().is_empty());
    }

    #[test]
    fn test_missing_price_leaves_position_untouched() {
        let mut holding = Holding::for_series(vgt(), dec!(1)).unwrap();

        let err = holding
            .purchase(dec!(100), day(2023, 1, 7), PurchaseMode::Fractional)
            .unwrap_err();
        assert!(matches!(err, DcaError::PriceUnavailable { .. }));
        assert_eq!(holding.units_held(), Decimal::ZERO);
        assert_eq!(holding.capital_committed(), Decimal::ZERO);
    }

    #[test]
    fn test_capital_conservation_and_monotonic_units() {
        let mut holding = Holding::for_series(vgt(), dec!(1)).unwrap();
        let amounts = [dec!(100), dec!(33.33), dec!(0), dec!(71.1)];
        let dates = [day(2023, 1, 3), day(2023, 1, 4), day(2023, 1, 5), day(2023, 1, 5)];

        let mut previous_units = Decimal::ZERO;
        for (amount, date) in amounts.iter().zip(dates) {
            holding.purchase(*amount, date, PurchaseMode::Fractional).unwrap();
            assert!(holding.units_held() >= previous_units);
            previous_units = holding.units_held();
        }

        let total: Decimal = amounts.iter().sum();
        assert_eq!(holding.capital_committed(), total);
        let ledger_units: Decimal = holding.purchases().iter().map(|p| p.units).sum();
        assert_eq!(holding.units_held(), ledger_units);
    }

    #[test]
    fn test_valuation() {
        let mut holding = Holding::for_series(vgt(), dec!(1)).unwrap();
        holding
            .purchase(dec!(600), day(2023, 1, 3), PurchaseMode::Fractional)
            .unwrap();

        assert_eq!(holding.value_at(day(2023, 1, 4)).unwrap(), dec!(500));
        assert!(holding.value_at(day(2023, 1, 7)).is_err());
        assert_eq!(holding.value_as_of(day(2023, 1, 8)).unwrap(), dec!(660));
        assert!(holding.value_as_of(day(2022, 12, 30)).is_err());
        assert_eq!(holding.latest_value().unwrap(), dec!(660));
        assert_eq!(holding.average_cost(), Some(dec!(300)));
    }

    #[test]
    fn test_rejects_bad_weight_and_mismatched_series() {
        assert!(matches!(
            Holding::new("VGT", dec!(1.2), vgt()),
            Err(DcaError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            Holding::new("QQQ", dec!(0.5), vgt()),
            Err(DcaError::InvalidConfiguration(_))
        ));
        let empty = Arc::new(PriceSeries::new("VGT", Vec::<crate::series::PriceBar>::new()).unwrap());
        assert!(matches!(
            Holding::new("VGT", dec!(0.5), empty),
            Err(DcaError::EmptySeries(_))
        ));
    }

    #[test]
    fn test_target_allocation_validation() {
        assert!(TargetAllocation::new("voo", dec!(0.3)).validate().is_ok());
        assert_eq!(TargetAllocation::new(" voo ", dec!(0.3)).symbol, "VOO");
        assert!(TargetAllocation::new("VOO", dec!(-0.1)).validate().is_err());
        assert!(TargetAllocation::new("", dec!(0.1)).validate().is_err());
    }
}
