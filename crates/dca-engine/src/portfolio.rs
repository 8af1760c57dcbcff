//! Portfolio Simulation
//!
//! Owns the holdings and the cash ledger, deploys the initial lump sum and
//! each monthly contribution, and values the result.
//!
//! ```text
//! Uninitialized ──seed()──▶ Seeded ──apply_contribution()──▶ Running
//!                                            ▲                  │
//!                                            └──────────────────┘
//! ```
//!
//! Every contribution is split by target weight on its own. Existing
//! positions are never rebalanced, so the realized allocation drifts with
//! prices between contributions.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};
use crate::model::{Holding, HoldingSnapshot, PurchaseMode};
use crate::strategy::AllocationSchedule;

/// Simulation lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Uninitialized,
    Seeded,
    Running,
}

/// Which contribution a purchase belonged to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionKind {
    Initial,
    Periodic,
}

/// A per-holding purchase that did not happen
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedPurchase {
    pub symbol: String,
    pub date: NaiveDate,
    pub kind: ContributionKind,

    /// Currency that stayed in cash
    pub amount: Decimal,

    pub reason: String,
}

/// Contribution amounts, bounds and purchase rules
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSettings {
    pub initial_contribution: Decimal,
    pub periodic_contribution: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Day-of-month anchor for periodic contributions
    pub contribution_day: u32,

    #[serde(default)]
    pub purchase_mode: PurchaseMode,

    #[serde(default)]
    pub backfill_month_end: bool,
}

impl ContributionSettings {
    /// Settings anchored on `start_date`'s day of month
    pub fn new(
        initial_contribution: Decimal,
        periodic_contribution: Decimal,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            initial_contribution,
            periodic_contribution,
            start_date,
            end_date,
            contribution_day: start_date.day(),
            purchase_mode: PurchaseMode::default(),
            backfill_month_end: false,
        }
    }

    #[must_use]
    pub const fn with_contribution_day(mut self, day: u32) -> Self {
        self.contribution_day = day;
        self
    }

    #[must_use]
    pub const fn with_purchase_mode(mut self, mode: PurchaseMode) -> Self {
        self.purchase_mode = mode;
        self
    }

    #[must_use]
    pub const fn with_backfill(mut self, enabled: bool) -> Self {
        self.backfill_month_end = enabled;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.initial_contribution < Decimal::ZERO {
            return Err(DcaError::InvalidConfiguration(format!(
                "Initial contribution must not be negative, got {}",
                self.initial_contribution
            )));
        }
        if self.periodic_contribution < Decimal::ZERO {
            return Err(DcaError::InvalidConfiguration(format!(
                "Periodic contribution must not be negative, got {}",
                self.periodic_contribution
            )));
        }
        AllocationSchedule::new(self.start_date, self.end_date, self.contribution_day)?;
        Ok(())
    }
}

/// A DCA portfolio and its cash ledger
#[derive(Clone, Debug)]
pub struct Portfolio {
    settings: ContributionSettings,
    holdings: Vec<Holding>,
    cash_balance: Decimal,
    total_contributed: Decimal,
    phase: Phase,
    contribution_dates: Vec<NaiveDate>,
    skipped: Vec<SkippedPurchase>,
}

impl Portfolio {
    pub fn new(settings: ContributionSettings) -> Result<Self> {
        settings.validate()?;

        Ok(Self {
            cash_balance: settings.initial_contribution,
            settings,
            holdings: Vec::new(),
            total_contributed: Decimal::ZERO,
            phase: Phase::Uninitialized,
            contribution_dates: Vec::new(),
            skipped: Vec::new(),
        })
    }

    /// Add a holding; only allowed before seeding
    pub fn add_holding(&mut self, holding: Holding) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(DcaError::InvalidState(format!(
                "Cannot add {} after the portfolio was seeded",
                holding.symbol()
            )));
        }
        if self.holding(holding.symbol()).is_some() {
            return Err(DcaError::InvalidConfiguration(format!(
                "Duplicate holding {}",
                holding.symbol()
            )));
        }

        self.holdings.push(holding);
        Ok(())
    }

    /// Deploy the initial contribution on the start date
    pub fn seed(&mut self) -> Result<()> {
        if self.phase != Phase::Uninitialized {
            return Err(DcaError::InvalidState("Portfolio already seeded".into()));
        }
        if self.holdings.is_empty() {
            return Err(DcaError::InvalidConfiguration(
                "Portfolio needs at least one holding".into(),
            ));
        }

        let weight_total: Decimal = self.holdings.iter().map(Holding::target_weight).sum();
        if weight_total != Decimal::ONE {
            tracing::warn!(%weight_total, "target weights do not sum to 1");
        }

        self.total_contributed = checked_add(
            self.total_contributed,
            self.settings.initial_contribution,
            "total contributed",
        )?;
        self.allocate(
            self.settings.initial_contribution,
            self.settings.start_date,
            ContributionKind::Initial,
        )?;
        self.phase = Phase::Seeded;

        tracing::info!(
            date = %self.settings.start_date,
            amount = %self.settings.initial_contribution,
            holdings = self.holdings.len(),
            "portfolio seeded"
        );
        Ok(())
    }

    /// Contribution dates from `schedule_start` to the end date, resolved
    /// against the first holding's trading calendar
    pub fn contribution_schedule(&self, schedule_start: NaiveDate) -> Result<Vec<NaiveDate>> {
        if schedule_start < self.settings.start_date || schedule_start > self.settings.end_date {
            return Err(DcaError::InvalidConfiguration(format!(
                "Schedule start {schedule_start} outside {} to {}",
                self.settings.start_date, self.settings.end_date
            )));
        }
        let calendar = self.holdings.first().ok_or_else(|| {
            DcaError::InvalidConfiguration("Portfolio needs at least one holding".into())
        })?;

        let schedule = AllocationSchedule::new(
            schedule_start,
            self.settings.end_date,
            self.settings.contribution_day,
        )?
        .with_backfill(self.settings.backfill_month_end);

        Ok(schedule.dates(calendar.series()))
    }

    /// Apply every scheduled contribution not yet applied; returns how many ran
    pub fn run_periodic_contributions(&mut self, schedule_start: NaiveDate) -> Result<usize> {
        self.ensure_seeded()?;

        let last_applied = self.contribution_dates.last().copied();
        let pending: Vec<NaiveDate> = self
            .contribution_schedule(schedule_start)?
            .into_iter()
            .filter(|date| last_applied.is_none_or(|last| *date > last))
            .collect();

        for date in &pending {
            self.apply_contribution(*date)?;
        }

        tracing::info!(
            applied = pending.len(),
            total_contributed = %self.total_contributed,
            cash = %self.cash_balance,
            "periodic contributions applied"
        );
        Ok(pending.len())
    }

    /// Credit one periodic contribution and split it across holdings
    pub fn apply_contribution(&mut self, date: NaiveDate) -> Result<()> {
        self.ensure_seeded()?;

        if date < self.settings.start_date || date > self.settings.end_date {
            return Err(DcaError::InvalidState(format!(
                "Contribution date {date} outside {} to {}",
                self.settings.start_date, self.settings.end_date
            )));
        }
        if let Some(last) = self.contribution_dates.last() {
            if date <= *last {
                return Err(DcaError::InvalidState(format!(
                    "Contribution date {date} is not after {last}"
                )));
            }
        }

        let amount = self.settings.periodic_contribution;
        self.cash_balance = checked_add(self.cash_balance, amount, "cash balance")?;
        self.total_contributed = checked_add(self.total_contributed, amount, "total contributed")?;
        self.allocate(amount, date, ContributionKind::Periodic)?;

        self.contribution_dates.push(date);
        self.phase = Phase::Running;
        Ok(())
    }

    /// Buy `amount × weight` of every holding; failures stay in cash.
    /// Overflow aborts the run.
    fn allocate(&mut self, amount: Decimal, date: NaiveDate, kind: ContributionKind) -> Result<()> {
        let mode = self.settings.purchase_mode;

        for holding in &mut self.holdings {
            let share = amount
                .checked_mul(holding.target_weight())
                .ok_or_else(|| DcaError::Overflow(format!("{} share on {date}", holding.symbol())))?;
            match holding.purchase(share, date, mode) {
                Ok(fill) => {
                    self.cash_balance = self
                        .cash_balance
                        .checked_sub(fill.spent)
                        .ok_or_else(|| DcaError::Overflow("cash balance".into()))?;
                }
                Err(err @ DcaError::Overflow(_)) => return Err(err),
                Err(err) => {
                    tracing::warn!(
                        symbol = holding.symbol(),
                        %date,
                        amount = %share,
                        error = %err,
                        "purchase skipped"
                    );
                    self.skipped.push(SkippedPurchase {
                        symbol: holding.symbol().to_string(),
                        date,
                        kind,
                        amount: share,
                        reason: err.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn ensure_seeded(&self) -> Result<()> {
        if self.phase == Phase::Uninitialized {
            return Err(DcaError::InvalidState("Portfolio has not been seeded".into()));
        }
        Ok(())
    }

    /// Holdings at each series' last close, plus cash
    pub fn current_value(&self) -> Result<Decimal> {
        self.ensure_seeded()?;
        self.holdings.iter().try_fold(self.cash_balance, |total, holding| {
            checked_add(total, holding.latest_value()?, "portfolio value")
        })
    }

    /// Holdings at the most recent close on or before `date`, plus cash
    pub fn value_as_of(&self, date: NaiveDate) -> Result<Decimal> {
        self.ensure_seeded()?;
        let mut total = self.cash_balance;
        for holding in &self.holdings {
            total = checked_add(total, holding.value_as_of(date)?, "portfolio value")?;
        }
        Ok(total)
    }

    /// Total contributed so far
    pub const fn cost_basis(&self) -> Decimal {
        self.total_contributed
    }

    /// Capital sitting in holdings
    pub fn deployed_capital(&self) -> Decimal {
        self.holdings.iter().map(Holding::capital_committed).sum()
    }

    pub const fn cash_balance(&self) -> Decimal {
        self.cash_balance
    }

    pub const fn phase(&self) -> Phase {
        self.phase
    }

    pub const fn settings(&self) -> &ContributionSettings {
        &self.settings
    }

    pub fn holdings(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn holding(&self, symbol: &str) -> Option<&Holding> {
        let symbol = symbol.trim().to_uppercase();
        self.holdings.iter().find(|h| h.symbol() == symbol)
    }

    pub fn snapshots(&self) -> Vec<HoldingSnapshot> {
        self.holdings.iter().map(Holding::snapshot).collect()
    }

    pub fn contribution_dates(&self) -> &[NaiveDate] {
        &self.contribution_dates
    }

    pub fn skipped(&self) -> &[SkippedPurchase] {
        &self.skipped
    }
}

fn checked_add(a: Decimal, b: Decimal, what: &str) -> Result<Decimal> {
    a.checked_add(b)
        .ok_or_else(|| DcaError::Overflow(format!("{what} exceeds the decimal range")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::series::PriceSeries;
    use chrono::Weekday;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekdays(from: NaiveDate, to: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        from.iter_days()
            .take_while(move |d| *d <= to)
            .filter(|d| !matches!(d.weekday(), Weekday::Sat | Weekday::Sun))
    }

    /// Flat-priced weekday series, minus `closed`
    fn flat(symbol: &str, price: Decimal, closed: &[NaiveDate]) -> Arc<PriceSeries> {
        let closes = weekdays(day(2023, 1, 1), day(2023, 6, 30))
            .filter(|d| !closed.contains(d))
            .map(|d| (d, price));
        Arc::new(PriceSeries::from_closes(symbol, closes).unwrap())
    }

    fn two_asset_portfolio(periodic: Decimal, b_closed: &[NaiveDate]) -> Portfolio {
        let settings = ContributionSettings::new(dec!(1000), periodic, day(2023, 1, 3), day(2023, 6, 30));
        let mut portfolio = Portfolio::new(settings).unwrap();
        portfolio
            .add_holding(Holding::for_series(flat("A", dec!(100), &[]), dec!(0.6)).unwrap())
            .unwrap();
        portfolio
            .add_holding(Holding::for_series(flat("B", dec!(50), b_closed), dec!(0.4)).unwrap())
            .unwrap();
        portfolio
    }

    /// cash == initial + periodic applied - deployed
    fn assert_cash_identity(portfolio: &Portfolio) {
        let settings = portfolio.settings();
        let periodic_in = settings.periodic_contribution
            * Decimal::from(portfolio.contribution_dates().len());
        assert_eq!(
            portfolio.cash_balance(),
            settings.initial_contribution + periodic_in - portfolio.deployed_capital()
        );
        assert_eq!(
            portfolio.cost_basis(),
            settings.initial_contribution + periodic_in
        );
    }

    #[test]
    fn test_seed_splits_by_weight() {
        let mut portfolio = two_asset_portfolio(dec!(100), &[]);
        portfolio.seed().unwrap();

        assert_eq!(portfolio.holding("A").unwrap().units_held(), dec!(6));
        assert_eq!(portfolio.holding("b").unwrap().units_held(), dec!(8));
        assert_eq!(portfolio.cash_balance(), Decimal::ZERO);
        assert_eq!(portfolio.cost_basis(), dec!(1000));
        assert_eq!(portfolio.phase(), Phase::Seeded);
        assert_eq!(portfolio.current_value().unwrap(), dec!(1000));
    }

    #[test]
    fn test_lifecycle_is_enforced() {
        let mut portfolio = two_asset_portfolio(dec!(100), &[]);
        assert!(matches!(portfolio.current_value(), Err(DcaError::InvalidState(_))));
        assert!(matches!(
            portfolio.apply_contribution(day(2023, 2, 3)),
            Err(DcaError::InvalidState(_))
        ));

        portfolio.seed().unwrap();
        assert!(matches!(portfolio.seed(), Err(DcaError::InvalidState(_))));
        let late = Holding::for_series(flat("C", dec!(10), &[]), dec!(0)).unwrap();
        assert!(matches!(portfolio.add_holding(late), Err(DcaError::InvalidState(_))));

        portfolio.apply_contribution(day(2023, 2, 3)).unwrap();
        assert_eq!(portfolio.phase(), Phase::Running);
        assert!(matches!(
            portfolio.apply_contribution(day(2023, 2, 3)),
            Err(DcaError::InvalidState(_))
        ));
        assert!(matches!(
            portfolio.apply_contribution(day(2023, 7, 3)),
            Err(DcaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_invalid_configuration_fails_fast() {
        let start = day(2023, 1, 3);
        let end = day(2023, 6, 30);
        assert!(Portfolio::new(ContributionSettings::new(dec!(-1), dec!(100), start, end)).is_err());
        assert!(Portfolio::new(ContributionSettings::new(dec!(1), dec!(-100), start, end)).is_err());
        assert!(Portfolio::new(ContributionSettings::new(dec!(1), dec!(100), end, start)).is_err());
        assert!(Portfolio::new(
            ContributionSettings::new(dec!(1), dec!(100), start, end).with_contribution_day(40)
        )
        .is_err());

        let mut empty = Portfolio::new(ContributionSettings::new(dec!(1), dec!(1), start, end)).unwrap();
        assert!(matches!(empty.seed(), Err(DcaError::InvalidConfiguration(_))));

        let mut portfolio = two_asset_portfolio(dec!(100), &[]);
        let duplicate = Holding::for_series(flat("A", dec!(1), &[]), dec!(0.1)).unwrap();
        assert!(matches!(
            portfolio.add_holding(duplicate),
            Err(DcaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_periodic_contributions_follow_schedule() {
        let mut portfolio = two_asset_portfolio(dec!(100), &[]);
        portfolio.seed().unwrap();

        // Anchor day 3: Feb 3 Fri, Mar 3 Fri, Apr 3 Mon, May 3 Wed, Jun 3 Sat -> Jun 5
        let applied = portfolio.run_periodic_contributions(day(2023, 2, 1)).unwrap();
        assert_eq!(applied, 5);
        assert_eq!(
            portfolio.contribution_dates(),
            &[day(2023, 2, 3), day(2023, 3, 3), day(2023, 4, 3), day(2023, 5, 3), day(2023, 6, 5)]
        );
        assert_eq!(portfolio.holding("A").unwrap().units_held(), dec!(9));
        assert_eq!(portfolio.holding("B").unwrap().units_held(), dec!(12));
        assert_eq!(portfolio.cost_basis(), dec!(1500));
        assert_eq!(portfolio.cash_balance(), Decimal::ZERO);
        assert_cash_identity(&portfolio);

        // Re-running applies nothing new
        assert_eq!(portfolio.run_periodic_contributions(day(2023, 2, 1)).unwrap(), 0);
        assert_eq!(portfolio.cost_basis(), dec!(1500));
    }

    #[test]
    fn test_schedule_start_must_be_within_bounds() {
        let mut portfolio = two_asset_portfolio(dec!(100), &[]);
        portfolio.seed().unwrap();
        assert!(matches!(
            portfolio.run_periodic_contributions(day(2022, 12, 1)),
            Err(DcaError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_missing_price_is_isolated_per_holding() {
        let mut portfolio = two_asset_portfolio(dec!(100), &[day(2023, 3, 3)]);
        portfolio.seed().unwrap();
        portfolio.apply_contribution(day(2023, 2, 3)).unwrap();
        portfolio.apply_contribution(day(2023, 3, 3)).unwrap();

        // A bought both months, B only February
        assert_eq!(portfolio.holding("A").unwrap().units_held(), dec!(7.2));
        assert_eq!(portfolio.holding("B").unwrap().units_held(), dec!(8.8));

        let skipped = portfolio.skipped();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].symbol, "B");
        assert_eq!(skipped[0].date, day(2023, 3, 3));
        assert_eq!(skipped[0].kind, ContributionKind::Periodic);
        assert_eq!(skipped[0].amount, dec!(40));

        // Full contribution counted, B's share stays in cash
        assert_eq!(portfolio.cost_basis(), dec!(1200));
        assert_eq!(portfolio.cash_balance(), dec!(40));
        assert_cash_identity(&portfolio);
        assert_eq!(portfolio.current_value().unwrap(), dec!(1200));
    }

    #[test]
    fn test_seed_failure_does_not_abort_other_holdings() {
        let mut portfolio = two_asset_portfolio(dec!(100), &[day(2023, 1, 3)]);
        portfolio.seed().unwrap();

        assert_eq!(portfolio.holding("A").unwrap().units_held(), dec!(6));
        assert_eq!(portfolio.holding("B").unwrap().units_held(), Decimal::ZERO);
        assert_eq!(portfolio.skipped()[0].kind, ContributionKind::Initial);
        assert_eq!(portfolio.cash_balance(), dec!(400));
        assert_cash_identity(&portfolio);
    }

    #[test]
    fn test_whole_units_credit_remainder_to_cash() {
        let settings = ContributionSettings::new(dec!(1000), dec!(250), day(2023, 1, 3), day(2023, 6, 30))
            .with_purchase_mode(PurchaseMode::WholeUnits);
        let mut portfolio = Portfolio::new(settings).unwrap();
        portfolio
            .add_holding(Holding::for_series(flat("A", dec!(300), &[]), dec!(1)).unwrap())
            .unwrap();

        portfolio.seed().unwrap();
        // 3 units at 300, 100 left over
        assert_eq!(portfolio.holding("A").unwrap().units_held(), dec!(3));
        assert_eq!(portfolio.cash_balance(), dec!(100));

        // 250 buys nothing at 300
        portfolio.apply_contribution(day(2023, 2, 3)).unwrap();
        assert_eq!(portfolio.cash_balance(), dec!(350));
        assert_cash_identity(&portfolio);
        assert_eq!(portfolio.current_value().unwrap(), dec!(1250));
    }

    #[test]
    fn test_valuation_is_idempotent() {
        let mut portfolio = two_asset_portfolio(dec!(100), &[]);
        portfolio.seed().unwrap();
        portfolio.run_periodic_contributions(day(2023, 1, 3)).unwrap();

        let first = portfolio.current_value().unwrap();
        let second = portfolio.current_value().unwrap();
        assert_eq!(first, second);
        assert_eq!(
            portfolio.value_as_of(day(2023, 6, 30)).unwrap(),
            portfolio.value_as_of(day(2023, 6, 30)).unwrap()
        );
    }

    #[test]
    fn test_each_contribution_is_split_without_rebalancing() {
        // A doubles after seeding, B stays flat
        let a_closes = weekdays(day(2023, 1, 1), day(2023, 3, 31))
            .map(|d| (d, if d < day(2023, 2, 1) { dec!(100) } else { dec!(200) }));
        let a = Arc::new(PriceSeries::from_closes("A", a_closes).unwrap());
        let b_closes = weekdays(day(2023, 1, 1), day(2023, 3, 31)).map(|d| (d, dec!(100)));
        let b = Arc::new(PriceSeries::from_closes("B", b_closes).unwrap());

        let settings = ContributionSettings::new(dec!(1000), dec!(1000), day(2023, 1, 3), day(2023, 3, 31));
        let mut portfolio = Portfolio::new(settings).unwrap();
        portfolio.add_holding(Holding::for_series(a, dec!(0.5)).unwrap()).unwrap();
        portfolio.add_holding(Holding::for_series(b, dec!(0.5)).unwrap()).unwrap();
        portfolio.seed().unwrap();
        portfolio.apply_contribution(day(2023, 2, 3)).unwrap();

        // New money is split 50/50 regardless of A's run-up
        let a = portfolio.holding("A").unwrap();
        let b = portfolio.holding("B").unwrap();
        assert_eq!(a.capital_committed(), dec!(1000));
        assert_eq!(b.capital_committed(), dec!(1000));
        assert_eq!(a.units_held(), dec!(7.5));
        assert_eq!(b.units_held(), dec!(10));

        // Realized weights drift away from 50/50
        let a_value = a.latest_value().unwrap();
        let total = portfolio.current_value().unwrap();
        assert_eq!(a_value, dec!(1500));
        assert_eq!(total, dec!(2500));
        assert_eq!(a_value / total, dec!(0.6));
    }

    #[test]
    fn test_zero_weight_holding_receives_nothing() {
        let settings = ContributionSettings::new(dec!(1000), dec!(100), day(2023, 1, 3), day(2023, 6, 30));
        let mut portfolio = Portfolio::new(settings).unwrap();
        portfolio
            .add_holding(Holding::for_series(flat("A", dec!(100), &[]), dec!(1)).unwrap())
            .unwrap();
        portfolio
            .add_holding(Holding::for_series(flat("B", dec!(50), &[]), dec!(0)).unwrap())
            .unwrap();
        portfolio.seed().unwrap();

        let b = portfolio.holding("B").unwrap();
        assert_eq!(b.units_held(), Decimal::ZERO);
        assert!(b.purchases().is_empty());
        assert!(portfolio.skipped().is_empty());
    }

    #[test]
    fn test_huge_contributions_overflow_as_error() {
        let half = Decimal::MAX / dec!(2);
        let settings = ContributionSettings::new(half, half, day(2023, 1, 3), day(2023, 3, 31));
        let mut portfolio = Portfolio::new(settings).unwrap();
        portfolio
            .add_holding(Holding::for_series(flat("A", dec!(100), &[]), dec!(1)).unwrap())
            .unwrap();

        portfolio.seed().unwrap();
        assert!(matches!(
            portfolio.run_periodic_contributions(day(2023, 2, 1)),
            Err(DcaError::Overflow(_))
        ));
    }
}
