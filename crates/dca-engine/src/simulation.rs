//! Simulation Runner
//!
//! Validates a `SimulationConfig`, binds each allocation to its price series
//! and drives a `Portfolio` from seed to valuation.

use std::collections::HashSet;

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DcaError, Result};
use crate::model::{Holding, HoldingSnapshot, PurchaseMode, TargetAllocation};
use crate::portfolio::{ContributionSettings, Portfolio, SkippedPurchase};
use crate::series::PriceBook;

/// Everything needed to replay one DCA plan
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub initial_contribution: Decimal,
    pub periodic_contribution: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    /// Ordered `(symbol, weight)` pairs
    pub allocations: Vec<TargetAllocation>,

    /// Defaults to the start date's day of month
    #[serde(default)]
    pub contribution_day: Option<u32>,

    /// First date periodic contributions may land on. Defaults to the first of
    /// the month after the start date, so the seed day gets the initial
    /// contribution only.
    #[serde(default)]
    pub schedule_start: Option<NaiveDate>,

    #[serde(default)]
    pub purchase_mode: PurchaseMode,

    #[serde(default)]
    pub backfill_month_end: bool,
}

impl SimulationConfig {
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
            allocations: Vec::new(),
            contribution_day: None,
            schedule_start: None,
            purchase_mode: PurchaseMode::default(),
            backfill_month_end: false,
        }
    }

    #[must_use]
    pub fn allocate(mut self, symbol: impl Into<String>, weight: Decimal) -> Self {
        self.allocations.push(TargetAllocation::new(symbol, weight));
        self
    }

    #[must_use]
    pub const fn with_schedule_start(mut self, date: NaiveDate) -> Self {
        self.schedule_start = Some(date);
        self
    }

    #[must_use]
    pub const fn with_contribution_day(mut self, day: u32) -> Self {
        self.contribution_day = Some(day);
        self
    }

    #[must_use]
    pub const fn with_purchase_mode(mut self, mode: PurchaseMode) -> Self {
        self.purchase_mode = mode;
        self
    }

    pub fn schedule_start(&self) -> NaiveDate {
        self.schedule_start.unwrap_or_else(|| {
            self.start_date
                .with_day(1)
                .and_then(|first| first.checked_add_months(Months::new(1)))
                .unwrap_or(self.start_date)
        })
    }

    pub fn settings(&self) -> ContributionSettings {
        ContributionSettings::new(
            self.initial_contribution,
            self.periodic_contribution,
            self.start_date,
            self.end_date,
        )
        .with_contribution_day(self.contribution_day.unwrap_or_else(|| self.start_date.day()))
        .with_purchase_mode(self.purchase_mode)
        .with_backfill(self.backfill_month_end)
    }

    pub fn symbols(&self) -> Vec<&str> {
        self.allocations.iter().map(|a| a.symbol.as_str()).collect()
    }

    pub fn validate(&self) -> Result<()> {
        self.settings().validate()?;

        if self.allocations.is_empty() {
            return Err(DcaError::InvalidConfiguration(
                "At least one allocation is required".into(),
            ));
        }

        let mut seen = HashSet::new();
        for allocation in &self.allocations {
            allocation.validate()?;
            if !seen.insert(allocation.symbol.trim().to_uppercase()) {
                return Err(DcaError::InvalidConfiguration(format!(
                    "Duplicate allocation for {}",
                    allocation.symbol
                )));
            }
        }

        if let Some(schedule_start) = self.schedule_start {
            if schedule_start < self.start_date || schedule_start > self.end_date {
                return Err(DcaError::InvalidConfiguration(format!(
                    "Schedule start {schedule_start} outside {} to {}",
                    self.start_date, self.end_date
                )));
            }
        }

        Ok(())
    }
}

/// Result of a completed run
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub run_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_contributed: Decimal,
    pub cash_balance: Decimal,
    pub current_value: Decimal,
    pub holdings: Vec<HoldingSnapshot>,
    pub contribution_dates: Vec<NaiveDate>,
    pub skipped: Vec<SkippedPurchase>,
}

impl SimulationReport {
    pub fn from_portfolio(portfolio: &Portfolio) -> Result<Self> {
        let settings = portfolio.settings();
        Ok(Self {
            run_id: Uuid::new_v4(),
            start_date: settings.start_date,
            end_date: settings.end_date,
            total_contributed: portfolio.cost_basis(),
            cash_balance: portfolio.cash_balance(),
            current_value: portfolio.current_value()?,
            holdings: portfolio.snapshots(),
            contribution_dates: portfolio.contribution_dates().to_vec(),
            skipped: portfolio.skipped().to_vec(),
        })
    }

    pub fn holding(&self, symbol: &str) -> Option<&HoldingSnapshot> {
        let symbol = symbol.trim().to_uppercase();
        self.holdings.iter().find(|h| h.symbol == symbol)
    }

    /// Text summary for logs and terminals
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!(
            "DCA simulation {} to {}\n",
            self.start_date, self.end_date
        ));
        s.push_str(&format!("Contributions: {}\n", self.contribution_dates.len() + 1));
        s.push_str(&format!("Total contributed: ${:.2}\n", self.total_contributed));
        s.push_str(&format!("Current value:     ${:.2}\n", self.current_value));
        s.push_str(&format!("Cash:              ${:.2}\n", self.cash_balance));

        for holding in &self.holdings {
            s.push_str(&format!(
                "  {:<6} {:>14.6} units  ${:>12.2} committed\n",
                holding.symbol, holding.units_held, holding.capital_committed
            ));
        }

        if !self.skipped.is_empty() {
            s.push_str(&format!("Skipped purchases: {}\n", self.skipped.len()));
        }

        s
    }
}

/// A validated plan, ready to run against loaded prices
#[derive(Clone, Debug)]
pub struct Simulation {
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub const fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Build an unseeded portfolio with one holding per allocation
    pub fn portfolio(&self, book: &PriceBook) -> Result<Portfolio> {
        let mut portfolio = Portfolio::new(self.config.settings())?;
        for allocation in &self.config.allocations {
            let series = book.series(&allocation.symbol)?;
            portfolio.add_holding(Holding::new(&allocation.symbol, allocation.weight, series)?)?;
        }
        Ok(portfolio)
    }

    /// Seed, apply every periodic contribution, and value the result
    pub fn run(&self, book: &PriceBook) -> Result<SimulationReport> {
        let mut portfolio = self.portfolio(book)?;
        portfolio.seed()?;

        // A window shorter than a month only gets the initial contribution
        let schedule_start = self.config.schedule_start();
        if schedule_start <= self.config.end_date {
            portfolio.run_periodic_contributions(schedule_start)?;
        }

        let report = SimulationReport::from_portfolio(&portfolio)?;
        tracing::info!(
            run_id = %report.run_id,
            total_contributed = %report.total_contributed,
            current_value = %report.current_value,
            skipped = report.skipped.len(),
            "simulation complete"
        );
        Ok(report)
    }
}
