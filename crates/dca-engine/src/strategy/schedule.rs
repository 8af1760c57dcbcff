//! Monthly Contribution Schedule
//!
//! Maps a "day of month" plan onto dates that actually trade. Markets close
//! on weekends and holidays, so each month's target day is resolved against
//! the price series rather than the calendar alone.

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{DcaError, Result};
use crate::series::PriceSeries;

/// Monthly schedule bounds and anchor day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationSchedule {
    /// First date a contribution may land on
    pub start: NaiveDate,

    /// Last date a contribution may land on
    pub end: NaiveDate,

    /// Anchor day (1-31), clamped to the month's last day in short months
    pub day_of_month: u32,

    /// When the forward scan runs out of month, fall back to the latest
    /// earlier trading day of that month instead of skipping it
    #[serde(default)]
    pub backfill_month_end: bool,
}

impl AllocationSchedule {
    pub fn new(start: NaiveDate, end: NaiveDate, day_of_month: u32) -> Result<Self> {
        if start > end {
            return Err(DcaError::InvalidConfiguration(format!(
                "Schedule start {start} is after end {end}"
            )));
        }
        if !(1..=31).contains(&day_of_month) {
            return Err(DcaError::InvalidConfiguration(format!(
                "Day of month must be within 1-31, got {day_of_month}"
            )));
        }

        Ok(Self {
            start,
            end,
            day_of_month,
            backfill_month_end: false,
        })
    }

    #[must_use]
    pub const fn with_backfill(mut self, enabled: bool) -> Self {
        self.backfill_month_end = enabled;
        self
    }

    /// Trading dates for every month in range, ascending, at most one per month
    pub fn dates(&self, series: &PriceSeries) -> Vec<NaiveDate> {
        let mut dates = Vec::new();
        let mut cursor = first_of_month(self.start);

        while let Some(month_start) = cursor {
            if month_start > self.end {
                break;
            }

            let Some(target) = target_in_month(month_start, self.day_of_month) else {
                break;
            };
            if target > self.end {
                break;
            }

            match self.resolve(series, target) {
                Some(date) => dates.push(date),
                None => tracing::debug!(
                    symbol = series.symbol(),
                    month = %month_start.format("%Y-%m"),
                    "no trading date for contribution month"
                ),
            }

            cursor = month_start.checked_add_months(Months::new(1));
        }

        dates
    }

    /// Pick the trading date for one month's target
    fn resolve(&self, series: &PriceSeries, target: NaiveDate) -> Option<NaiveDate> {
        // The anchor day already passed in the first month
        if target < self.start {
            return None;
        }

        if series.has_price(target) {
            return Some(target);
        }

        let month = target.month();
        let forward = std::iter::successors(target.succ_opt(), |d| d.succ_opt())
            .take_while(|d| d.month() == month && *d <= self.end)
            .find(|d| series.has_price(*d));
        if forward.is_some() || !self.backfill_month_end {
            return forward;
        }

        std::iter::successors(target.pred_opt(), |d| d.pred_opt())
            .take_while(|d| d.month() == month && *d >= self.start)
            .find(|d| series.has_price(*d))
    }
}

fn first_of_month(date: NaiveDate) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
}

fn last_of_month(month_start: NaiveDate) -> Option<NaiveDate> {
    month_start
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
}

/// `day` within the month starting at `month_start`, clamped to its last day
fn target_in_month(month_start: NaiveDate, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(month_start.year(), month_start.month(), day)
        .or_else(|| last_of_month(month_start))
}
