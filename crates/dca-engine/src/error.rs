//! Error Types for the DCA Engine

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, DcaError>;

#[derive(Error, Debug)]
pub enum DcaError {
    /// No close on the requested date (weekend, holiday, or outside the loaded range)
    #[error("Price unavailable for {symbol} on {date}")]
    PriceUnavailable { symbol: String, date: NaiveDate },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Lifecycle misuse, e.g. contributing before seeding
    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Invalid price for {symbol} on {date}: {price}")]
    InvalidPrice {
        symbol: String,
        date: NaiveDate,
        price: Decimal,
    },

    #[error("No price series loaded for {0}")]
    SeriesNotFound(String),

    #[error("Price series for {0} is empty")]
    EmptySeries(String),

    #[error("Price feed error: {0}")]
    Feed(String),

    /// Ledger arithmetic left the representable decimal range
    #[error("Arithmetic overflow: {0}")]
    Overflow(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DcaError {
    /// Errors a simulation absorbs per holding and per date instead of aborting
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::PriceUnavailable { .. })
    }

    /// Configuration problems caught before any simulation step runs
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidConfiguration(_)
                | Self::InvalidPrice { .. }
                | Self::EmptySeries(_)
                | Self::Overflow(_)
        )
    }
}
