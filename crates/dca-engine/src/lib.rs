//! # dca-engine
//!
//! Dollar-cost averaging backtests over historical daily closes.
//!
//! Given an initial lump sum, a fixed monthly contribution and a weighted
//! basket of instruments, the engine works out how many (fractional) units
//! each contribution would have bought, and what the position is worth.
//!
//! ## Flow
//!
//! ```text
//! ┌────────────┐   ┌─────────────┐   ┌──────────────────────────────────┐
//! │ PriceFeed  │──▶│  PriceBook  │──▶│ Portfolio                        │
//! │ (mock/file │   │ symbol ->   │   │  seed()          initial lump    │
//! │  + cache)  │   │ Arc<Series> │   │  run_periodic..  monthly, via    │
//! └────────────┘   └─────────────┘   │                  AllocationSched │
//!                                    │  current_value() units × close   │
//!                                    │                  + cash          │
//!                                    └──────────────────────────────────┘
//! ```
//!
//! ## Example: $10,000 up front, $2,000 a month
//!
//! ```rust,ignore
//! use dca_engine::{Simulation, SimulationConfig, feed::{MockPriceFeed, PriceFeed}};
//! use rust_decimal_macros::dec;
//!
//! let config = SimulationConfig::new(dec!(10000), dec!(2000), start, end)
//!     .allocate("VGT", dec!(0.3))
//!     .allocate("VOO", dec!(0.7))
//!     .with_schedule_start(first_monthly);
//!
//! let simulation = Simulation::new(config)?;
//! let loaded = MockPriceFeed::new().histories(&simulation.config().symbols(), start, end).await;
//! let report = simulation.run(&loaded.book)?;
//! println!("{}", report.summary());
//! ```

pub mod error;
pub mod feed;
pub mod model;
pub mod portfolio;
pub mod series;
pub mod simulation;
pub mod strategy;

pub use error::{DcaError, Result};
pub use model::{Fill, Holding, HoldingSnapshot, Purchase, PurchaseMode, TargetAllocation};
pub use portfolio::{ContributionKind, ContributionSettings, Phase, Portfolio, SkippedPurchase};
pub use series::{PriceBar, PriceBook, PriceSeries};
pub use simulation::{Simulation, SimulationConfig, SimulationReport};
pub use strategy::AllocationSchedule;
