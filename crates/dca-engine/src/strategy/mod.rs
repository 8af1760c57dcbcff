//! Contribution Strategies
//!
//! Calendar rules that decide when contributions are made.

mod schedule;

pub use schedule::AllocationSchedule;
