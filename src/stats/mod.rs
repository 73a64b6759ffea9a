//! Stats module - FIS points aggregates

mod calculator;

pub use calculator::StatsCalculator;
