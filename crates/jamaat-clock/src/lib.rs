//! Minute-precision clock arithmetic for jamaat.
//!
//! - [`adjust_time`] / [`adjust_time_with_carry`]: shift a time by whole minutes.
//! - [`round_time`]: snap a time onto a 5/10/15-minute grid.
//! - [`detect_trend`]: day-over-day drift, used to pick a rounding direction.

pub mod adjust;
pub mod trend;

pub use adjust::{adjust_time, adjust_time_with_carry, round_time, RoundingDirection};
pub use trend::{detect_trend, Trend};
