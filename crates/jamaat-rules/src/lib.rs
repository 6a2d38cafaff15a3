//! Mosque timetable rules engine.
//!
//! Turns a raw base table into a mosque's schedule:
//!
//! - [`calculate_prayer_time`]: one prayer, one day.
//! - [`generate`]: the full 366-day year, ready to persist.
//! - [`preview`]: a bounded, read-only window with calculation breakdown.
//! - [`validate`] / [`accept`] / [`MosqueConfigBuilder`]: rule-set validation.

pub mod builder;
pub mod calculator;
pub mod generator;
pub mod preview;
pub mod validator;

#[cfg(test)]
pub(crate) mod testing;

pub use builder::MosqueConfigBuilder;
pub use calculator::{calculate_prayer_time, PrayerCalculation, RoundingStep};
pub use generator::{generate, schedule_iter, DayCalculation, ScheduleIter};
pub use preview::{preview, PreviewDay, SchedulePreview};
pub use validator::{accept, validate, ValidationLimits, Violation, Violations};
