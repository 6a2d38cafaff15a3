//! # Jamaat
//!
//! Mosque prayer timetable engine: adjusts a canonical 366-day table of raw
//! prayer times into each mosque's jamaat and adhan schedule (delays, fixed
//! times, anti-drift rounding, Jummah overrides) and manages the resulting
//! yearly snapshots through a draft/approve/supersede workflow.
//!
//! This crate is a facade that re-exports functionality from the `jamaat` ecosystem.
//!
//! ## Usage
//!
//! ```rust
//! use jamaat::prelude::*;
//!
//! let config = MosqueConfigBuilder::new("mosque-1")
//!     .all_rules(PrayerRule::delayed(5).with_adhan_gap(10).with_rounding(true))
//!     .rounding_interval(10)
//!     .build()
//!     .unwrap();
//! assert_eq!(config.rounding_interval, Some(RoundingInterval::Ten));
//! ```

pub use jamaat_core::*;
