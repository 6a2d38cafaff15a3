//! Core data types shared by the jamaat crates.

pub mod config;
pub mod error;
pub mod prayer;
pub mod schedule;
pub mod snapshot;
pub mod time;
pub mod timing;

pub use config::{
    JummahDraft, JummahOverride, MosqueConfig, MosqueConfigDraft, PrayerRule, PrayerRuleDraft, RoundingInterval,
};
pub use error::{Dependency, ErrorKind, JamaatError, Result};
pub use prayer::{Prayer, PrayerTimes};
pub use schedule::{DayEdit, GeneratedDayTiming, JamaatTimes, ManualEdit, PrayerEdit};
pub use snapshot::{MosqueId, MosqueScheduleSnapshot, SnapshotId, SnapshotStatus};
pub use time::{ClockTime, MINUTES_PER_DAY};
pub use timing::{calendar_date, grid_labels, BaseDayTiming, BaseTable, DAYS_IN_TABLE};
