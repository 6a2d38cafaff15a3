//! # Jamaat core
//!
//! Turns a canonical 366-day table of raw prayer times into each mosque's
//! jamaat/adhan schedule, and keeps those schedules as versioned, approvable
//! snapshots with exactly one active snapshot per mosque.
//!
//! ## Crates
//!
//! - `types`: shared records (`ClockTime`, `BaseTable`, `MosqueConfig`, snapshots) and `JamaatError`
//! - `clock`: minute arithmetic, rounding and trend detection
//! - `rules`: calculator, generator, preview and config validation
//! - `snapshot`: the snapshot lifecycle and the in-memory store
//!
//! ## Usage
//!
//! ```rust,ignore
//! use jamaat_core::prelude::*;
//!
//! let settings = EngineSettings::from_file("jamaat.toml")?;
//! let config = accept_config(&draft, &settings)?;
//! store.put_config(config);
//!
//! let manager = schedule_manager(store, &settings);
//! let draft_snapshot = manager.generate(&mosque_id, "admin")?;
//! manager.approve(&mosque_id, "imam")?;
//! ```

pub mod settings;

pub use jamaat_clock as clock;
pub use jamaat_rules as rules;
pub use jamaat_snapshot as snapshot;
pub use jamaat_types as types;

pub use jamaat_clock::{adjust_time, adjust_time_with_carry, detect_trend, round_time, RoundingDirection, Trend};
pub use jamaat_rules::{
    accept, calculate_prayer_time, generate, preview, validate, MosqueConfigBuilder, PrayerCalculation, PreviewDay,
    SchedulePreview, ValidationLimits, Violation,
};
pub use jamaat_snapshot::{
    Clock, FixedClock, InMemoryStore, ScheduleManager, SnapshotStore, SystemClock, TimetableSource,
};
pub use jamaat_types::*;
pub use settings::EngineSettings;

pub mod prelude {
    pub use crate::settings::EngineSettings;
    pub use crate::types::*;
    pub use crate::{accept_config, preview_today, schedule_manager};
    pub use crate::{Clock, InMemoryStore, MosqueConfigBuilder, ScheduleManager, SnapshotStore, TimetableSource};
}

/// Validates a config draft against the limits in `settings`.
pub fn accept_config(draft: &MosqueConfigDraft, settings: &EngineSettings) -> Result<MosqueConfig> {
    accept(draft, &settings.validation.limits())
}

/// Builds a manager whose preview cap follows `settings`.
pub fn schedule_manager<S>(store: S, settings: &EngineSettings) -> ScheduleManager<S>
where
    S: TimetableSource + SnapshotStore,
{
    ScheduleManager::new(store).with_max_preview_days(settings.preview.max_window_days)
}

/// Previews the configured default window starting at `clock`'s today.
pub fn preview_today(
    table: &BaseTable,
    config: &MosqueConfig,
    settings: &EngineSettings,
    clock: &dyn Clock,
) -> SchedulePreview {
    let window = settings.preview.window_days.min(settings.preview.max_window_days);
    preview(table, config, window, clock.today())
}
