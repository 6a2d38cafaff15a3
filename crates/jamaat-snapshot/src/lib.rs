//! Versioned yearly schedules per mosque.
//!
//! [`ScheduleManager`] drives the Draft → Approved → Superseded lifecycle on
//! top of any store implementing [`TimetableSource`] and [`SnapshotStore`].
//! [`InMemoryStore`] implements both.

pub mod clock;
pub mod manager;
pub mod memory;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use manager::{ScheduleManager, MAX_PREVIEW_DAYS};
pub use memory::InMemoryStore;
pub use store::{SnapshotStore, TimetableSource};
