//! Snapshot lifecycle: generate, edit, approve, delete.
//!
//! ```text
//! NoSchedule ──generate──▶ Draft ──approve──▶ Approved
//!                            │                   │
//!                            └──── generate ─────┴──▶ Superseded (kept)
//!                            └──── delete ───────┴──▶ Deleted (gone)
//! ```
//!
//! Access gating (which user may touch which mosque) happens before these calls;
//! every record carries its `mosque_id` so the caller can apply it.

use chrono::Datelike;
use jamaat_rules::{generate, preview, SchedulePreview};
use jamaat_types::{
    Dependency, DayEdit, GeneratedDayTiming, JamaatError, ManualEdit, MosqueId, MosqueScheduleSnapshot, Result,
    SnapshotId, DAYS_IN_TABLE,
};
use log::{info, warn};

use crate::clock::{Clock, SystemClock};
use crate::store::{SnapshotStore, TimetableSource};

/// Default cap on preview windows.
pub const MAX_PREVIEW_DAYS: usize = 31;

/// Owns the per-mosque snapshot workflow on top of a store.
pub struct ScheduleManager<S> {
    store: S,
    clock: Box<dyn Clock>,
    max_preview_days: usize,
}

impl<S> ScheduleManager<S>
where
    S: TimetableSource + SnapshotStore,
{
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: Box::new(SystemClock),
            max_preview_days: MAX_PREVIEW_DAYS,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_max_preview_days(mut self, days: usize) -> Self {
        self.max_preview_days = days.clamp(1, DAYS_IN_TABLE);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Generates a new Draft for the mosque and makes it the active snapshot.
    ///
    /// The previous active snapshot, if any, is superseded in the same atomic
    /// step. Versions restart at 1 for every generation.
    ///
    /// # Errors
    /// `MissingDependency` without a base table or mosque config; `Conflict`
    /// if another writer replaced the active snapshot meanwhile.
    pub fn generate(&self, mosque_id: &MosqueId, generated_by: &str) -> Result<MosqueScheduleSnapshot> {
        let table = self
            .store
            .base_table()?
            .ok_or_else(|| JamaatError::missing_dependency(mosque_id, Dependency::BaseTimetable))?;
        let config = self
            .store
            .mosque_config(mosque_id)?
            .ok_or_else(|| JamaatError::missing_dependency(mosque_id, Dependency::MosqueConfig))?;

        let current = self.store.active(mosque_id)?;
        let now = self.clock.now();
        let year = now.year();
        let days = generate(&table, &config, year);

        let draft = MosqueScheduleSnapshot {
            id: SnapshotId(0),
            mosque_id: mosque_id.clone(),
            source_base_timing_ref: table.reference().to_string(),
            year,
            config_snapshot: config,
            days,
            version: 1,
            is_approved: false,
            approved_by: None,
            approved_at: None,
            is_active: true,
            generated_by: generated_by.to_string(),
            generated_at: now,
        };

        let expected = current.as_ref().map(|s| s.id);
        let stored = self
            .store
            .replace_active(expected, draft)
            .inspect_err(|e| warn!("generate for mosque {} lost the active slot: {}", mosque_id, e))?;

        match expected {
            Some(previous) => info!(
                "mosque {}: snapshot {} supersedes {} (year {}, by {})",
                mosque_id, stored.id, previous, year, generated_by
            ),
            None => info!(
                "mosque {}: first snapshot {} generated (year {}, by {})",
                mosque_id, stored.id, year, generated_by
            ),
        }
        Ok(stored)
    }

    /// Marks the active Draft as approved.
    ///
    /// # Errors
    /// `NotFound` without an active snapshot; `Conflict` if it is already approved.
    pub fn approve(&self, mosque_id: &MosqueId, approver: &str) -> Result<MosqueScheduleSnapshot> {
        let current = self.require_active(mosque_id)?;
        if current.is_approved {
            return Err(JamaatError::conflict(format!(
                "snapshot {} for mosque {} is already approved",
                current.id, mosque_id
            )));
        }

        let mut approved = current.clone();
        approved.is_approved = true;
        approved.approved_by = Some(approver.to_string());
        approved.approved_at = Some(self.clock.now());

        self.commit(&current, approved, "approve").inspect(|s| {
            info!("mosque {}: snapshot {} approved by {}", mosque_id, s.id, approver);
        })
    }

    /// Overwrites fields of one day of the active snapshot and bumps its version.
    ///
    /// # Errors
    /// `InvalidArgument` for a day outside 1..=366 or an empty edit; `NotFound`
    /// without an active snapshot; `Conflict` on a concurrent write.
    pub fn edit_day(
        &self,
        mosque_id: &MosqueId,
        day_number: u16,
        edit: &DayEdit,
        editor: &str,
        reason: Option<&str>,
    ) -> Result<MosqueScheduleSnapshot> {
        check_day_number(day_number)?;
        if edit.is_empty() {
            return Err(JamaatError::invalid_argument("day edit changes no fields"));
        }

        let current = self.require_active(mosque_id)?;
        let mut edited = current.clone();
        let day: &mut GeneratedDayTiming = edited
            .days
            .get_mut(day_number as usize - 1)
            .ok_or_else(|| JamaatError::internal(format!("snapshot {} has no day {}", current.id, day_number)))?;
        edit.apply_to(day);
        day.manual_edit = Some(ManualEdit {
            edited_by: editor.to_string(),
            edited_at: self.clock.now(),
            reason: reason.map(str::to_string),
        });
        edited.version = current
            .version
            .checked_add(1)
            .ok_or_else(|| JamaatError::internal(format!("snapshot {} version overflow", current.id)))?;

        self.commit(&current, edited, "edit").inspect(|s| {
            info!(
                "mosque {}: day {} of snapshot {} edited by {} (version {})",
                mosque_id, day_number, s.id, editor, s.version
            );
        })
    }

    /// Permanently removes the active snapshot. Superseded history is untouched.
    ///
    /// # Errors
    /// `NotFound` without an active snapshot.
    pub fn delete(&self, mosque_id: &MosqueId) -> Result<MosqueScheduleSnapshot> {
        let current = self.require_active(mosque_id)?;
        let removed = self
            .store
            .delete_active(mosque_id, current.id)
            .inspect_err(|e| warn!("delete for mosque {} failed: {}", mosque_id, e))?;
        info!("mosque {}: snapshot {} deleted", mosque_id, removed.id);
        Ok(removed)
    }

    /// The active snapshot, if any.
    pub fn active(&self, mosque_id: &MosqueId) -> Result<Option<MosqueScheduleSnapshot>> {
        self.store.active(mosque_id)
    }

    /// All stored snapshots for the mosque, newest first.
    pub fn history(&self, mosque_id: &MosqueId) -> Result<Vec<MosqueScheduleSnapshot>> {
        self.store.history(mosque_id)
    }

    /// One day of the active snapshot.
    pub fn day(&self, mosque_id: &MosqueId, day_number: u16) -> Result<GeneratedDayTiming> {
        check_day_number(day_number)?;
        let snapshot = self.require_active(mosque_id)?;
        snapshot
            .day(day_number)
            .cloned()
            .ok_or_else(|| JamaatError::internal(format!("snapshot {} has no day {}", snapshot.id, day_number)))
    }

    /// Previews the mosque's next `window_days` days without storing anything.
    ///
    /// The window is clamped to `1..=max_preview_days`.
    pub fn preview(&self, mosque_id: &MosqueId, window_days: usize) -> Result<SchedulePreview> {
        let table = self
            .store
            .base_table()?
            .ok_or_else(|| JamaatError::missing_dependency(mosque_id, Dependency::BaseTimetable))?;
        let config = self
            .store
            .mosque_config(mosque_id)?
            .ok_or_else(|| JamaatError::missing_dependency(mosque_id, Dependency::MosqueConfig))?;
        let window = window_days.clamp(1, self.max_preview_days);
        Ok(preview(&table, &config, window, self.clock.today()))
    }

    fn require_active(&self, mosque_id: &MosqueId) -> Result<MosqueScheduleSnapshot> {
        self.store
            .active(mosque_id)?
            .ok_or_else(|| JamaatError::not_found(format!("no active snapshot for mosque {}", mosque_id)))
    }

    fn commit(
        &self,
        current: &MosqueScheduleSnapshot,
        updated: MosqueScheduleSnapshot,
        operation: &str,
    ) -> Result<MosqueScheduleSnapshot> {
        self.store
            .update_active(current, updated.clone())
            .inspect_err(|e| warn!("{} on mosque {} failed: {}", operation, current.mosque_id, e))?;
        Ok(updated)
    }
}

fn check_day_number(day_number: u16) -> Result<()> {
    if (1..=DAYS_IN_TABLE as u16).contains(&day_number) {
        Ok(())
    } else {
        Err(JamaatError::invalid_argument(format!(
            "day number {} is outside 1..={}",
            day_number, DAYS_IN_TABLE
        )))
    }
}
