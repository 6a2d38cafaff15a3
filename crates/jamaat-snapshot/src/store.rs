//! Collaborator seams: where base tables, configs and snapshots live.

use jamaat_types::{BaseTable, MosqueConfig, MosqueId, MosqueScheduleSnapshot, Result, SnapshotId};

/// Read access to generation inputs.
pub trait TimetableSource: Send + Sync {
    /// The current base table, if one has been uploaded.
    fn base_table(&self) -> Result<Option<BaseTable>>;

    /// The accepted config bound to `mosque_id`, if any.
    fn mosque_config(&self, mosque_id: &MosqueId) -> Result<Option<MosqueConfig>>;
}

/// Durable snapshot storage.
///
/// Every mutating call is an atomic conditional update on the mosque's active
/// slot: the store compares what the caller last read with what it holds and
/// answers `Conflict` on mismatch instead of writing. Implementations never
/// retry.
pub trait SnapshotStore: Send + Sync {
    fn active(&self, mosque_id: &MosqueId) -> Result<Option<MosqueScheduleSnapshot>>;

    /// Deactivates the active snapshot (if its id is `expected`) and inserts
    /// `snapshot` as the new active one, assigning its id.
    ///
    /// `expected = None` asserts the mosque currently has no active snapshot.
    fn replace_active(
        &self,
        expected: Option<SnapshotId>,
        snapshot: MosqueScheduleSnapshot,
    ) -> Result<MosqueScheduleSnapshot>;

    /// Overwrites the active snapshot, provided it still equals `expected`.
    fn update_active(&self, expected: &MosqueScheduleSnapshot, updated: MosqueScheduleSnapshot) -> Result<()>;

    /// Permanently removes the active snapshot, provided its id is `expected`.
    fn delete_active(&self, mosque_id: &MosqueId, expected: SnapshotId) -> Result<MosqueScheduleSnapshot>;

    /// Every stored snapshot for the mosque, newest first.
    fn history(&self, mosque_id: &MosqueId) -> Result<Vec<MosqueScheduleSnapshot>>;
}
