//! In-memory store.
//!
//! Implements both collaborator traits behind a single lock, so every
//! conditional update is atomic. Suitable for tests, local development and
//! embedding where durability is not needed.

use jamaat_types::{
    BaseTable, JamaatError, MosqueConfig, MosqueId, MosqueScheduleSnapshot, Result, SnapshotId,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use crate::store::{SnapshotStore, TimetableSource};

#[derive(Clone, Default)]
pub struct InMemoryStore {
    data: Arc<RwLock<MemoryData>>,
}

struct MemoryData {
    base_table: Option<BaseTable>,
    configs: HashMap<MosqueId, MosqueConfig>,
    /// Per mosque, oldest first.
    snapshots: HashMap<MosqueId, Vec<MosqueScheduleSnapshot>>,
    next_snapshot_id: u64,
    is_healthy: bool,
}

impl Default for MemoryData {
    fn default() -> Self {
        Self {
            base_table: None,
            configs: HashMap::new(),
            snapshots: HashMap::new(),
            next_snapshot_id: 1,
            is_healthy: true,
        }
    }
}

impl MemoryData {
    fn check_health(&self) -> Result<()> {
        if self.is_healthy {
            Ok(())
        } else {
            Err(JamaatError::internal("store unavailable"))
        }
    }

    fn active_index(&self, mosque_id: &MosqueId) -> Option<usize> {
        self.snapshots
            .get(mosque_id)
            .and_then(|list| list.iter().position(|s| s.is_active))
    }
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_base_table(&self, table: BaseTable) {
        self.data.write().base_table = Some(table);
    }

    /// Binds `config` to its mosque, replacing any previous one.
    pub fn put_config(&self, config: MosqueConfig) {
        self.data.write().configs.insert(config.mosque_id.clone(), config);
    }

    /// Simulates a storage outage: while unhealthy, every call fails `Internal`.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Number of active snapshots held for the mosque. Always 0 or 1.
    pub fn active_count(&self, mosque_id: &MosqueId) -> usize {
        self.data
            .read()
            .snapshots
            .get(mosque_id)
            .map_or(0, |list| list.iter().filter(|s| s.is_active).count())
    }
}

impl TimetableSource for InMemoryStore {
    fn base_table(&self) -> Result<Option<BaseTable>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.base_table.clone())
    }

    fn mosque_config(&self, mosque_id: &MosqueId) -> Result<Option<MosqueConfig>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data.configs.get(mosque_id).cloned())
    }
}

impl SnapshotStore for InMemoryStore {
    fn active(&self, mosque_id: &MosqueId) -> Result<Option<MosqueScheduleSnapshot>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data
            .active_index(mosque_id)
            .and_then(|i| data.snapshots.get(mosque_id).map(|list| list[i].clone())))
    }

    fn replace_active(
        &self,
        expected: Option<SnapshotId>,
        mut snapshot: MosqueScheduleSnapshot,
    ) -> Result<MosqueScheduleSnapshot> {
        let mut data = self.data.write();
        data.check_health()?;

        let mosque_id = snapshot.mosque_id.clone();
        let current = data.active_index(&mosque_id);
        let current_id = current.and_then(|i| data.snapshots.get(&mosque_id).map(|list| list[i].id));
        if current_id != expected {
            return Err(JamaatError::conflict(format!(
                "active snapshot for mosque {} changed during generation",
                mosque_id
            )));
        }

        snapshot.id = SnapshotId(data.next_snapshot_id);
        snapshot.is_active = true;
        data.next_snapshot_id += 1;

        let list = data.snapshots.entry(mosque_id).or_default();
        if let Some(i) = current {
            list[i].is_active = false;
        }
        list.push(snapshot.clone());
        Ok(snapshot)
    }

    fn update_active(&self, expected: &MosqueScheduleSnapshot, updated: MosqueScheduleSnapshot) -> Result<()> {
        let mut data = self.data.write();
        data.check_health()?;

        let index = data.active_index(&expected.mosque_id);
        let slot = index.and_then(|i| data.snapshots.get_mut(&expected.mosque_id).map(|list| &mut list[i]));
        match slot {
            Some(stored) if stored == expected && updated.id == expected.id && updated.is_active => {
                *stored = updated;
                Ok(())
            }
            _ => Err(JamaatError::conflict(format!(
                "active snapshot {} for mosque {} was modified concurrently",
                expected.id, expected.mosque_id
            ))),
        }
    }

    fn delete_active(&self, mosque_id: &MosqueId, expected: SnapshotId) -> Result<MosqueScheduleSnapshot> {
        let mut data = self.data.write();
        data.check_health()?;

        let index = data.active_index(mosque_id);
        let list = data.snapshots.get_mut(mosque_id);
        match (index, list) {
            (Some(i), Some(list)) if list[i].id == expected => Ok(list.remove(i)),
            _ => Err(JamaatError::conflict(format!(
                "active snapshot {} for mosque {} was replaced before deletion",
                expected, mosque_id
            ))),
        }
    }

    fn history(&self, mosque_id: &MosqueId) -> Result<Vec<MosqueScheduleSnapshot>> {
        let data = self.data.read();
        data.check_health()?;
        Ok(data
            .snapshots
            .get(mosque_id)
            .map(|list| list.iter().rev().cloned().collect())
            .unwrap_or_default())
    }
}
