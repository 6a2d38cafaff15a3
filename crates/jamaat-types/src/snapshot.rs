//! Versioned yearly schedule records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::MosqueConfig;
use crate::schedule::GeneratedDayTiming;

/// Identifier of a mosque, owned by the account service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MosqueId(String);

impl MosqueId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MosqueId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for MosqueId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for MosqueId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Store-assigned snapshot identifier. Increases with every insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(pub u64);

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Lifecycle position of a stored snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SnapshotStatus {
    /// Active, awaiting approval.
    Draft,
    /// Active and approved for display.
    Approved,
    /// Replaced by a newer generation; kept for history.
    Superseded,
}

/// A mosque's generated yearly schedule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosqueScheduleSnapshot {
    pub id: SnapshotId,
    pub mosque_id: MosqueId,
    /// Reference of the base table the days were generated from.
    pub source_base_timing_ref: String,
    /// Calendar year used to place Fridays.
    pub year: i32,
    /// Copy of the rule set at generation time.
    pub config_snapshot: MosqueConfig,
    pub days: Vec<GeneratedDayTiming>,
    pub version: u32,
    pub is_approved: bool,
    pub approved_by: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub generated_by: String,
    pub generated_at: DateTime<Utc>,
}

impl MosqueScheduleSnapshot {
    pub fn status(&self) -> SnapshotStatus {
        match (self.is_active, self.is_approved) {
            (false, _) => SnapshotStatus::Superseded,
            (true, true) => SnapshotStatus::Approved,
            (true, false) => SnapshotStatus::Draft,
        }
    }

    /// Day entry for a 1-based day number.
    pub fn day(&self, day_number: u16) -> Option<&GeneratedDayTiming> {
        (day_number as usize).checked_sub(1).and_then(|i| self.days.get(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mosque_id_conversions() {
        let id = MosqueId::new("east-london");
        assert_eq!(id.as_str(), "east-london");
        assert_eq!(id, MosqueId::from("east-london"));
        assert_eq!(id, MosqueId::from(String::from("east-london")));
        assert_eq!(id.to_string(), "east-london");
        assert_eq!(serde_json::to_value(&id).unwrap(), "east-london");
    }

    #[test]
    fn test_snapshot_id_order() {
        assert!(SnapshotId(2) > SnapshotId(1));
        assert_eq!(SnapshotId(7).to_string(), "#7");
    }
}
