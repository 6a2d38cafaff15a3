//! Per-mosque rule sets.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::JamaatError;
use crate::prayer::PrayerTimes;
use crate::snapshot::MosqueId;
use crate::time::ClockTime;

/// Rounding granularity for jamaat times.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum RoundingInterval {
    Five,
    Ten,
    Fifteen,
}

impl RoundingInterval {
    pub const fn minutes(self) -> u16 {
        match self {
            RoundingInterval::Five => 5,
            RoundingInterval::Ten => 10,
            RoundingInterval::Fifteen => 15,
        }
    }
}

impl TryFrom<u32> for RoundingInterval {
    type Error = JamaatError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            5 => Ok(RoundingInterval::Five),
            10 => Ok(RoundingInterval::Ten),
            15 => Ok(RoundingInterval::Fifteen),
            other => Err(JamaatError::invalid_argument(format!(
                "rounding interval must be 5, 10 or 15 minutes, got {}",
                other
            ))),
        }
    }
}

impl From<RoundingInterval> for u32 {
    fn from(value: RoundingInterval) -> Self {
        value.minutes() as u32
    }
}

impl fmt::Display for RoundingInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} min", self.minutes())
    }
}

/// Adjustment rule for one prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerRule {
    /// Minutes added to the base time. Range [-120, 120].
    pub delay_minutes: i32,
    /// When set, the jamaat time is pinned here; delay and rounding are ignored.
    pub fixed_time: Option<ClockTime>,
    /// Minutes between adhan and jamaat.
    pub adhan_gap_minutes: u32,
    pub rounding_enabled: bool,
}

impl PrayerRule {
    pub fn delayed(delay_minutes: i32) -> Self {
        Self {
            delay_minutes,
            ..Default::default()
        }
    }

    pub fn fixed(time: ClockTime) -> Self {
        Self {
            fixed_time: Some(time),
            ..Default::default()
        }
    }

    pub fn with_adhan_gap(mut self, minutes: u32) -> Self {
        self.adhan_gap_minutes = minutes;
        self
    }

    pub fn with_rounding(mut self, enabled: bool) -> Self {
        self.rounding_enabled = enabled;
        self
    }
}

/// Friday congregational times that replace the computed dhuhr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JummahOverride {
    pub adhan_time: ClockTime,
    /// Informational only; never used in arithmetic.
    pub khutbah_start_time: ClockTime,
    pub jamaat_time: ClockTime,
}

/// A mosque's accepted rule set.
///
/// Obtain one through [`MosqueConfigDraft`] validation or the validating
/// builder in `jamaat-rules`; both reject out-of-range values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosqueConfig {
    pub mosque_id: MosqueId,
    pub rules: PrayerTimes<PrayerRule>,
    /// `None` disables rounding for every prayer.
    pub rounding_interval: Option<RoundingInterval>,
    pub jummah: Option<JummahOverride>,
}

/// Unvalidated rule for one prayer, as received from the config API.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrayerRuleDraft {
    pub delay_minutes: i64,
    pub fixed_time: Option<String>,
    pub adhan_gap_minutes: i64,
    pub rounding_enabled: bool,
}

/// Unvalidated Jummah override.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JummahDraft {
    pub adhan_time: String,
    pub khutbah_start_time: String,
    pub jamaat_time: String,
}

/// Unvalidated mosque rule set. Convert with the validator before use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MosqueConfigDraft {
    pub mosque_id: MosqueId,
    #[serde(default)]
    pub rules: PrayerTimes<PrayerRuleDraft>,
    #[serde(default)]
    pub rounding_interval_minutes: Option<u32>,
    #[serde(default)]
    pub jummah: Option<JummahDraft>,
}

impl MosqueConfigDraft {
    pub fn new(mosque_id: impl Into<MosqueId>) -> Self {
        Self {
            mosque_id: mosque_id.into(),
            rules: PrayerTimes::default(),
            rounding_interval_minutes: None,
            jummah: None,
        }
    }
}

impl From<&MosqueConfig> for MosqueConfigDraft {
    fn from(config: &MosqueConfig) -> Self {
        Self {
            mosque_id: config.mosque_id.clone(),
            rules: config.rules.map(|_, rule| PrayerRuleDraft {
                delay_minutes: rule.delay_minutes as i64,
                fixed_time: rule.fixed_time.map(|t| t.to_string()),
                adhan_gap_minutes: rule.adhan_gap_minutes as i64,
                rounding_enabled: rule.rounding_enabled,
            }),
            rounding_interval_minutes: config.rounding_interval.map(u32::from),
            jummah: config.jummah.map(|j| JummahDraft {
                adhan_time: j.adhan_time.to_string(),
                khutbah_start_time: j.khutbah_start_time.to_string(),
                jamaat_time: j.jamaat_time.to_string(),
            }),
        }
    }
}
