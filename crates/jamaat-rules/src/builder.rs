use jamaat_types::{JummahOverride, MosqueConfig, MosqueConfigDraft, MosqueId, Prayer, PrayerRule, PrayerTimes, Result};

use crate::validator::{accept, ValidationLimits};

/// Builder with validation for [`MosqueConfig`].
#[derive(Debug, Clone)]
pub struct MosqueConfigBuilder {
    mosque_id: MosqueId,
    rules: PrayerTimes<PrayerRule>,
    rounding_interval_minutes: Option<u32>,
    jummah: Option<JummahOverride>,
    limits: ValidationLimits,
}

impl MosqueConfigBuilder {
    pub fn new(mosque_id: impl Into<MosqueId>) -> Self {
        Self {
            mosque_id: mosque_id.into(),
            rules: PrayerTimes::default(),
            rounding_interval_minutes: None,
            jummah: None,
            limits: ValidationLimits::default(),
        }
    }

    pub fn rule(mut self, prayer: Prayer, rule: PrayerRule) -> Self {
        *self.rules.get_mut(prayer) = rule;
        self
    }

    /// Applies the same rule to all five prayers.
    pub fn all_rules(mut self, rule: PrayerRule) -> Self {
        self.rules = PrayerTimes::from_fn(|_| rule);
        self
    }

    pub fn rounding_interval(mut self, minutes: u32) -> Self {
        self.rounding_interval_minutes = Some(minutes);
        self
    }

    pub fn jummah(mut self, jummah: JummahOverride) -> Self {
        self.jummah = Some(jummah);
        self
    }

    /// Allows adhan gaps up to the extended limit.
    pub fn limits(mut self, limits: ValidationLimits) -> Self {
        self.limits = limits;
        self
    }

    /// Builds and validates. Prayers without a rule get the default (no adjustment).
    pub fn build(self) -> Result<MosqueConfig> {
        let typed = MosqueConfig {
            mosque_id: self.mosque_id,
            rules: self.rules,
            rounding_interval: None,
            jummah: self.jummah,
        };
        let mut draft = MosqueConfigDraft::from(&typed);
        draft.rounding_interval_minutes = self.rounding_interval_minutes;
        accept(&draft, &self.limits)
    }
}
