//! Boundary validation of mosque rule sets.

use jamaat_types::{
    ClockTime, JamaatError, JummahDraft, JummahOverride, MosqueConfig, MosqueConfigDraft, PrayerRule,
    PrayerTimes, Result, RoundingInterval,
};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Standard maximum adhan gap, in minutes.
pub const ADHAN_GAP_MAX: i64 = 30;
/// Adhan gap ceiling for deployments with the extended limit.
pub const ADHAN_GAP_MAX_EXTENDED: i64 = 90;
/// Maximum absolute delay, in minutes.
pub const DELAY_MAX: i64 = 120;

/// Numeric bounds applied by [`validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationLimits {
    pub max_delay_minutes: i64,
    pub max_adhan_gap_minutes: i64,
}

impl ValidationLimits {
    pub const STANDARD: Self = Self {
        max_delay_minutes: DELAY_MAX,
        max_adhan_gap_minutes: ADHAN_GAP_MAX,
    };

    pub const EXTENDED: Self = Self {
        max_delay_minutes: DELAY_MAX,
        max_adhan_gap_minutes: ADHAN_GAP_MAX_EXTENDED,
    };
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// One rejected field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Dotted path, e.g. `fajr.delayMinutes` or `jummah.adhanTime`.
    pub field: String,
    pub message: String,
}

impl Violation {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

pub type Violations = SmallVec<[Violation; 4]>;

/// Checks a draft without modifying it. An empty result means it is acceptable.
pub fn validate(draft: &MosqueConfigDraft, limits: &ValidationLimits) -> Violations {
    let mut violations = Violations::new();

    for (prayer, rule) in draft.rules.iter() {
        let field = |name: &str| format!("{}.{}", prayer.key(), name);

        if rule.delay_minutes.unsigned_abs() > limits.max_delay_minutes.unsigned_abs() {
            violations.push(Violation::new(
                field("delayMinutes"),
                format!(
                    "{} is outside [-{max}, {max}]",
                    rule.delay_minutes,
                    max = limits.max_delay_minutes
                ),
            ));
        }
        if let Some(fixed) = &rule.fixed_time {
            if !ClockTime::is_valid(fixed) {
                violations.push(Violation::new(field("fixedTime"), format!("'{}' is not HH:MM", fixed)));
            }
        }
        if !(0..=limits.max_adhan_gap_minutes).contains(&rule.adhan_gap_minutes) {
            violations.push(Violation::new(
                field("adhanGapMinutes"),
                format!("{} is outside [0, {}]", rule.adhan_gap_minutes, limits.max_adhan_gap_minutes),
            ));
        }
    }

    if let Some(minutes) = draft.rounding_interval_minutes {
        if RoundingInterval::try_from(minutes).is_err() {
            violations.push(Violation::new(
                "roundingIntervalMinutes",
                format!("{} is not one of 5, 10, 15", minutes),
            ));
        }
    }

    if let Some(jummah) = &draft.jummah {
        validate_jummah(jummah, &mut violations);
    }

    violations
}

fn validate_jummah(jummah: &JummahDraft, violations: &mut Violations) {
    let fields = [
        ("jummah.adhanTime", &jummah.adhan_time),
        ("jummah.khutbahStartTime", &jummah.khutbah_start_time),
        ("jummah.jamaatTime", &jummah.jamaat_time),
    ];
    let mut parsed = [ClockTime::MIDNIGHT; 3];
    let mut well_formed = true;
    for ((field, raw), slot) in fields.iter().zip(parsed.iter_mut()) {
        match raw.parse::<ClockTime>() {
            Ok(t) => *slot = t,
            Err(_) => {
                well_formed = false;
                violations.push(Violation::new(*field, format!("'{}' is not HH:MM", raw)));
            }
        }
    }

    let [adhan, khutbah, jamaat] = parsed;
    if well_formed && !(adhan < khutbah && khutbah < jamaat) {
        violations.push(Violation::new(
            "jummah",
            format!("expected adhan {} < khutbah {} < jamaat {}", adhan, khutbah, jamaat),
        ));
    }
}

/// Validates `draft` and converts it into an accepted [`MosqueConfig`].
///
/// # Errors
/// Returns `InvalidArgument` listing every violation.
pub fn accept(draft: &MosqueConfigDraft, limits: &ValidationLimits) -> Result<MosqueConfig> {
    let violations = validate(draft, limits);
    if !violations.is_empty() {
        let reasons: Vec<String> = violations.iter().map(Violation::to_string).collect();
        return Err(JamaatError::invalid_argument(format!(
            "mosque config rejected: {}",
            reasons.join("; ")
        )));
    }

    let rules: PrayerTimes<Result<PrayerRule>> = draft.rules.map(|prayer, rule| {
        let out_of_range = |field: &str, value: i64| {
            JamaatError::invalid_argument(format!("{}.{}: {} does not fit a rule", prayer.key(), field, value))
        };
        Ok(PrayerRule {
            delay_minutes: i32::try_from(rule.delay_minutes)
                .map_err(|_| out_of_range("delayMinutes", rule.delay_minutes))?,
            fixed_time: rule.fixed_time.as_deref().map(str::parse::<ClockTime>).transpose()?,
            adhan_gap_minutes: u32::try_from(rule.adhan_gap_minutes)
                .map_err(|_| out_of_range("adhanGapMinutes", rule.adhan_gap_minutes))?,
            rounding_enabled: rule.rounding_enabled,
        })
    });
    let jummah = draft
        .jummah
        .as_ref()
        .map(|j| -> Result<JummahOverride> {
            Ok(JummahOverride {
                adhan_time: j.adhan_time.parse()?,
                khutbah_start_time: j.khutbah_start_time.parse()?,
                jamaat_time: j.jamaat_time.parse()?,
            })
        })
        .transpose()?;

    Ok(MosqueConfig {
        mosque_id: draft.mosque_id.clone(),
        rules: PrayerTimes {
            fajr: rules.fajr?,
            dhuhr: rules.dhuhr?,
            asr: rules.asr?,
            maghrib: rules.maghrib?,
            isha: rules.isha?,
        },
        rounding_interval: draft.rounding_interval_minutes.map(RoundingInterval::try_from).transpose()?,
        jummah,
    })
}
