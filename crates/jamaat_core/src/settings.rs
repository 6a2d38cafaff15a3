//! Engine settings file support.
//!
//! ```toml
//! [validation]
//! max_delay_minutes = 120
//! max_adhan_gap_minutes = 30
//! extended_adhan_gap = false   # true raises the gap ceiling to 90
//!
//! [preview]
//! window_days = 7
//! max_window_days = 31
//! ```

use jamaat_rules::validator::{ADHAN_GAP_MAX, ADHAN_GAP_MAX_EXTENDED, DELAY_MAX};
use jamaat_rules::ValidationLimits;
use jamaat_types::{JamaatError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub preview: PreviewSettings,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationSettings {
    #[serde(default = "default_max_delay")]
    pub max_delay_minutes: i64,
    #[serde(default = "default_max_adhan_gap")]
    pub max_adhan_gap_minutes: i64,
    #[serde(default)]
    pub extended_adhan_gap: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSettings {
    #[serde(default = "default_window_days")]
    pub window_days: usize,
    #[serde(default = "default_max_window_days")]
    pub max_window_days: usize,
}

fn default_max_delay() -> i64 {
    DELAY_MAX
}

fn default_max_adhan_gap() -> i64 {
    ADHAN_GAP_MAX
}

fn default_window_days() -> usize {
    7
}

fn default_max_window_days() -> usize {
    31
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            max_delay_minutes: default_max_delay(),
            max_adhan_gap_minutes: default_max_adhan_gap(),
            extended_adhan_gap: false,
        }
    }
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            window_days: default_window_days(),
            max_window_days: default_max_window_days(),
        }
    }
}

impl ValidationSettings {
    /// Bounds handed to the validator.
    pub fn limits(&self) -> ValidationLimits {
        let max_adhan_gap_minutes = if self.extended_adhan_gap {
            ADHAN_GAP_MAX_EXTENDED
        } else {
            self.max_adhan_gap_minutes
        };
        ValidationLimits {
            max_delay_minutes: self.max_delay_minutes,
            max_adhan_gap_minutes,
        }
    }
}

impl EngineSettings {
    /// Parses settings from TOML text. Missing sections and keys take defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: EngineSettings = toml::from_str(content)
            .map_err(|e| JamaatError::invalid_argument(format!("Failed to parse settings: {}", e)))?;
        settings.check()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .map_err(|e| JamaatError::internal(format!("Failed to read settings file: {}", e)))?;
        Self::from_toml_str(&content)
    }

    fn check(&self) -> Result<()> {
        let v = &self.validation;
        if !(0..=DELAY_MAX).contains(&v.max_delay_minutes) {
            return Err(JamaatError::invalid_argument(format!(
                "validation.max_delay_minutes must be within [0, {}]",
                DELAY_MAX
            )));
        }
        if !(0..=ADHAN_GAP_MAX_EXTENDED).contains(&v.max_adhan_gap_minutes) {
            return Err(JamaatError::invalid_argument(format!(
                "validation.max_adhan_gap_minutes must be within [0, {}]",
                ADHAN_GAP_MAX_EXTENDED
            )));
        }
        let p = &self.preview;
        if p.window_days == 0 || p.window_days > p.max_window_days {
            return Err(JamaatError::invalid_argument(
                "preview.window_days must be at least 1 and at most preview.max_window_days",
            ));
        }
        Ok(())
    }
}
