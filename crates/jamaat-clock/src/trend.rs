//! Day-over-day drift classification.

use jamaat_types::ClockTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::adjust::RoundingDirection;

/// Drift of a prayer time relative to the previous day's final value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// No previous value, or no movement.
    #[default]
    Stable,
    /// The previous final sits later on the clock than today's value.
    Increasing,
    /// The previous final sits earlier on the clock than today's value.
    Decreasing,
}

impl Trend {
    /// Rounding direction that works against this drift.
    ///
    /// Increasing rounds down, decreasing rounds up, stable rounds to nearest.
    pub fn resisting_direction(self) -> RoundingDirection {
        match self {
            Trend::Increasing => RoundingDirection::Down,
            Trend::Decreasing => RoundingDirection::Up,
            Trend::Stable => RoundingDirection::Nearest,
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Stable => "stable",
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
        };
        write!(f, "{}", s)
    }
}

/// Classifies `current_raw` against yesterday's final time by minute of day.
///
/// Day one of a fold has no previous value and is [`Trend::Stable`].
pub fn detect_trend(current_raw: ClockTime, previous_final: Option<ClockTime>) -> Trend {
    let Some(previous) = previous_final else {
        return Trend::Stable;
    };
    match previous.minutes().cmp(&current_raw.minutes()) {
        std::cmp::Ordering::Greater => Trend::Increasing,
        std::cmp::Ordering::Less => Trend::Decreasing,
        std::cmp::Ordering::Equal => Trend::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_no_previous_is_stable() {
        assert_eq!(detect_trend(t("05:03"), None), Trend::Stable);
    }

    #[test]
    fn test_orientation() {
        assert_eq!(detect_trend(t("05:03"), Some(t("05:05"))), Trend::Increasing);
        assert_eq!(detect_trend(t("05:07"), Some(t("05:05"))), Trend::Decreasing);
        assert_eq!(detect_trend(t("05:05"), Some(t("05:05"))), Trend::Stable);
    }

    #[test]
    fn test_resisting_direction() {
        assert_eq!(Trend::Increasing.resisting_direction(), RoundingDirection::Down);
        assert_eq!(Trend::Decreasing.resisting_direction(), RoundingDirection::Up);
        assert_eq!(Trend::Stable.resisting_direction(), RoundingDirection::Nearest);
    }
}
