//! Per-prayer jamaat/adhan calculation.

use jamaat_clock::{adjust_time, detect_trend, round_time, RoundingDirection, Trend};
use jamaat_types::{ClockTime, JamaatTimes, PrayerRule, RoundingInterval};
use serde::{Deserialize, Serialize};

/// Rounding applied to a delayed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoundingStep {
    pub interval: RoundingInterval,
    pub direction: RoundingDirection,
    /// Value before rounding.
    pub unrounded: ClockTime,
}

/// Result of one prayer on one day, with the inputs that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrayerCalculation {
    pub base: ClockTime,
    pub delay_minutes: i32,
    /// `true` when the rule's fixed time replaced the computation.
    pub fixed_override: bool,
    /// Base plus delay, or the fixed time.
    pub adjusted: ClockTime,
    pub trend: Trend,
    pub rounding: Option<RoundingStep>,
    pub adhan_gap_minutes: u32,
    pub times: JamaatTimes,
}

/// Computes the jamaat and adhan time for one prayer.
///
/// A fixed time wins outright. Otherwise the delay is applied and, when the rule
/// enables rounding and the mosque has an interval, the value is rounded against
/// the drift from `previous_final`. The adhan is always the jamaat minus the gap.
pub fn calculate_prayer_time(
    base: ClockTime,
    rule: &PrayerRule,
    interval: Option<RoundingInterval>,
    previous_final: Option<ClockTime>,
) -> PrayerCalculation {
    let (adjusted, fixed_override) = match rule.fixed_time {
        Some(fixed) => (fixed, true),
        None => (adjust_time(base, rule.delay_minutes as i64), false),
    };
    let trend = detect_trend(adjusted, previous_final);

    let rounding = match interval {
        Some(interval) if rule.rounding_enabled && !fixed_override => Some(RoundingStep {
            interval,
            direction: trend.resisting_direction(),
            unrounded: adjusted,
        }),
        _ => None,
    };

    let jamaat = match rounding {
        Some(step) => round_time(adjusted, step.interval.minutes(), step.direction),
        None => adjusted,
    };
    let adhan = adjust_time(jamaat, -(rule.adhan_gap_minutes as i64));

    PrayerCalculation {
        base,
        delay_minutes: rule.delay_minutes,
        fixed_override,
        adjusted,
        trend,
        rounding,
        adhan_gap_minutes: rule.adhan_gap_minutes,
        times: JamaatTimes { jamaat, adhan },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_worked_example() {
        let rule = PrayerRule::delayed(5).with_adhan_gap(10).with_rounding(true);
        let calc = calculate_prayer_time(t("04:58"), &rule, Some(RoundingInterval::Ten), Some(t("05:05")));

        assert_eq!(calc.adjusted, t("05:03"));
        assert_eq!(calc.trend, Trend::Increasing);
        assert_eq!(calc.rounding.unwrap().direction, RoundingDirection::Down);
        assert_eq!(calc.times.jamaat, t("05:00"));
        assert_eq!(calc.times.adhan, t("04:50"));
    }

    #[test]
    fn test_fixed_time_overrides_everything() {
        let rule = PrayerRule {
            delay_minutes: 999,
            fixed_time: Some(t("05:15")),
            adhan_gap_minutes: 0,
            rounding_enabled: true,
        };
        let calc = calculate_prayer_time(t("04:58"), &rule, Some(RoundingInterval::Fifteen), Some(t("05:40")));
        assert_eq!(calc.times.jamaat, t("05:15"));
        assert!(calc.fixed_override);
        assert!(calc.rounding.is_none());
    }

    #[test]
    fn test_fixed_time_still_derives_adhan() {
        let rule = PrayerRule::fixed(t("13:30")).with_adhan_gap(15);
        let calc = calculate_prayer_time(t("12:10"), &rule, None, None);
        assert_eq!(calc.times, JamaatTimes { jamaat: t("13:30"), adhan: t("13:15") });
    }

    #[test]
    fn test_rounding_requires_rule_and_interval() {
        let rule = PrayerRule::delayed(5);
        let calc = calculate_prayer_time(t("04:58"), &rule, Some(RoundingInterval::Ten), None);
        assert_eq!(calc.times.jamaat, t("05:03"));

        let rule = rule.with_rounding(true);
        let calc = calculate_prayer_time(t("04:58"), &rule, None, None);
        assert_eq!(calc.times.jamaat, t("05:03"));
    }

    #[test]
    fn test_decreasing_rounds_up() {
        let rule = PrayerRule::delayed(0).with_rounding(true);
        let calc = calculate_prayer_time(t("18:02"), &rule, Some(RoundingInterval::Five), Some(t("18:00")));
        assert_eq!(calc.trend, Trend::Decreasing);
        assert_eq!(calc.times.jamaat, t("18:05"));
    }

    #[test]
    fn test_adhan_wraps_before_midnight() {
        let rule = PrayerRule::fixed(t("00:05")).with_adhan_gap(10);
        let calc = calculate_prayer_time(t("23:40"), &rule, None, None);
        assert_eq!(calc.times.adhan, t("23:55"));
    }

    proptest! {
        /// Rounding never moves in the drift's direction.
        #[test]
        fn rounding_resists_drift(
            base in 0u16..1180,
            delay in -120i32..=120,
            prev in 0u16..1440,
            interval in prop::sample::select(vec![RoundingInterval::Five, RoundingInterval::Ten, RoundingInterval::Fifteen]),
        ) {
            let rule = PrayerRule::delayed(delay).with_rounding(true);
            let base = ClockTime::from_minutes(base + 120).unwrap();
            let calc = calculate_prayer_time(base, &rule, Some(interval), ClockTime::from_minutes(prev));
            let unrounded = calc.adjusted;
            match calc.trend {
                Trend::Increasing => prop_assert!(calc.times.jamaat <= unrounded),
                Trend::Decreasing => prop_assert!(calc.times.jamaat >= unrounded),
                Trend::Stable => {}
            }
        }
    }
}
