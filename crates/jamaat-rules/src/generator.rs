//! Folds the calculator over the 366-day base table.

use chrono::{Datelike, NaiveDate, Weekday};
use jamaat_types::{BaseDayTiming, BaseTable, ClockTime, GeneratedDayTiming, JamaatTimes, MosqueConfig, PrayerTimes};
use log::debug;

use crate::calculator::{calculate_prayer_time, PrayerCalculation};

/// One day of the fold, before it is shaped for persistence or preview.
#[derive(Debug, Clone)]
pub struct DayCalculation<'a> {
    pub base: &'a BaseDayTiming,
    /// `None` for `29-Feb` outside leap years.
    pub date: Option<NaiveDate>,
    pub jummah_applied: bool,
    pub prayers: PrayerTimes<PrayerCalculation>,
    /// Final times, with the Jummah override already applied to dhuhr.
    pub times: PrayerTimes<JamaatTimes>,
}

impl DayCalculation<'_> {
    pub fn is_friday(&self) -> bool {
        self.date.is_some_and(|d| d.weekday() == Weekday::Fri)
    }

    fn into_generated(self) -> GeneratedDayTiming {
        GeneratedDayTiming {
            day_number: self.base.day_number,
            label: self.base.label.clone(),
            sunrise: self.base.sunrise,
            prayers: self.times,
            manual_edit: None,
        }
    }
}

/// Lazily computes day entries in calendar order.
///
/// Holds the per-prayer "previous final" accumulator; a fresh iterator starts
/// with no previous values, so day one of every fold is stable.
pub struct ScheduleIter<'t, 'c> {
    days: std::slice::Iter<'t, BaseDayTiming>,
    config: &'c MosqueConfig,
    year: i32,
    previous: PrayerTimes<Option<ClockTime>>,
}

impl<'t> Iterator for ScheduleIter<'t, '_> {
    type Item = DayCalculation<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        let base = self.days.next()?;
        let config = self.config;

        let prayers = PrayerTimes::from_fn(|prayer| {
            calculate_prayer_time(
                base.time_of(prayer),
                config.rules.get(prayer),
                config.rounding_interval,
                *self.previous.get(prayer),
            )
        });
        // Trend state follows the rule-computed times; the Friday override
        // must not bend Saturday's rounding.
        self.previous = prayers.map(|_, calc| Some(calc.times.jamaat));

        let date = base.date_in(self.year);
        let mut times = prayers.map(|_, calc| calc.times);
        let mut jummah_applied = false;
        if let Some(jummah) = config.jummah {
            if date.is_some_and(|d| d.weekday() == Weekday::Fri) {
                times.dhuhr = JamaatTimes {
                    jamaat: jummah.jamaat_time,
                    adhan: jummah.adhan_time,
                };
                jummah_applied = true;
            }
        }

        Some(DayCalculation {
            base,
            date,
            jummah_applied,
            prayers,
            times,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.days.size_hint()
    }
}

/// Starts a fold over `table` for `config`, placing Fridays in `year`.
pub fn schedule_iter<'t, 'c>(table: &'t BaseTable, config: &'c MosqueConfig, year: i32) -> ScheduleIter<'t, 'c> {
    ScheduleIter {
        days: table.days().iter(),
        config,
        year,
        previous: PrayerTimes::default(),
    }
}

/// Generates the mosque's full year.
///
/// Pure: the same table, config and year always produce the same 366 entries.
pub fn generate(table: &BaseTable, config: &MosqueConfig, year: i32) -> Vec<GeneratedDayTiming> {
    let days: Vec<GeneratedDayTiming> = schedule_iter(table, config, year)
        .map(DayCalculation::into_generated)
        .collect();
    debug!(
        "generated {} days for mosque {} (year {}, base {})",
        days.len(),
        config.mosque_id,
        year,
        table.reference()
    );
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{base_table, config};
    use jamaat_types::{JummahOverride, Prayer, PrayerRule, RoundingInterval};

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    #[test]
    fn test_full_year_and_passthrough() {
        let table = base_table();
        let days = generate(&table, &config(), 2025);
        assert_eq!(days.len(), 366);
        for (generated, base) in days.iter().zip(table.days()) {
            assert_eq!(generated.day_number, base.day_number);
            assert_eq!(generated.label, base.label);
            assert_eq!(generated.sunrise, base.sunrise);
            assert!(!generated.is_manually_edited());
        }
    }

    #[test]
    fn test_deterministic() {
        let table = base_table();
        let cfg = config();
        let first = serde_json::to_vec(&generate(&table, &cfg, 2025)).unwrap();
        let second = serde_json::to_vec(&generate(&table, &cfg, 2025)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_jummah_override_on_fridays() {
        let table = base_table();
        let mut cfg = config();
        cfg.jummah = Some(JummahOverride {
            adhan_time: t("13:00"),
            khutbah_start_time: t("13:10"),
            jamaat_time: t("13:30"),
        });

        let calcs: Vec<_> = schedule_iter(&table, &cfg, 2025).collect();
        let fridays: Vec<_> = calcs.iter().filter(|c| c.is_friday()).collect();
        assert_eq!(fridays.len(), 52);
        for day in &calcs {
            if day.is_friday() {
                assert!(day.jummah_applied);
                assert_eq!(day.times.dhuhr, JamaatTimes { jamaat: t("13:30"), adhan: t("13:00") });
            } else {
                assert!(!day.jummah_applied);
                assert_eq!(day.times.dhuhr, day.prayers.dhuhr.times);
            }
        }
        // 3 January 2025 is a Friday.
        assert_eq!(calcs[2].date, NaiveDate::from_ymd_opt(2025, 1, 3));
        assert!(calcs[2].jummah_applied);
    }

    #[test]
    fn test_leap_day_outside_leap_year() {
        let table = base_table();
        let calcs: Vec<_> = schedule_iter(&table, &config(), 2025).collect();
        assert_eq!(calcs[59].base.label, "29-Feb");
        assert_eq!(calcs[59].date, None);
        assert!(!calcs[59].is_friday());
    }

    #[test]
    fn test_fixed_time_beats_rounding() {
        let table = base_table();
        let mut cfg = config();
        cfg.rounding_interval = Some(RoundingInterval::Five);
        cfg.rules.fajr = PrayerRule::fixed(t("05:15")).with_rounding(true);
        let days = generate(&table, &cfg, 2025);
        assert!(days.iter().all(|d| d.times(Prayer::Fajr).jamaat == t("05:15")));
    }

    #[test]
    fn test_first_day_is_stable() {
        let table = base_table();
        let first = schedule_iter(&table, &config(), 2025).next().unwrap();
        for (_, calc) in first.prayers.iter() {
            assert_eq!(calc.trend, jamaat_clock::Trend::Stable);
        }
    }

    #[test]
    fn test_trend_follows_previous_final() {
        let table = base_table();
        let cfg = config();
        let calcs: Vec<_> = schedule_iter(&table, &cfg, 2025).take(3).collect();
        let expected = jamaat_clock::detect_trend(calcs[2].prayers.fajr.adjusted, Some(calcs[1].prayers.fajr.times.jamaat));
        assert_eq!(calcs[2].prayers.fajr.trend, expected);
    }
}
