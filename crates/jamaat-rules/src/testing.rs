//! Shared fixtures for unit tests.

use jamaat_types::{
    grid_labels, BaseDayTiming, BaseTable, ClockTime, MosqueConfig, MosqueId, PrayerRule, PrayerTimes,
    RoundingInterval,
};

/// Smooth synthetic year: times swing by up to an hour across the seasons.
pub(crate) fn base_table() -> BaseTable {
    let days = grid_labels()
        .enumerate()
        .map(|(i, label)| {
            let swing = (i as i64 - 183).abs() / 3;
            let at = |minutes: i64| ClockTime::wrapping(minutes);
            BaseDayTiming {
                day_number: i as u16 + 1,
                label,
                fajr: at(4 * 60 + swing),
                sunrise: at(6 * 60 + swing),
                zenith: at(12 * 60 + 5),
                dhuhr: at(12 * 60 + 10 + swing / 6),
                asr: at(15 * 60 + 20 - swing / 2),
                maghrib: at(18 * 60 + 30 - swing),
                isha: at(20 * 60 - swing),
            }
        })
        .collect();
    BaseTable::new("test-base", days).expect("synthetic table is a full year")
}

pub(crate) fn config() -> MosqueConfig {
    MosqueConfig {
        mosque_id: MosqueId::from("mosque-1"),
        rules: PrayerTimes::from_fn(|_| PrayerRule::delayed(10).with_adhan_gap(10).with_rounding(true)),
        rounding_interval: Some(RoundingInterval::Ten),
        jummah: None,
    }
}
