#![allow(dead_code)]

use chrono::{TimeZone, Utc};
use jamaat_core::prelude::*;
use jamaat_core::FixedClock;

pub fn t(s: &str) -> ClockTime {
    s.parse().unwrap()
}

/// A year whose fajr climbs until late June and falls back afterwards.
pub fn base_table() -> BaseTable {
    let days = grid_labels()
        .enumerate()
        .map(|(i, label)| {
            let swing = 90 - (i as i64 - 180).abs() / 2;
            BaseDayTiming {
                day_number: i as u16 + 1,
                label,
                fajr: ClockTime::wrapping(4 * 60 - 30 + swing),
                sunrise: ClockTime::wrapping(6 * 60 + swing),
                zenith: t("12:05"),
                dhuhr: ClockTime::wrapping(12 * 60 + 10 + swing / 10),
                asr: ClockTime::wrapping(15 * 60 + 30 - swing / 3),
                maghrib: ClockTime::wrapping(18 * 60 + 30 - swing),
                isha: ClockTime::wrapping(20 * 60 - swing),
            }
        })
        .collect();
    BaseTable::new("base-london", days).unwrap()
}

pub fn mosque() -> MosqueId {
    MosqueId::from("east-london")
}

pub fn config() -> MosqueConfig {
    MosqueConfigBuilder::new(mosque())
        .all_rules(PrayerRule::delayed(5).with_adhan_gap(10).with_rounding(true))
        .rounding_interval(10)
        .build()
        .unwrap()
}

pub fn store() -> InMemoryStore {
    let store = InMemoryStore::new();
    store.set_base_table(base_table());
    store.put_config(config());
    store
}

pub fn manager() -> ScheduleManager<InMemoryStore> {
    schedule_manager(store(), &EngineSettings::default())
        .with_clock(FixedClock::new(Utc.with_ymd_and_hms(2025, 5, 20, 8, 30, 0).unwrap()))
}
