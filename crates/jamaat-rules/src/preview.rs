//! Read-only schedule preview with calculation breakdown.

use chrono::{Datelike, NaiveDate};
use jamaat_types::{BaseTable, ClockTime, MosqueConfig, MosqueId, PrayerTimes};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::calculator::PrayerCalculation;
use crate::generator::{schedule_iter, DayCalculation};

/// One previewed day: final times plus how each was reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewDay {
    pub day_number: u16,
    pub label: String,
    pub date: Option<NaiveDate>,
    pub is_friday: bool,
    pub jummah_applied: bool,
    pub sunrise: ClockTime,
    pub prayers: PrayerTimes<PrayerCalculation>,
}

impl From<DayCalculation<'_>> for PreviewDay {
    fn from(day: DayCalculation<'_>) -> Self {
        let is_friday = day.is_friday();
        let mut prayers = day.prayers;
        // The breakdown reports what worshippers would see on Fridays.
        prayers.dhuhr.times = day.times.dhuhr;
        Self {
            day_number: day.base.day_number,
            label: day.base.label.clone(),
            date: day.date,
            is_friday,
            jummah_applied: day.jummah_applied,
            sunrise: day.base.sunrise,
            prayers,
        }
    }
}

/// A window of previewed days. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchedulePreview {
    pub mosque_id: MosqueId,
    pub year: i32,
    /// `true` when no row remained from today and the window moved to the table end.
    pub fell_back: bool,
    pub days: Vec<PreviewDay>,
}

/// Previews the next `window_days` days starting at `today`.
///
/// The fold always starts at day one, so every previewed value matches what
/// [`generate`](crate::generate) would persist for the same year. Near the end
/// of the table the window stops at its last row. Only when no row remains
/// from today onwards does it fall back to the final `window_days` rows.
pub fn preview(table: &BaseTable, config: &MosqueConfig, window_days: usize, today: NaiveDate) -> SchedulePreview {
    let total = table.days().len();
    let (start, window, fell_back) = match table.position_of(today) {
        Some(start) if start < total => (start, window_days.min(total - start), false),
        _ => {
            let window = window_days.min(total);
            (total - window, window, true)
        }
    };

    let days: Vec<PreviewDay> = schedule_iter(table, config, today.year())
        .skip(start)
        .take(window)
        .map(PreviewDay::from)
        .collect();

    debug!(
        "previewed {} days from day {} for mosque {}{}",
        days.len(),
        start + 1,
        config.mosque_id,
        if fell_back { " (fell back to table end)" } else { "" }
    );

    SchedulePreview {
        mosque_id: config.mosque_id.clone(),
        year: today.year(),
        fell_back,
        days,
    }
}
