//! Base (unadjusted) timetable records.

use chrono::{Datelike, Month, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{JamaatError, Result};
use crate::prayer::Prayer;
use crate::time::ClockTime;

/// Number of days in the canonical base table (leap-year layout).
pub const DAYS_IN_TABLE: usize = 366;

/// Leap year used to place `D-MMM` labels on the 366-day grid.
const GRID_YEAR: i32 = 2024;

/// One day of raw astronomical times, as supplied by the ingestion collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseDayTiming {
    /// 1-based position in the table.
    pub day_number: u16,
    /// Calendar label, `D-MMM` (e.g. `"7-Mar"`).
    pub label: String,
    pub fajr: ClockTime,
    pub sunrise: ClockTime,
    pub zenith: ClockTime,
    pub dhuhr: ClockTime,
    pub asr: ClockTime,
    pub maghrib: ClockTime,
    pub isha: ClockTime,
}

impl BaseDayTiming {
    /// Raw time for an obligatory prayer.
    pub fn time_of(&self, prayer: Prayer) -> ClockTime {
        match prayer {
            Prayer::Fajr => self.fajr,
            Prayer::Dhuhr => self.dhuhr,
            Prayer::Asr => self.asr,
            Prayer::Maghrib => self.maghrib,
            Prayer::Isha => self.isha,
        }
    }

    /// Calendar date of this row in `year`. `None` for `29-Feb` outside leap years.
    pub fn date_in(&self, year: i32) -> Option<NaiveDate> {
        calendar_date(&self.label, year)
    }
}

/// Resolves a `D-MMM` label (e.g. `"29-Feb"`) to a date in `year`.
///
/// Returns `None` for malformed labels and for dates that do not exist in `year`.
pub fn calendar_date(label: &str, year: i32) -> Option<NaiveDate> {
    let (day, month) = label.split_once('-')?;
    if day.is_empty() || day.len() > 2 || month.len() != 3 {
        return None;
    }
    let day: u32 = day.parse().ok()?;
    let month: Month = month.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)
}

/// The full 366-day base timetable.
///
/// The ingestion collaborator validates the upstream file; construction here
/// only checks the shape the generator relies on: 366 rows, numbered in order,
/// with labels that land on consecutive days of a leap year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseTable {
    reference: String,
    days: Vec<BaseDayTiming>,
}

impl BaseTable {
    /// Wraps `days` as a table identified by `reference` (e.g. an upload id).
    ///
    /// # Errors
    /// Returns `InvalidArgument` when the rows do not form a full, ordered year.
    pub fn new(reference: impl Into<String>, days: Vec<BaseDayTiming>) -> Result<Self> {
        if days.len() != DAYS_IN_TABLE {
            return Err(JamaatError::invalid_argument(format!(
                "base table must have {} days, got {}",
                DAYS_IN_TABLE,
                days.len()
            )));
        }

        for (index, day) in days.iter().enumerate() {
            let expected = index + 1;
            if day.day_number as usize != expected {
                return Err(JamaatError::invalid_argument(format!(
                    "base table row {} has day number {}",
                    expected, day.day_number
                )));
            }
            let ordinal = calendar_date(&day.label, GRID_YEAR).map(|d| d.ordinal() as usize);
            if ordinal != Some(expected) {
                return Err(JamaatError::invalid_argument(format!(
                    "base table row {} has out-of-order or malformed label '{}'",
                    expected, day.label
                )));
            }
        }

        Ok(Self {
            reference: reference.into(),
            days,
        })
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn days(&self) -> &[BaseDayTiming] {
        &self.days
    }

    /// Row for a 1-based day number.
    pub fn day(&self, day_number: u16) -> Option<&BaseDayTiming> {
        (day_number as usize).checked_sub(1).and_then(|i| self.days.get(i))
    }

    /// Index of the row whose label matches `date`'s day and month.
    pub fn position_of(&self, date: NaiveDate) -> Option<usize> {
        let grid = NaiveDate::from_ymd_opt(GRID_YEAR, date.month(), date.day())?;
        let index = grid.ordinal0() as usize;
        (index < self.days.len()).then_some(index)
    }
}

/// Labels of the 366-day grid in order, `1-Jan` through `31-Dec`.
pub fn grid_labels() -> impl Iterator<Item = String> {
    const MONTHS: [&str; 12] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec"];
    NaiveDate::from_ymd_opt(GRID_YEAR, 1, 1)
        .into_iter()
        .flat_map(|start| start.iter_days())
        .take(DAYS_IN_TABLE)
        .map(|d| format!("{}-{}", d.day(), MONTHS[d.month0() as usize]))
}
