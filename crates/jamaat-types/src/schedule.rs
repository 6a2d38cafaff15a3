//! Generated (per-mosque) day entries and manual edits.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::JamaatError;
use crate::prayer::{Prayer, PrayerTimes};
use crate::time::ClockTime;

/// Jamaat time and its derived adhan time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JamaatTimes {
    #[serde(rename = "final")]
    pub jamaat: ClockTime,
    pub adhan: ClockTime,
}

/// Who changed a generated day by hand, and why.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualEdit {
    pub edited_by: String,
    pub edited_at: DateTime<Utc>,
    pub reason: Option<String>,
}

/// One day of a mosque's generated schedule.
///
/// Serialized flat, as stored and served:
/// `{dayNumber, label, sunrise, perPrayer, isManuallyEdited, editedBy, editedAt, editReason}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GeneratedDayRecord", into = "GeneratedDayRecord")]
pub struct GeneratedDayTiming {
    pub day_number: u16,
    pub label: String,
    /// Copied from the base table unmodified.
    pub sunrise: ClockTime,
    pub prayers: PrayerTimes<JamaatTimes>,
    /// Set once the day has been edited by hand.
    pub manual_edit: Option<ManualEdit>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeneratedDayRecord {
    day_number: u16,
    label: String,
    sunrise: ClockTime,
    per_prayer: PrayerTimes<JamaatTimes>,
    is_manually_edited: bool,
    #[serde(default)]
    edited_by: Option<String>,
    #[serde(default)]
    edited_at: Option<DateTime<Utc>>,
    #[serde(default)]
    edit_reason: Option<String>,
}

impl From<GeneratedDayTiming> for GeneratedDayRecord {
    fn from(day: GeneratedDayTiming) -> Self {
        let is_manually_edited = day.is_manually_edited();
        let (edited_by, edited_at, edit_reason) = match day.manual_edit {
            Some(edit) => (Some(edit.edited_by), Some(edit.edited_at), edit.reason),
            None => (None, None, None),
        };
        Self {
            day_number: day.day_number,
            label: day.label,
            sunrise: day.sunrise,
            per_prayer: day.prayers,
            is_manually_edited,
            edited_by,
            edited_at,
            edit_reason,
        }
    }
}

impl TryFrom<GeneratedDayRecord> for GeneratedDayTiming {
    type Error = JamaatError;

    fn try_from(record: GeneratedDayRecord) -> Result<Self, Self::Error> {
        let manual_edit = match (record.is_manually_edited, record.edited_by, record.edited_at) {
            (false, _, _) => None,
            (true, Some(edited_by), Some(edited_at)) => Some(ManualEdit {
                edited_by,
                edited_at,
                reason: record.edit_reason,
            }),
            (true, _, _) => {
                return Err(JamaatError::invalid_argument(format!(
                    "day {} is marked edited without editedBy/editedAt",
                    record.day_number
                )));
            }
        };
        Ok(Self {
            day_number: record.day_number,
            label: record.label,
            sunrise: record.sunrise,
            prayers: record.per_prayer,
            manual_edit,
        })
    }
}

impl GeneratedDayTiming {
    pub fn is_manually_edited(&self) -> bool {
        self.manual_edit.is_some()
    }

    pub fn times(&self, prayer: Prayer) -> JamaatTimes {
        *self.prayers.get(prayer)
    }
}

/// Replacement values for one prayer of a day. `None` leaves the field alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PrayerEdit {
    #[serde(rename = "final")]
    pub jamaat: Option<ClockTime>,
    pub adhan: Option<ClockTime>,
}

/// Partial overwrite of a generated day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DayEdit {
    pub sunrise: Option<ClockTime>,
    pub prayers: PrayerTimes<PrayerEdit>,
}

impl DayEdit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sunrise(mut self, time: ClockTime) -> Self {
        self.sunrise = Some(time);
        self
    }

    pub fn jamaat(mut self, prayer: Prayer, time: ClockTime) -> Self {
        self.prayers.get_mut(prayer).jamaat = Some(time);
        self
    }

    pub fn adhan(mut self, prayer: Prayer, time: ClockTime) -> Self {
        self.prayers.get_mut(prayer).adhan = Some(time);
        self
    }

    /// `true` when the edit would change nothing.
    pub fn is_empty(&self) -> bool {
        self.sunrise.is_none() && self.prayers.iter().all(|(_, e)| e.jamaat.is_none() && e.adhan.is_none())
    }

    /// Overwrites the given fields of `day`. Edit metadata is stamped by the caller.
    pub fn apply_to(&self, day: &mut GeneratedDayTiming) {
        if let Some(sunrise) = self.sunrise {
            day.sunrise = sunrise;
        }
        for prayer in Prayer::ALL {
            let edit = self.prayers.get(prayer);
            let target = day.prayers.get_mut(prayer);
            if let Some(jamaat) = edit.jamaat {
                target.jamaat = jamaat;
            }
            if let Some(adhan) = edit.adhan {
                target.adhan = adhan;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn day() -> GeneratedDayTiming {
        let times = JamaatTimes { jamaat: t("05:00"), adhan: t("04:50") };
        GeneratedDayTiming {
            day_number: 1,
            label: "1-Jan".into(),
            sunrise: t("06:30"),
            prayers: PrayerTimes::from_fn(|_| times),
            manual_edit: None,
        }
    }

    #[test]
    fn test_empty_edit() {
        assert!(DayEdit::new().is_empty());
        assert!(!DayEdit::new().adhan(Prayer::Isha, t("20:00")).is_empty());
    }

    #[test]
    fn test_apply_only_given_fields() {
        let mut d = day();
        DayEdit::new().jamaat(Prayer::Asr, t("16:00")).apply_to(&mut d);
        assert_eq!(d.prayers.asr.jamaat, t("16:00"));
        assert_eq!(d.prayers.asr.adhan, t("04:50"));
        assert_eq!(d.prayers.fajr, day().prayers.fajr);
        assert_eq!(d.sunrise, t("06:30"));
    }

    #[test]
    fn test_flat_wire_shape() {
        let json = serde_json::to_value(day()).unwrap();
        assert_eq!(json["perPrayer"]["fajr"]["final"], "05:00");
        assert_eq!(json["dayNumber"], 1);
        assert_eq!(json["isManuallyEdited"], false);
        assert_eq!(json["editedBy"], serde_json::Value::Null);
    }

    #[test]
    fn test_edit_stamp_serialized_flat() {
        let mut d = day();
        d.manual_edit = Some(ManualEdit {
            edited_by: "secretary".into(),
            edited_at: "2025-03-01T09:00:00Z".parse().unwrap(),
            reason: Some("Ramadan".into()),
        });
        let json = serde_json::to_value(&d).unwrap();
        assert_eq!(json["isManuallyEdited"], true);
        assert_eq!(json["editedBy"], "secretary");
        assert_eq!(json["editReason"], "Ramadan");
        assert!(json.get("manualEdit").is_none());

        let back: GeneratedDayTiming = serde_json::from_value(json).unwrap();
        assert_eq!(back, d);
    }

    #[test]
    fn test_edited_flag_requires_stamp() {
        let mut json = serde_json::to_value(day()).unwrap();
        json["isManuallyEdited"] = serde_json::Value::Bool(true);
        assert!(serde_json::from_value::<GeneratedDayTiming>(json).is_err());
    }
}
