//! Minute-of-day clock values and their `HH:MM` interchange form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::JamaatError;

/// Minutes in one day.
pub const MINUTES_PER_DAY: u16 = 1440;

/// A time of day with minute precision.
///
/// The only accepted textual form is the 24-hour zero-padded `HH:MM`
/// (e.g. `"05:07"`). Serializes as that string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Builds a time from minutes since midnight. `None` when `minutes >= 1440`.
    pub const fn from_minutes(minutes: u16) -> Option<Self> {
        if minutes < MINUTES_PER_DAY {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Builds a time from hour and minute components.
    pub const fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        if hour < 24 && minute < 60 {
            Some(Self(hour as u16 * 60 + minute as u16))
        } else {
            None
        }
    }

    /// Wraps an arbitrary minute count onto the 24-hour clock.
    pub fn wrapping(minutes: i64) -> Self {
        Self(minutes.rem_euclid(MINUTES_PER_DAY as i64) as u16)
    }

    pub const fn minutes(self) -> u16 {
        self.0
    }

    pub const fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub const fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    /// Returns `true` if `s` is a well-formed `HH:MM` value.
    pub fn is_valid(s: &str) -> bool {
        s.parse::<ClockTime>().is_ok()
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = JamaatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || JamaatError::invalid_argument(format!("'{}' is not a HH:MM time", s));

        let bytes = s.as_bytes();
        if bytes.len() != 5 || bytes[2] != b':' {
            return Err(malformed());
        }
        let digit = |b: u8| if b.is_ascii_digit() { Some(b - b'0') } else { None };
        let mut parts = [0u8; 4];
        for (slot, &b) in parts.iter_mut().zip([bytes[0], bytes[1], bytes[3], bytes[4]].iter()) {
            *slot = digit(b).ok_or_else(malformed)?;
        }

        let hour = parts[0] * 10 + parts[1];
        let minute = parts[2] * 10 + parts[3];
        Self::from_hm(hour, minute).ok_or_else(malformed)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = JamaatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_format() {
        let t: ClockTime = "05:07".parse().unwrap();
        assert_eq!(t.minutes(), 307);
        assert_eq!(t.to_string(), "05:07");
        assert_eq!("23:59".parse::<ClockTime>().unwrap().minutes(), 1439);
        assert_eq!("00:00".parse::<ClockTime>().unwrap(), ClockTime::MIDNIGHT);
    }

    #[test]
    fn test_rejects_malformed() {
        for bad in ["5:07", "05:7", "24:00", "12:60", "0507", "05-07", "ab:cd", " 05:07", "05:07 ", "+5:07"] {
            assert!(bad.parse::<ClockTime>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_wrapping() {
        assert_eq!(ClockTime::wrapping(-1).to_string(), "23:59");
        assert_eq!(ClockTime::wrapping(1440 + 65).to_string(), "01:05");
    }

    #[test]
    fn test_serde_as_string() {
        let t = ClockTime::from_hm(13, 30).unwrap();
        assert_eq!(serde_json::to_string(&t).unwrap(), "\"13:30\"");
        let back: ClockTime = serde_json::from_str("\"13:30\"").unwrap();
        assert_eq!(back, t);
        assert!(serde_json::from_str::<ClockTime>("\"1:30\"").is_err());
    }
}
