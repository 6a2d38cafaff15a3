//! Clock arithmetic over a single 24-hour day.

use jamaat_types::{ClockTime, MINUTES_PER_DAY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which way [`round_time`] moves a value that is not already on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoundingDirection {
    Up,
    Down,
    /// Closest multiple; exact halves round up.
    Nearest,
}

impl fmt::Display for RoundingDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoundingDirection::Up => "up",
            RoundingDirection::Down => "down",
            RoundingDirection::Nearest => "nearest",
        };
        write!(f, "{}", s)
    }
}

/// Shifts `t` by `delta_minutes`, wrapping around midnight.
///
/// Any day carry is dropped; use [`adjust_time_with_carry`] when it matters.
pub fn adjust_time(t: ClockTime, delta_minutes: i64) -> ClockTime {
    adjust_time_with_carry(t, delta_minutes).0
}

/// Like [`adjust_time`], also returning the signed number of midnights crossed.
///
/// `adjust_time_with_carry("23:50", 20)` is `("00:10", 1)`;
/// `adjust_time_with_carry("00:10", -20)` is `("23:50", -1)`.
pub fn adjust_time_with_carry(t: ClockTime, delta_minutes: i64) -> (ClockTime, i64) {
    let day = MINUTES_PER_DAY as i64;
    // Reduce first so extreme deltas cannot overflow.
    let total = t.minutes() as i64 + delta_minutes.rem_euclid(day);
    (ClockTime::wrapping(total), delta_minutes.div_euclid(day) + total / day)
}

/// Rounds `t` to a multiple of `interval` minutes in the given direction.
///
/// Rounding up past `23:xx` wraps to the start of the day. An interval of 0
/// leaves `t` unchanged.
pub fn round_time(t: ClockTime, interval: u16, direction: RoundingDirection) -> ClockTime {
    if interval == 0 {
        return t;
    }
    let minutes = t.minutes() as i64;
    let step = interval as i64;
    let floor = minutes.div_euclid(step) * step;
    let rounded = match direction {
        RoundingDirection::Down => floor,
        RoundingDirection::Up if floor == minutes => floor,
        RoundingDirection::Up => floor + step,
        RoundingDirection::Nearest if (minutes - floor) * 2 >= step => floor + step,
        RoundingDirection::Nearest => floor,
    };
    ClockTime::wrapping(rounded)
}
