use serde::{Deserialize, Serialize};
use std::fmt;

/// The five obligatory daily prayers, in the order they occur.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prayer {
    Fajr,
    Dhuhr,
    Asr,
    Maghrib,
    Isha,
}

impl Prayer {
    pub const ALL: [Prayer; 5] = [Prayer::Fajr, Prayer::Dhuhr, Prayer::Asr, Prayer::Maghrib, Prayer::Isha];

    /// Lowercase key used in field paths and serialized maps.
    pub fn key(&self) -> &'static str {
        match self {
            Prayer::Fajr => "fajr",
            Prayer::Dhuhr => "dhuhr",
            Prayer::Asr => "asr",
            Prayer::Maghrib => "maghrib",
            Prayer::Isha => "isha",
        }
    }
}

impl fmt::Display for Prayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Prayer::Fajr => "Fajr",
            Prayer::Dhuhr => "Dhuhr",
            Prayer::Asr => "Asr",
            Prayer::Maghrib => "Maghrib",
            Prayer::Isha => "Isha",
        };
        write!(f, "{}", s)
    }
}

/// One value per obligatory prayer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PrayerTimes<T> {
    pub fajr: T,
    pub dhuhr: T,
    pub asr: T,
    pub maghrib: T,
    pub isha: T,
}

impl<T> PrayerTimes<T> {
    /// Builds the set by calling `f` once per prayer, in prayer order.
    pub fn from_fn(mut f: impl FnMut(Prayer) -> T) -> Self {
        Self {
            fajr: f(Prayer::Fajr),
            dhuhr: f(Prayer::Dhuhr),
            asr: f(Prayer::Asr),
            maghrib: f(Prayer::Maghrib),
            isha: f(Prayer::Isha),
        }
    }

    pub fn get(&self, prayer: Prayer) -> &T {
        match prayer {
            Prayer::Fajr => &self.fajr,
            Prayer::Dhuhr => &self.dhuhr,
            Prayer::Asr => &self.asr,
            Prayer::Maghrib => &self.maghrib,
            Prayer::Isha => &self.isha,
        }
    }

    pub fn get_mut(&mut self, prayer: Prayer) -> &mut T {
        match prayer {
            Prayer::Fajr => &mut self.fajr,
            Prayer::Dhuhr => &mut self.dhuhr,
            Prayer::Asr => &mut self.asr,
            Prayer::Maghrib => &mut self.maghrib,
            Prayer::Isha => &mut self.isha,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(Prayer, &T) -> U) -> PrayerTimes<U> {
        PrayerTimes::from_fn(|p| f(p, self.get(p)))
    }

    /// Iterates `(prayer, value)` pairs in prayer order.
    pub fn iter(&self) -> impl Iterator<Item = (Prayer, &T)> {
        Prayer::ALL.into_iter().map(move |p| (p, self.get(p)))
    }
}
