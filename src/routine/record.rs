use std::fmt::Display;

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use super::derivation::{
    compute_fasting_hours, compute_score, is_fasting_ok, is_wake_on_time, FASTING_TARGET_HOURS,
    WAKE_TARGET,
};

/// Values entered by the user for a single day. Everything else in [DailyRecord] is derived
/// from these.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    pub date: NaiveDate,
    pub wake_time: NaiveTime,
    pub cold_shower: bool,
    pub yoga: bool,
    pub warm_water: bool,
    pub last_meal: NaiveTime,
    pub first_meal: NaiveTime,
    pub note: String,
}

/// The tracked goals, in the order they are shown and scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Habit {
    WakeOnTime,
    ColdShower,
    Yoga,
    WarmWater,
    FastingOk,
}

impl Habit {
    pub const ALL: [Habit; 5] = [
        Habit::WakeOnTime,
        Habit::ColdShower,
        Habit::Yoga,
        Habit::WarmWater,
        Habit::FastingOk,
    ];

    /// Name of the column storing the habit.
    pub fn column(&self) -> &'static str {
        match self {
            Habit::WakeOnTime => "wake_on_time",
            Habit::ColdShower => "cold_shower",
            Habit::Yoga => "yoga",
            Habit::WarmWater => "warm_water",
            Habit::FastingOk => "fasting_ok",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Habit::WakeOnTime => "wake (<= 05:00)",
            Habit::ColdShower => "cold shower",
            Habit::Yoga => "yoga",
            Habit::WarmWater => "warm water",
            Habit::FastingOk => "fasting (16h)",
        }
    }
}

impl Display for Habit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A complete day. Derived fields can only be produced by [DailyRecord::from_entry] (or by
/// reading back a stored row), so the score always matches the flags.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRecord {
    pub(crate) date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub(crate) wake_time: NaiveTime,
    pub(crate) wake_on_time: bool,
    pub(crate) cold_shower: bool,
    pub(crate) yoga: bool,
    pub(crate) warm_water: bool,
    #[serde(with = "hour_minute")]
    pub(crate) last_meal: NaiveTime,
    #[serde(with = "hour_minute")]
    pub(crate) first_meal: NaiveTime,
    pub(crate) fasting_hours: f64,
    pub(crate) fasting_ok: bool,
    pub(crate) score: u8,
    pub(crate) note: String,
}

impl DailyRecord {
    pub fn from_entry(entry: RawEntry) -> Self {
        let RawEntry {
            date,
            wake_time,
            cold_shower,
            yoga,
            warm_water,
            last_meal,
            first_meal,
            note,
        } = entry;

        let fasting_hours = compute_fasting_hours(last_meal, first_meal);
        // Compliance is decided on the exact value, only the stored value is rounded.
        let fasting_ok = is_fasting_ok(fasting_hours, FASTING_TARGET_HOURS);
        let wake_on_time = is_wake_on_time(wake_time, WAKE_TARGET);
        let score = compute_score([wake_on_time, cold_shower, yoga, warm_water, fasting_ok]);

        Self {
            date,
            wake_time,
            wake_on_time,
            cold_shower,
            yoga,
            warm_water,
            last_meal,
            first_meal,
            fasting_hours: round_to(fasting_hours, 2),
            fasting_ok,
            score,
            note: note.trim().to_string(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn wake_time(&self) -> NaiveTime {
        self.wake_time
    }

    pub fn last_meal(&self) -> NaiveTime {
        self.last_meal
    }

    pub fn first_meal(&self) -> NaiveTime {
        self.first_meal
    }

    pub fn fasting_hours(&self) -> f64 {
        self.fasting_hours
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn note(&self) -> &str {
        &self.note
    }

    pub fn habit(&self, habit: Habit) -> bool {
        match habit {
            Habit::WakeOnTime => self.wake_on_time,
            Habit::ColdShower => self.cold_shower,
            Habit::Yoga => self.yoga,
            Habit::WarmWater => self.warm_water,
            Habit::FastingOk => self.fasting_ok,
        }
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

pub(crate) mod hour_minute {
    use chrono::NaiveTime;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use crate::utils::time::{parse_time, TIME_FORMAT};

    pub fn serialize<S>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&time.format(TIME_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_time(&s).map_err(serde::de::Error::custom)
    }
}
