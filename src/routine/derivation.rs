//! Pure derivations from the raw values of a day: fasting duration, goal compliance and the
//! daily score. Nothing here validates input, times are well-formed by construction.

use chrono::{NaiveTime, Timelike};

/// Waking up at this time or earlier counts as on time.
pub const WAKE_TARGET: NaiveTime = match NaiveTime::from_hms_opt(5, 0, 0) {
    Some(v) => v,
    None => panic!("05:00 is a valid time"),
};

/// Minimum fasting window in hours.
pub const FASTING_TARGET_HOURS: f64 = 16.0;

const MINUTES_IN_DAY: i64 = 24 * 60;

pub fn minutes_since_midnight(time: NaiveTime) -> u32 {
    time.hour() * 60 + time.minute()
}

/// Hours between the last meal and the next first meal. If the first meal is not after the last
/// one the window crossed midnight. Equal times count as a whole day.
pub fn compute_fasting_hours(last_meal: NaiveTime, first_meal: NaiveTime) -> f64 {
    let mut diff =
        minutes_since_midnight(first_meal) as i64 - minutes_since_midnight(last_meal) as i64;
    if diff <= 0 {
        diff += MINUTES_IN_DAY;
    }
    diff as f64 / 60.
}

pub fn is_wake_on_time(wake_time: NaiveTime, target: NaiveTime) -> bool {
    minutes_since_midnight(wake_time) <= minutes_since_midnight(target)
}

pub fn is_fasting_ok(fasting_hours: f64, target_hours: f64) -> bool {
    fasting_hours >= target_hours
}

/// Number of goals met on a day.
pub fn compute_score(flags: [bool; 5]) -> u8 {
    flags.into_iter().map(u8::from).sum()
}
