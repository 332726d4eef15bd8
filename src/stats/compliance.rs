use chrono::{Days, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::{
    routine::record::{DailyRecord, Habit},
    utils::percentage::{count_percentage, Percentage},
};

/// Compliance of every habit over a window of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceSummary {
    pub from: NaiveDate,
    pub to: NaiveDate,
    /// Days inside the window that have a record.
    pub recorded_days: usize,
    /// One entry per habit, in [Habit::ALL] order.
    pub rates: Vec<(Habit, Percentage)>,
}

impl ComplianceSummary {
    pub fn rate(&self, habit: Habit) -> Option<Percentage> {
        self.rates
            .iter()
            .find(|(h, _)| *h == habit)
            .map(|(_, rate)| *rate)
    }
}

/// Share of days in `[as_of - (window_days - 1), as_of]` on which each habit was met. When
/// `as_of` isn't given the latest recorded date is used. Returns `None` when the window holds no
/// records. A window reaching before the earliest representable date starts at that date.
pub fn windowed_compliance(
    records: &[DailyRecord],
    window_days: u32,
    as_of: Option<NaiveDate>,
) -> Option<ComplianceSummary> {
    if window_days == 0 {
        return None;
    }
    let to = as_of.or_else(|| records.iter().map(|v| v.date()).max())?;
    let from = to
        .checked_sub_days(Days::new(u64::from(window_days) - 1))
        .unwrap_or(NaiveDate::MIN);

    let window = records
        .iter()
        .filter(|v| (from..=to).contains(&v.date()))
        .collect::<Vec<_>>();
    debug!("{} records between {from} and {to}", window.len());

    let rates = Habit::ALL
        .into_iter()
        .map(|habit| {
            let met = window.iter().filter(|v| v.habit(habit)).count();
            count_percentage(met, window.len()).map(|rate| (habit, rate))
        })
        .collect::<Option<Vec<_>>>()?;

    Some(ComplianceSummary {
        from,
        to,
        recorded_days: window.len(),
        rates,
    })
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::routine::record::{DailyRecord, Habit, RawEntry};

    use super::windowed_compliance;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn all_done(date: NaiveDate) -> DailyRecord {
        DailyRecord::from_entry(RawEntry {
            date,
            wake_time: hm(4, 50),
            cold_shower: true,
            yoga: true,
            warm_water: true,
            last_meal: hm(18, 30),
            first_meal: hm(11, 0),
            note: String::new(),
        })
    }

    fn none_done(date: NaiveDate) -> DailyRecord {
        DailyRecord::from_entry(RawEntry {
            date,
            wake_time: hm(7, 0),
            cold_shower: false,
            yoga: false,
            warm_water: false,
            last_meal: hm(21, 0),
            first_meal: hm(7, 0),
            note: String::new(),
        })
    }

    #[test]
    fn test_two_day_window_is_half() {
        let records = vec![all_done(day(1)), none_done(day(2))];
        assert_eq!(records[0].fasting_hours(), 16.5);
        assert_eq!(records[1].fasting_hours(), 10.0);

        let summary = windowed_compliance(&records, 2, Some(day(2))).unwrap();

        assert_eq!(summary.recorded_days, 2);
        assert_eq!(summary.from, day(1));
        assert_eq!(summary.rates.len(), 5);
        for (_, rate) in &summary.rates {
            assert_eq!(**rate, 50.0);
        }
    }

    #[test]
    fn test_defaults_to_latest_date() {
        let records = vec![all_done(day(1)), all_done(day(5)), none_done(day(6))];

        let summary = windowed_compliance(&records, 2, None).unwrap();

        assert_eq!(summary.to, day(6));
        assert_eq!(summary.from, day(5));
        assert_eq!(*summary.rate(Habit::Yoga).unwrap(), 50.0);
    }

    #[test]
    fn test_window_bounds_are_inclusive() {
        let records = vec![all_done(day(1)), none_done(day(3)), none_done(day(4))];

        let summary = windowed_compliance(&records, 3, Some(day(3))).unwrap();

        assert_eq!(summary.recorded_days, 2);
        assert_eq!(*summary.rate(Habit::ColdShower).unwrap(), 50.0);
    }

    #[test]
    fn test_rates_are_rounded() {
        let records = vec![all_done(day(1)), none_done(day(2)), none_done(day(3))];

        let summary = windowed_compliance(&records, 7, None).unwrap();

        assert_eq!(*summary.rate(Habit::FastingOk).unwrap(), 33.3);
    }

    #[test]
    fn test_no_data() {
        assert_eq!(windowed_compliance(&[], 7, None), None);
        assert_eq!(windowed_compliance(&[], 7, Some(day(1))), None);

        let records = vec![all_done(day(1))];
        assert_eq!(windowed_compliance(&records, 3, Some(day(20))), None);
        assert_eq!(windowed_compliance(&records, 0, None), None);
    }

    #[test]
    fn test_window_past_earliest_date() {
        let records = vec![all_done(day(1)), none_done(day(2))];

        let summary = windowed_compliance(&records, u32::MAX, None).unwrap();
        assert_eq!(summary.from, NaiveDate::MIN);
        assert_eq!(summary.to, day(2));
        assert_eq!(summary.recorded_days, 2);
        assert_eq!(*summary.rate(Habit::Yoga).unwrap(), 50.0);

        assert_eq!(windowed_compliance(&records, 7, Some(NaiveDate::MIN)), None);
    }
}
