use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::routine::{
    derivation::compute_score,
    record::{hour_minute, round_to, DailyRecord},
};

/// Header of the routine table, in column order.
pub const COLUMNS: [&str; 12] = [
    "date",
    "wake_time",
    "wake_on_time",
    "cold_shower",
    "yoga",
    "warm_water",
    "last_meal",
    "first_meal",
    "fasting_hours",
    "fasting_ok",
    "score",
    "note",
];

/// The struct used for storing a day on the disk. Field order matches [COLUMNS]. Flags are
/// stored as `0`/`1` so the table stays readable by spreadsheet tools.
#[derive(PartialEq, Debug, Serialize, Deserialize, Clone)]
pub struct DailyRecordEntity {
    pub date: NaiveDate,
    #[serde(with = "hour_minute")]
    pub wake_time: NaiveTime,
    #[serde(with = "bool_int")]
    pub wake_on_time: bool,
    #[serde(with = "bool_int")]
    pub cold_shower: bool,
    #[serde(with = "bool_int")]
    pub yoga: bool,
    #[serde(with = "bool_int")]
    pub warm_water: bool,
    #[serde(with = "hour_minute")]
    pub last_meal: NaiveTime,
    #[serde(with = "hour_minute")]
    pub first_meal: NaiveTime,
    #[serde(serialize_with = "serialize_hours")]
    pub fasting_hours: f64,
    #[serde(with = "bool_int")]
    pub fasting_ok: bool,
    pub score: u8,
    #[serde(default)]
    pub note: String,
}

fn serialize_hours<S>(hours: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_f64(round_to(*hours, 2))
}

mod bool_int {
    use serde::{self, Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(u8::from(*value))
    }

    /// Tables touched by spreadsheet tools sometimes carry `1.0` or `TRUE`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "1.0" | "true" => Ok(true),
            "0" | "0.0" | "false" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!(
                "expected 0 or 1, found {other:?}"
            ))),
        }
    }
}

impl From<&DailyRecord> for DailyRecordEntity {
    fn from(record: &DailyRecord) -> Self {
        DailyRecordEntity {
            date: record.date,
            wake_time: record.wake_time,
            wake_on_time: record.wake_on_time,
            cold_shower: record.cold_shower,
            yoga: record.yoga,
            warm_water: record.warm_water,
            last_meal: record.last_meal,
            first_meal: record.first_meal,
            fasting_hours: record.fasting_hours,
            fasting_ok: record.fasting_ok,
            score: record.score,
            note: record.note.clone(),
        }
    }
}

impl From<DailyRecordEntity> for DailyRecord {
    fn from(
        DailyRecordEntity {
            date,
            wake_time,
            wake_on_time,
            cold_shower,
            yoga,
            warm_water,
            last_meal,
            first_meal,
            fasting_hours,
            fasting_ok,
            score,
            note,
        }: DailyRecordEntity,
    ) -> Self {
        let flags_score = compute_score([wake_on_time, cold_shower, yoga, warm_water, fasting_ok]);
        if flags_score != score {
            // Only happens when the table was edited by hand.
            warn!("Stored score {score} for {date} doesn't match its flags, using {flags_score}");
        }
        DailyRecord {
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
            score: flags_score,
            note,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use crate::routine::record::{DailyRecord, RawEntry};

    use super::{DailyRecordEntity, COLUMNS};

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn record() -> DailyRecord {
        DailyRecord::from_entry(RawEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            wake_time: hm(5, 0),
            cold_shower: true,
            yoga: false,
            warm_water: true,
            last_meal: hm(20, 0),
            first_meal: hm(3, 20),
            note: "rainy, slept late".into(),
        })
    }

    #[test]
    fn test_row_format() -> anyhow::Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(vec![]);
        writer.write_record(COLUMNS)?;
        writer.serialize(DailyRecordEntity::from(&record()))?;
        let written = String::from_utf8(writer.into_inner()?)?;

        assert_eq!(
            written,
            "date,wake_time,wake_on_time,cold_shower,yoga,warm_water,last_meal,first_meal,fasting_hours,fasting_ok,score,note\n\
             2024-01-01,05:00,1,1,0,1,20:00,03:20,7.33,0,3,\"rainy, slept late\"\n"
        );
        Ok(())
    }

    #[test]
    fn test_lenient_flags() -> anyhow::Result<()> {
        let data = "date,wake_time,wake_on_time,cold_shower,yoga,warm_water,last_meal,first_meal,fasting_hours,fasting_ok,score,note\n\
                    2024-01-01,5:00,1.0,TRUE,0,0,19:00,11:00,16.0,1,3,\n";
        let mut reader = csv::Reader::from_reader(data.as_bytes());
        let entity = reader.deserialize::<DailyRecordEntity>().next().unwrap()?;
        assert!(entity.wake_on_time);
        assert!(entity.cold_shower);
        assert!(!entity.yoga);
        assert_eq!(entity.wake_time, hm(5, 0));
        assert_eq!(entity.note, "");
        Ok(())
    }

    #[test]
    fn test_score_follows_flags() {
        let mut entity = DailyRecordEntity::from(&record());
        entity.score = 5;
        let record = DailyRecord::from(entity);
        assert_eq!(record.score(), 3);
    }
}
