use std::io::Write;

use ansi_term::Colour;
use anyhow::Result;
use chrono::NaiveTime;
use clap::Parser;
use tracing::info;

use crate::{
    routine::{
        derivation::FASTING_TARGET_HOURS,
        record::{DailyRecord, Habit, RawEntry},
    },
    storage::record_storage::RecordStorage,
    utils::{
        clock::Clock,
        time::{format_date, parse_time},
    },
};

use super::{resolve_date, DateStyle};

#[derive(Debug, Parser)]
pub struct LogCommand {
    #[arg(
        long,
        short,
        help = "Day of the entry. Examples are \"2024-03-15\", \"yesterday\", \"15/03/2025\". Defaults to today"
    )]
    date: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long = "wake", short, default_value = "05:00", value_parser = parse_time, help = "Wake up time, HH:MM")]
    wake_time: NaiveTime,
    #[arg(long, help = "Took a cold shower")]
    cold_shower: bool,
    #[arg(long, help = "Did yoga")]
    yoga: bool,
    #[arg(long, help = "Drank warm water")]
    warm_water: bool,
    #[arg(long, default_value = "19:00", value_parser = parse_time, help = "Last meal of the previous day, HH:MM")]
    last_meal: NaiveTime,
    #[arg(long, default_value = "11:00", value_parser = parse_time, help = "First meal of the day, HH:MM")]
    first_meal: NaiveTime,
    #[arg(long, short, default_value = "", help = "Free text note")]
    note: String,
    #[arg(long, help = "Show derived values without saving")]
    dry_run: bool,
}

/// Derives the day from the entered values, prints a summary and saves it unless it's a dry run.
pub fn process_log_command(
    LogCommand {
        date,
        date_style,
        wake_time,
        cold_shower,
        yoga,
        warm_water,
        last_meal,
        first_meal,
        note,
        dry_run,
    }: LogCommand,
    storage: &impl RecordStorage,
    clock: &impl Clock,
    colored: bool,
    out: &mut impl Write,
) -> Result<DailyRecord> {
    let date = resolve_date(date.as_deref(), date_style, clock)?;

    let record = DailyRecord::from_entry(RawEntry {
        date,
        wake_time,
        cold_shower,
        yoga,
        warm_water,
        last_meal,
        first_meal,
        note,
    });

    print_summary(&record, colored, out)?;

    if dry_run {
        writeln!(out, "Dry run, nothing was saved")?;
        return Ok(record);
    }

    storage.upsert(record.clone())?;
    info!("Saved routine for {date}");
    let saved = format!("Saved {}", format_date(date));
    if colored {
        writeln!(out, "{}", Colour::Green.paint(saved))?;
    } else {
        writeln!(out, "{saved}")?;
    }
    Ok(record)
}

fn print_summary(record: &DailyRecord, colored: bool, out: &mut impl Write) -> Result<()> {
    let fasting_ok = record.habit(Habit::FastingOk);
    let verdict = if fasting_ok {
        format!("target met ({FASTING_TARGET_HOURS}h)")
    } else {
        format!("below target ({FASTING_TARGET_HOURS}h)")
    };
    let verdict = match (colored, fasting_ok) {
        (false, _) => verdict,
        (true, true) => Colour::Green.paint(verdict).to_string(),
        (true, false) => Colour::Red.paint(verdict).to_string(),
    };
    writeln!(
        out,
        "Fasting: {:.2}h -> {verdict}",
        record.fasting_hours()
    )?;
    writeln!(out, "Score: {}/5", record.score())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use chrono::{NaiveDate, NaiveTime};
    use clap::Parser;
    use tempfile::tempdir;

    use crate::{
        cli::tests::clock_at,
        routine::record::Habit,
        storage::record_storage::{CsvRecordStorage, RecordStorage},
    };

    use super::{process_log_command, LogCommand};

    fn parse(args: &[&str]) -> LogCommand {
        LogCommand::try_parse_from(std::iter::once("log").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let dir = tempdir()?;
        let storage = CsvRecordStorage::new(dir.path().join("log.csv"));
        let mut out = Vec::new();

        let record =
            process_log_command(parse(&[]), &storage, &clock_at(2024, 5, 1), false, &mut out)?;

        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        assert_eq!(record.wake_time(), NaiveTime::from_hms_opt(5, 0, 0).unwrap());
        assert_eq!(record.fasting_hours(), 16.0);
        assert!(record.habit(Habit::WakeOnTime));
        assert!(!record.habit(Habit::Yoga));
        assert_eq!(record.score(), 2);
        assert_eq!(storage.load()?, vec![record]);

        let out = String::from_utf8(out)?;
        assert_eq!(
            out,
            "Fasting: 16.00h -> target met (16h)\nScore: 2/5\nSaved 2024-05-01\n"
        );
        Ok(())
    }

    #[test]
    fn test_dry_run_doesnt_save() -> Result<()> {
        let dir = tempdir()?;
        let storage = CsvRecordStorage::new(dir.path().join("log.csv"));
        let mut out = Vec::new();

        let record = process_log_command(
            parse(&[
                "--dry-run",
                "--last-meal",
                "12:00",
                "--first-meal",
                "20:00",
                "--wake",
                "06:10",
            ]),
            &storage,
            &clock_at(2024, 5, 1),
            false,
            &mut out,
        )?;

        assert_eq!(record.score(), 0);
        assert!(storage.load()?.is_empty());
        assert!(String::from_utf8(out)?.contains("8.00h -> below target"));
        Ok(())
    }

    #[test]
    fn test_logging_same_day_replaces() -> Result<()> {
        let dir = tempdir()?;
        let storage = CsvRecordStorage::new(dir.path().join("log.csv"));
        let clock = clock_at(2024, 5, 1);

        process_log_command(
            parse(&["--date", "2024-04-30", "--yoga"]),
            &storage,
            &clock,
            false,
            &mut Vec::new(),
        )?;
        let second = process_log_command(
            parse(&["--date", "2024-04-30", "--cold-shower", "--note", " cold "]),
            &storage,
            &clock,
            false,
            &mut Vec::new(),
        )?;

        let records = storage.load()?;
        assert_eq!(records, vec![second]);
        assert!(!records[0].habit(Habit::Yoga));
        assert_eq!(records[0].note(), "cold");
        Ok(())
    }
}
