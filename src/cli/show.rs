use std::io::Write;

use ansi_term::Style;
use anyhow::Result;
use clap::Parser;

use crate::{
    routine::record::{DailyRecord, Habit},
    storage::{entities::COLUMNS, record_storage::RecordStorage},
    utils::time::{format_date, TIME_FORMAT},
};

use super::mark;

#[derive(Debug, Parser)]
pub struct ShowCommand {
    #[arg(long, help = "Print records as JSON")]
    json: bool,
}

pub fn process_show_command(
    ShowCommand { json }: ShowCommand,
    storage: &impl RecordStorage,
    colored: bool,
    out: &mut impl Write,
) -> Result<()> {
    let records = storage.load()?;

    if json {
        serde_json::to_writer_pretty(&mut *out, &records)?;
        writeln!(out)?;
        return Ok(());
    }

    if records.is_empty() {
        writeln!(out, "No records yet")?;
        return Ok(());
    }

    let header = COLUMNS.join("\t");
    if colored {
        writeln!(out, "{}", Style::new().bold().paint(header))?;
    } else {
        writeln!(out, "{header}")?;
    }
    for record in &records {
        writeln!(out, "{}", format_row(record))?;
    }
    Ok(())
}

fn format_row(record: &DailyRecord) -> String {
    [
        format_date(record.date()),
        record.wake_time().format(TIME_FORMAT).to_string(),
        mark(record.habit(Habit::WakeOnTime)).to_string(),
        mark(record.habit(Habit::ColdShower)).to_string(),
        mark(record.habit(Habit::Yoga)).to_string(),
        mark(record.habit(Habit::WarmWater)).to_string(),
        record.last_meal().format(TIME_FORMAT).to_string(),
        record.first_meal().format(TIME_FORMAT).to_string(),
        format!("{:.2}", record.fasting_hours()),
        mark(record.habit(Habit::FastingOk)).to_string(),
        record.score().to_string(),
        record.note().to_string(),
    ]
    .join("\t")
}
