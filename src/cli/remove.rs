use std::io::Write;

use anyhow::Result;
use clap::Parser;

use crate::{
    storage::record_storage::RecordStorage,
    utils::{clock::Clock, time::format_date},
};

use super::{resolve_date, DateStyle};

#[derive(Debug, Parser)]
pub struct RemoveCommand {
    #[arg(
        long,
        short,
        help = "Day to delete. Examples are \"2024-03-15\", \"yesterday\", \"15/03/2025\""
    )]
    date: String,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
}

pub fn process_remove_command(
    RemoveCommand { date, date_style }: RemoveCommand,
    storage: &impl RecordStorage,
    clock: &impl Clock,
    out: &mut impl Write,
) -> Result<()> {
    let date = resolve_date(Some(date.as_str()), date_style, clock)?;
    if storage.remove(date)? {
        writeln!(out, "Removed {}", format_date(date))?;
    } else {
        writeln!(out, "Nothing saved for {}", format_date(date))?;
    }
    Ok(())
}
