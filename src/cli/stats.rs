use std::io::Write;

use anyhow::Result;
use clap::Parser;

use crate::{
    stats::compliance::windowed_compliance,
    storage::record_storage::RecordStorage,
    utils::{clock::Clock, time::format_date},
};

use super::{resolve_date, DateStyle};

#[derive(Debug, Parser)]
pub struct StatsCommand {
    #[arg(
        long,
        short,
        default_value_t = 7,
        value_parser = clap::value_parser!(u32).range(3..=60),
        help = "Number of days to include, from 3 to 60"
    )]
    days: u32,
    #[arg(
        long,
        help = "Last day of the period. Defaults to the latest saved day. Examples are \"2024-03-15\", \"yesterday\""
    )]
    as_of: Option<String>,
    #[arg(long, default_value_t = DateStyle::Uk, help = "Style of dates used during parsing. For Uk it's day/month/year. For Us it's month/day/year")]
    date_style: DateStyle,
    #[arg(long, help = "Print the summary as JSON")]
    json: bool,
}

pub fn process_stats_command(
    StatsCommand {
        days,
        as_of,
        date_style,
        json,
    }: StatsCommand,
    storage: &impl RecordStorage,
    clock: &impl Clock,
    out: &mut impl Write,
) -> Result<()> {
    let as_of = as_of
        .as_deref()
        .map(|v| resolve_date(Some(v), date_style, clock))
        .transpose()?;

    let records = storage.load()?;
    let summary = windowed_compliance(&records, days, as_of);

    if json {
        serde_json::to_writer_pretty(&mut *out, &summary)?;
        writeln!(out)?;
        return Ok(());
    }

    let Some(summary) = summary else {
        writeln!(out, "No records in this period")?;
        return Ok(());
    };

    writeln!(
        out,
        "{} .. {} ({} of {days} days recorded)",
        format_date(summary.from),
        format_date(summary.to),
        summary.recorded_days
    )?;
    for (habit, rate) in &summary.rates {
        writeln!(out, "{habit}\t{rate}")?;
    }
    Ok(())
}
