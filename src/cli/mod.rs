pub mod export;
pub mod log;
pub mod remove;
pub mod show;
pub mod stats;

use std::{
    fmt::Display,
    io::{self, IsTerminal},
    path::PathBuf,
};

use anyhow::Result;
use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use export::{process_export_command, ExportCommand};
use log::{process_log_command, LogCommand};
use remove::{process_remove_command, RemoveCommand};
use show::{process_show_command, ShowCommand};
use stats::{process_stats_command, StatsCommand};
use tracing::{debug, level_filters::LevelFilter};

use crate::{
    storage::record_storage::CsvRecordStorage,
    utils::{
        clock::{Clock, DefaultClock},
        dir::default_data_file,
        logging::{enable_logging, CLI_PREFIX},
        time::parse_date,
    },
};

#[derive(Parser, Debug)]
#[command(name = "routine-log", version, long_about = None)]
#[command(about = "Daily routine tracker: wake time, fasting window and habits", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging to the console")]
    log: bool,
    #[arg(
        long,
        global = true,
        help = "Routine table to use. By default it's saved into $XDG_STATE_HOME/routine-log or $HOME/.local/state/routine-log"
    )]
    file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
#[command(version, about, long_about = None)]
enum Commands {
    #[command(about = "Save the routine of a day. Saving a day again replaces it")]
    Log {
        #[command(flatten)]
        command: LogCommand,
    },
    #[command(about = "Display all saved days")]
    Show {
        #[command(flatten)]
        command: ShowCommand,
    },
    #[command(about = "Display how often each habit was kept during the last days")]
    Stats {
        #[command(flatten)]
        command: StatsCommand,
    },
    #[command(about = "Write the raw routine table to stdout or a file")]
    Export {
        #[command(flatten)]
        command: ExportCommand,
    },
    #[command(about = "Delete the saved routine of a day")]
    Remove {
        #[command(flatten)]
        command: RemoveCommand,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DateStyle {
    Uk,
    Us,
}

impl From<DateStyle> for chrono_english::Dialect {
    fn from(value: DateStyle) -> Self {
        match value {
            DateStyle::Uk => Self::Uk,
            DateStyle::Us => Self::Us,
        }
    }
}

impl Display for DateStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DateStyle::Uk => write!(f, "uk"),
            DateStyle::Us => write!(f, "us"),
        }
    }
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    let data_file = match args.file {
        Some(file) => file,
        None => default_data_file()?,
    };
    let logs_dir = data_file
        .parent()
        .map(|v| v.join("logs"))
        .unwrap_or_else(|| PathBuf::from("logs"));

    let logging_level = if args.log {
        Some(LevelFilter::TRACE)
    } else {
        None
    };
    enable_logging(CLI_PREFIX, &logs_dir, logging_level, args.log);
    debug!("Using routine table {data_file:?}");

    let storage = CsvRecordStorage::new(data_file);
    let clock = DefaultClock;
    let colored = io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();

    match args.commands {
        Commands::Log { command } => {
            process_log_command(command, &storage, &clock, colored, &mut stdout)?;
            Ok(())
        }
        Commands::Show { command } => process_show_command(command, &storage, colored, &mut stdout),
        Commands::Stats { command } => {
            process_stats_command(command, &storage, &clock, &mut stdout)
        }
        Commands::Export { command } => process_export_command(command, &storage, &mut stdout),
        Commands::Remove { command } => {
            process_remove_command(command, &storage, &clock, &mut stdout)
        }
    }
}

/// Turns a user supplied date into a calendar day. Missing dates mean today.
fn resolve_date(
    date: Option<&str>,
    date_style: DateStyle,
    clock: &impl Clock,
) -> Result<NaiveDate> {
    let now = clock.now();
    match date {
        None => Ok(now.date_naive()),
        Some(value) => parse_date(value, now, date_style.into()).map_err(|e| {
            Args::command()
                .error(clap::error::ErrorKind::ValueValidation, e.to_string())
                .into()
        }),
    }
}

/// Check mark used in tables.
fn mark(value: bool) -> &'static str {
    if value {
        "✅"
    } else {
        "❌"
    }
}
