use std::{io::Write, path::PathBuf};

use anyhow::Result;
use clap::Parser;
use tracing::info;

use crate::storage::record_storage::RecordStorage;

#[derive(Debug, Parser)]
pub struct ExportCommand {
    #[arg(long, short, help = "File to write the table into. Prints to stdout when omitted")]
    output: Option<PathBuf>,
}

/// Copies the routine table byte for byte.
pub fn process_export_command(
    ExportCommand { output }: ExportCommand,
    storage: &impl RecordStorage,
    out: &mut impl Write,
) -> Result<()> {
    let bytes = storage.export()?;
    if bytes.is_empty() {
        eprintln!("No records yet, nothing to export");
        return Ok(());
    }

    match output {
        Some(path) => {
            std::fs::write(&path, &bytes)?;
            info!("Exported {} bytes to {path:?}", bytes.len());
        }
        None => {
            out.write_all(&bytes)?;
            out.flush()?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use anyhow::Result;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::tempdir;

    use crate::{
        routine::record::{DailyRecord, RawEntry},
        storage::record_storage::{CsvRecordStorage, RecordStorage},
    };

    use super::{process_export_command, ExportCommand};

    fn storage_with_a_day(dir: &tempfile::TempDir) -> Result<CsvRecordStorage> {
        let storage = CsvRecordStorage::new(dir.path().join("log.csv"));
        storage.upsert(DailyRecord::from_entry(RawEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            wake_time: NaiveTime::from_hms_opt(5, 0, 0).unwrap(),
            cold_shower: false,
            yoga: true,
            warm_water: false,
            last_meal: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            first_meal: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            note: String::new(),
        }))?;
        Ok(storage)
    }

    #[test]
    fn test_export_to_stdout() -> Result<()> {
        let dir = tempdir()?;
        let storage = storage_with_a_day(&dir)?;
        let mut out = Vec::new();

        process_export_command(ExportCommand { output: None }, &storage, &mut out)?;

        assert_eq!(out, fs::read(storage.path())?);
        Ok(())
    }

    #[test]
    fn test_export_to_file() -> Result<()> {
        let dir = tempdir()?;
        let storage = storage_with_a_day(&dir)?;
        let target = dir.path().join("copy.csv");

        process_export_command(
            ExportCommand {
                output: Some(target.clone()),
            },
            &storage,
            &mut Vec::new(),
        )?;

        assert_eq!(fs::read(target)?, fs::read(storage.path())?);
        Ok(())
    }

    #[test]
    fn test_export_without_table() -> Result<()> {
        let dir = tempdir()?;
        let storage = CsvRecordStorage::new(dir.path().join("log.csv"));
        let mut out = Vec::new();

        process_export_command(ExportCommand { output: None }, &storage, &mut out)?;

        assert!(out.is_empty());
        Ok(())
    }
}
