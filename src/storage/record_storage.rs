use std::{
    collections::BTreeMap,
    io::{ErrorKind, Write},
    ops::Deref,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument};

use crate::routine::record::DailyRecord;

use super::{
    entities::{DailyRecordEntity, COLUMNS},
    error::StorageError,
};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Interface for abstracting storage of daily records. A store keeps at most one record per
/// date and always hands records back in date order.
pub trait RecordStorage {
    /// Reads the whole table. A table that doesn't exist yet is empty.
    fn load(&self) -> Result<Vec<DailyRecord>, StorageError>;

    /// Saves a record, replacing whatever was stored for the same date.
    fn upsert(&self, record: DailyRecord) -> Result<(), StorageError>;

    /// Removes the record for `date`. Returns whether there was one.
    fn remove(&self, date: NaiveDate) -> Result<bool, StorageError>;

    /// Raw contents of the backing table.
    fn export(&self) -> Result<Vec<u8>, StorageError>;
}

impl<T: Deref> RecordStorage for T
where
    T::Target: RecordStorage,
{
    fn load(&self) -> Result<Vec<DailyRecord>, StorageError> {
        self.deref().load()
    }

    fn upsert(&self, record: DailyRecord) -> Result<(), StorageError> {
        self.deref().upsert(record)
    }

    fn remove(&self, date: NaiveDate) -> Result<bool, StorageError> {
        self.deref().remove(date)
    }

    fn export(&self) -> Result<Vec<u8>, StorageError> {
        self.deref().export()
    }
}

/// The main realization of [RecordStorage], backed by a single CSV file.
#[derive(Debug, Clone)]
pub struct CsvRecordStorage {
    path: PathBuf,
}

impl CsvRecordStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `None` when the table hasn't been created yet.
    fn read_bytes(&self) -> Result<Option<Vec<u8>>, StorageError> {
        match std::fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::unavailable(&self.path, e)),
        }
    }

    fn parse(&self, bytes: &[u8]) -> Result<Vec<DailyRecord>, StorageError> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut reader = csv::Reader::from_reader(bytes);
        let rows = reader
            .deserialize::<DailyRecordEntity>()
            .map(|row| row.map(DailyRecord::from))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::from_csv(&self.path, e))?;
        Ok(merge_by_date(rows))
    }

    /// Replaces the table in one step: rows go to a temporary file next to the table which is
    /// then renamed over it, so readers never see a half written table.
    fn write_all(&self, records: &[DailyRecord]) -> Result<(), StorageError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| StorageError::unavailable(dir, e))?;

        let mut file =
            NamedTempFile::new_in(dir).map_err(|e| StorageError::unavailable(dir, e))?;
        {
            let mut writer = csv::WriterBuilder::new()
                .has_headers(false)
                .from_writer(&mut file);
            writer
                .write_record(COLUMNS)
                .map_err(|e| StorageError::from_csv(&self.path, e))?;
            for record in records {
                writer
                    .serialize(DailyRecordEntity::from(record))
                    .map_err(|e| StorageError::from_csv(&self.path, e))?;
            }
            writer
                .flush()
                .map_err(|e| StorageError::unavailable(&self.path, e))?;
        }
        file.flush()
            .and_then(|_| file.as_file().sync_all())
            .map_err(|e| StorageError::unavailable(&self.path, e))?;
        file.persist(&self.path)
            .map_err(|e| StorageError::unavailable(&self.path, e.error))?;

        debug!("Wrote {} records to {:?}", records.len(), self.path);
        Ok(())
    }
}

impl RecordStorage for CsvRecordStorage {
    fn load(&self) -> Result<Vec<DailyRecord>, StorageError> {
        match self.read_bytes()? {
            Some(bytes) => self.parse(&bytes),
            None => {
                debug!("No table at {:?} yet", self.path);
                Ok(vec![])
            }
        }
    }

    #[instrument(skip_all, fields(date = %record.date()))]
    fn upsert(&self, record: DailyRecord) -> Result<(), StorageError> {
        let existing = self.load()?;
        let replaced = existing.iter().any(|v| v.date() == record.date());
        let records = merge_by_date(existing.into_iter().chain([record]));
        self.write_all(&records)?;
        info!(replaced, total = records.len(), "Saved record");
        Ok(())
    }

    #[instrument(skip(self))]
    fn remove(&self, date: NaiveDate) -> Result<bool, StorageError> {
        let existing = self.load()?;
        let before = existing.len();
        let records = existing
            .into_iter()
            .filter(|v| v.date() != date)
            .collect::<Vec<_>>();
        if records.len() == before {
            debug!("Nothing stored for {date}");
            return Ok(false);
        }
        self.write_all(&records)?;
        info!(total = records.len(), "Removed record");
        Ok(true)
    }

    fn export(&self) -> Result<Vec<u8>, StorageError> {
        Ok(self.read_bytes()?.unwrap_or_default())
    }
}

/// Keeps the last record seen for every date and orders the result by date.
fn merge_by_date(records: impl IntoIterator<Item = DailyRecord>) -> Vec<DailyRecord> {
    records
        .into_iter()
        .map(|v| (v.date(), v))
        .collect::<BTreeMap<_, _>>()
        .into_values()
        .collect()
}
