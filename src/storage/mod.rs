//! Storage is organized through [record_storage::CsvRecordStorage].
//! The basic idea is:
//!   - There is a single CSV table with one row per calendar date.
//!   - Saving a day replaces any previous row for that date, then the whole table is rewritten
//!     in date order through a temporary file.
//!   - A missing table is a valid empty state.

pub mod entities;
pub mod error;
pub mod record_storage;
