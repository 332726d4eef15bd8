use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("routine table at {path:?} is unavailable: {source}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("routine table at {path:?} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl StorageError {
    pub(crate) fn unavailable(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StorageError::Unavailable {
            path: path.into(),
            source,
        }
    }

    /// csv reports both broken rows and failed writes, only the former make the table malformed.
    pub(crate) fn from_csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        if source.is_io_error() {
            StorageError::Unavailable {
                path: path.into(),
                source: source.into(),
            }
        } else {
            StorageError::Malformed {
                path: path.into(),
                source,
            }
        }
    }
}
