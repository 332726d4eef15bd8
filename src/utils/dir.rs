use std::{env, io, path::PathBuf};

use anyhow::{Context, Result};

const APPLICATION_DIR: &str = "routine-log";
pub const DATA_FILE_NAME: &str = "routine_log.csv";

/// Directory holding the routine table and logs. Resolved from `$XDG_STATE_HOME` or
/// `$HOME/.local/state` (`%APPDATA%` on Windows) and created if missing.
pub fn create_application_default_path() -> Result<PathBuf> {
    let mut path = {
        #[cfg(windows)]
        {
            env::var("APPDATA")
                .map(PathBuf::from)
                .context("APPDATA should be present on Windows")?
        }
        #[cfg(not(windows))]
        {
            env::var("XDG_STATE_HOME")
                .map(PathBuf::from)
                .or_else(|_| {
                    env::var("HOME").map(|home| {
                        let mut path = PathBuf::from(home);
                        path.push(".local/state");
                        path
                    })
                })
                .context("Couldn't find neither XDG_STATE_HOME nor HOME")?
        }
    };
    path.push(APPLICATION_DIR);

    match std::fs::create_dir_all(&path) {
        Ok(_) => Ok(path),
        Err(v) if v.kind() == io::ErrorKind::AlreadyExists => Ok(path),
        Err(v) => Err(v.into()),
    }
}

pub fn default_data_file() -> Result<PathBuf> {
    Ok(create_application_default_path()?.join(DATA_FILE_NAME))
}
