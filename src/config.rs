//! Runtime configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::Error;

/// Environment variable naming the ephemeris data directory.
pub const EPHE_PATH: &str = "EPHE_PATH";

/// Where the ephemeris provider finds its data files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub ephe_path: PathBuf,
}

impl Config {
    /// Creates a configuration pointing at `ephe_path`.
    pub fn new(ephe_path: impl Into<PathBuf>) -> Self {
        Self {
            ephe_path: ephe_path.into(),
        }
    }

    /// Reads the data directory from the `EPHE_PATH` environment variable.
    ///
    /// Returns [`Error::Configuration`] if it is unset or empty.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_var(std::env::var_os(EPHE_PATH))
    }

    pub(crate) fn from_var(value: Option<OsString>) -> Result<Self, Error> {
        match value {
            Some(path) if !path.is_empty() => Ok(Self::new(path)),
            _ => Err(Error::Configuration(format!("{EPHE_PATH} must be specified"))),
        }
    }

    /// Path of a data file inside the ephemeris directory.
    pub fn data_file(&self, name: impl AsRef<Path>) -> PathBuf {
        self.ephe_path.join(name)
    }
}
