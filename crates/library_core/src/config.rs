//! Runtime configuration for the catalog.
//!
//! # Responsibility
//! - Collect data file location, loan policy, and logging settings.
//! - Load partial JSON config files on top of defaults.
//!
//! # Invariants
//! - `loan_period_days` is within `1..=MAX_LOAN_PERIOD_DAYS`.
//! - `fine_per_day` is finite and non-negative.

use crate::logging::{default_log_level, init_logging, LoggingError};
use crate::service::checkout_ledger::{LoanPolicy, DEFAULT_FINE_PER_DAY, DEFAULT_LOAN_DAYS};
use crate::storage::{JsonFileStore, StorageResult, DEFAULT_DATA_FILE};
use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::fs;
use std::path::{Path, PathBuf};

/// Longest accepted loan period (about a century).
pub const MAX_LOAN_PERIOD_DAYS: i64 = 36_500;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
        }
    }
}

/// Catalog settings. Missing JSON fields fall back to `Default`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Backing JSON file for the dataset.
    pub data_path: PathBuf,
    /// Loan length applied when checkout has no explicit due date.
    pub loan_period_days: i64,
    /// Fine per whole overdue day.
    pub fine_per_day: f64,
    pub log_level: String,
    /// File logging is disabled when unset.
    pub log_dir: Option<PathBuf>,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            loan_period_days: DEFAULT_LOAN_DAYS,
            fine_per_day: DEFAULT_FINE_PER_DAY,
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl LibraryConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a JSON config file and validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_loan_period_days(mut self, days: i64) -> Self {
        self.loan_period_days = days;
        self
    }

    pub fn with_fine_per_day(mut self, fine: f64) -> Self {
        self.fine_per_day = fine;
        self
    }

    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    pub fn with_log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(1..=MAX_LOAN_PERIOD_DAYS).contains(&self.loan_period_days) {
            return Err(ConfigError::Invalid(format!(
                "loan_period_days must be between 1 and {MAX_LOAN_PERIOD_DAYS}, got {}",
                self.loan_period_days
            )));
        }
        if !self.fine_per_day.is_finite() || self.fine_per_day < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "fine_per_day must be a non-negative number, got {}",
                self.fine_per_day
            )));
        }
        Ok(())
    }

    /// Builds the ledger policy, re-checking values set through the builders.
    pub fn loan_policy(&self) -> ConfigResult<LoanPolicy> {
        self.validate()?;
        let loan_period = Duration::try_days(self.loan_period_days).ok_or_else(|| {
            ConfigError::Invalid(format!(
                "loan_period_days {} does not fit a duration",
                self.loan_period_days
            ))
        })?;
        Ok(LoanPolicy {
            loan_period,
            fine_per_day: self.fine_per_day,
        })
    }

    /// Opens the configured backing file, creating it when absent.
    pub fn open_store(&self) -> StorageResult<JsonFileStore> {
        JsonFileStore::open(&self.data_path)
    }

    /// Starts file logging when `log_dir` is set; otherwise does nothing.
    pub fn init_logging(&self) -> Result<(), LoggingError> {
        match &self.log_dir {
            Some(dir) => init_logging(&self.log_level, dir),
            None => Ok(()),
        }
    }
}
