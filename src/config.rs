//! Runtime configuration read from environment variables (and `.env`, via `dotenv`).

use crate::error::{AppError, Result};
use std::env::{self, VarError};
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_CUSTOMERS_FILE: &str = "customers.json";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// `CUSTOMERS_FILE`: JSON file holding the customer records.
    pub customers_file: PathBuf,
    /// `SENSOR_HTTP_TIMEOUT_SECS`: per-request timeout for sensor reads.
    pub sensor_timeout: Option<Duration>,
    /// `LOG_DIR`: directory for daily-rolling log files.
    pub log_dir: Option<PathBuf>,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for a timeout that is not a positive integer,
    /// and `AppError::Env` for values that are not valid Unicode.
    pub fn from_env() -> Result<Self> {
        let customers_file: PathBuf = optional_var("CUSTOMERS_FILE")?
            .unwrap_or_else(|| DEFAULT_CUSTOMERS_FILE.to_string())
            .into();

        let sensor_timeout = optional_var("SENSOR_HTTP_TIMEOUT_SECS")?
            .map(|raw| parse_timeout(&raw))
            .transpose()?;

        let log_dir = optional_var("LOG_DIR")?.map(PathBuf::from);

        Ok(Self {
            customers_file,
            sensor_timeout,
            log_dir,
        })
    }
}

fn optional_var(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_timeout(raw: &str) -> Result<Duration> {
    match raw.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(AppError::Config(format!(
            "SENSOR_HTTP_TIMEOUT_SECS must be a positive integer, got {:?}",
            raw
        ))),
    }
}
