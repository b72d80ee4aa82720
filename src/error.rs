//! Defines the application's error types and a convenience `Result` alias.
//!
//! `AppError` covers everything that can abort a CLI command. `ReadingError` is the
//! tagged failure of a single sensor reading; it never aborts anything; at the
//! boundary it collapses into the `-1` sentinel.
//! Errors that do not implement `Clone` are wrapped in `Arc` to allow `AppError` to be cloneable.

use std::sync::Arc;
use thiserror::Error;

/// The primary error enumeration for all application-specific errors.
#[derive(Error, Debug, Clone)]
pub enum AppError {
    /// Error originating from the HTTP client (`reqwest`) outside of a sensor reading.
    #[error("API Error: {0}")]
    Api(Arc<reqwest::Error>),

    /// Error during JSON parsing or serialisation (`serde_json`).
    #[error("JSON Parsing Error: {0}")]
    JsonParse(Arc<serde_json::Error>),

    /// Error related to accessing environment variables.
    #[error("Environment Error: {0}")]
    Env(#[from] std::env::VarError),

    /// Error related to standard I/O operations.
    #[error("I/O Error: {0}")]
    Io(Arc<std::io::Error>),

    /// Invalid configuration value.
    #[error("Configuration Error: {0}")]
    Config(String),

    /// Error specific to CLI logic or argument handling.
    #[error("CLI Error: {0}")]
    Cli(String),

    /// Error originating from user interaction prompts (`dialoguer`).
    #[error("Dialoguer Error: {0}")]
    Dialoguer(Arc<dialoguer::Error>),

    /// Error related to progress bar style templating (`indicatif`).
    #[error("Progress Style Template Error: {0}")]
    Template(Arc<indicatif::style::TemplateError>),
}

/// A specialized `Result` type using the application's `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Why a sensor reading could not be determined.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReadingError {
    /// DNS, connect, timeout or body-read failure.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The vendor answered with a non-2xx status.
    #[error("vendor returned HTTP {0}")]
    Status(u16),

    /// The body was not JSON.
    #[error("response body is not valid JSON: {0}")]
    MalformedBody(String),

    /// The vendor shape was recognised but the expected field is absent.
    #[error("missing field `{0}`")]
    MissingField(String),

    /// The expected field is present but not numeric, or a parent is not an object.
    #[error("field `{0}` has an unexpected type")]
    WrongType(String),

    /// The vendor reported a concentration below zero.
    #[error("negative concentration {0}")]
    Negative(f64),

    /// The URL matches none of the supported vendors.
    #[error("unknown API format")]
    UnrecognizedVendor,

    /// An IQAir index with no matching breakpoint row.
    #[error("AQI index {0} is outside every breakpoint range")]
    IndexOutOfRange(f64),
}

impl ReadingError {
    /// Value reported in place of a PM2.5 concentration when a reading fails.
    pub const SENTINEL: f64 = -1.0;
}

// --- From implementations ---
// These allow easy conversion from external error types into AppError
// using the `?` operator. Arc is used for non-Clone error types.

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Api(Arc::new(err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(Arc::new(err))
    }
}

impl From<dialoguer::Error> for AppError {
    fn from(err: dialoguer::Error) -> Self {
        AppError::Dialoguer(Arc::new(err))
    }
}

impl From<indicatif::style::TemplateError> for AppError {
    fn from(err: indicatif::style::TemplateError) -> Self {
        AppError::Template(Arc::new(err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::JsonParse(Arc::new(err))
    }
}

impl From<reqwest::Error> for ReadingError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ReadingError::Status(status.as_u16()),
            None => ReadingError::Transport(err.to_string()),
        }
    }
}
