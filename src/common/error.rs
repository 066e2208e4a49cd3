//! Error types for the QA scenario runners
//!
//! Messages carry the expected and the observed value so a failed scenario
//! can be diagnosed from its report line alone.

use std::io;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the scenario runners
#[derive(Error, Debug)]
pub enum Error {
    // === Synchronization Errors ===
    #[error("Timed out after {secs} seconds waiting for {what}")]
    Timeout { what: String, secs: u64 },

    // === Assertion Errors ===
    #[error("Assertion failed: {0}")]
    Assertion(String),

    // === Transport Errors ===
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    // === WebDriver Process Errors ===
    #[error("chromedriver not found on PATH. Install it or start a WebDriver server and pass --webdriver <url>")]
    DriverNotFound,

    #[error("chromedriver did not report ready within {0} seconds")]
    DriverStartTimeout(u64),

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a timeout error for a bounded wait
    pub fn timeout(what: impl Into<String>, secs: u64) -> Self {
        Self::Timeout {
            what: what.into(),
            secs,
        }
    }

    /// Create an assertion error
    pub fn assertion(message: impl Into<String>) -> Self {
        Self::Assertion(message.into())
    }
}
