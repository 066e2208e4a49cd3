//! Common utilities shared by both scenario runners

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use config::{ApiConfig, Config, FormConfig};
pub use error::{Error, Result};
