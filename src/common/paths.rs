//! Configuration paths
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/qa-scenarios/`
//! - macOS: `~/Library/Application Support/qa-scenarios/`
//! - Windows: `%APPDATA%\qa-scenarios\`

use std::path::PathBuf;

/// Directory name used under the platform config root
const APP_NAME: &str = "qa-scenarios";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}
