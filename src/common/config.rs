//! Configuration file handling
//!
//! Every setting has a built-in default, so the runners work without any
//! file on disk. A `config.toml` only needs the keys it overrides.

use serde::Deserialize;
use std::path::Path;

use super::paths::config_path;
use super::Result;

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Browser form flow settings
    #[serde(default)]
    pub form: FormConfig,

    /// REST API flow settings
    #[serde(default)]
    pub api: ApiConfig,
}

/// Settings for the practice form scenario
#[derive(Debug, Deserialize, Clone)]
pub struct FormConfig {
    /// Page under test
    #[serde(default = "default_form_url")]
    pub url: String,

    /// WebDriver server to open the session on
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Run Chrome without a window
    #[serde(default)]
    pub headless: bool,

    /// Upper bound for every element wait
    #[serde(default = "default_wait_timeout")]
    pub wait_timeout_secs: u64,

    /// Delay between element polls
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    /// Pause after scrolling the submit button into view
    #[serde(default = "default_settle")]
    pub settle_ms: u64,
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            url: default_form_url(),
            webdriver_url: default_webdriver_url(),
            headless: false,
            wait_timeout_secs: default_wait_timeout(),
            poll_interval_ms: default_poll_interval(),
            settle_ms: default_settle(),
        }
    }
}

fn default_form_url() -> String {
    "https://demoqa.com/automation-practice-form".to_string()
}
fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}
fn default_wait_timeout() -> u64 {
    20
}
fn default_poll_interval() -> u64 {
    500
}
fn default_settle() -> u64 {
    1000
}

/// Settings for the REST API scenarios
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Value sent in the `x-api-key` header
    #[serde(default = "default_api_key")]
    pub api_key: String,

    /// Timeout for a single HTTP request
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: default_api_key(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://reqres.in/api".to_string()
}
fn default_api_key() -> String {
    "reqres-free-v1".to_string()
}
fn default_request_timeout() -> u64 {
    30
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        match config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| super::Error::ConfigParse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_public_targets() {
        let config = Config::default();
        assert_eq!(config.form.url, "https://demoqa.com/automation-practice-form");
        assert_eq!(config.form.wait_timeout_secs, 20);
        assert!(!config.form.headless);
        assert_eq!(config.api.base_url, "https://reqres.in/api");
        assert_eq!(config.api.api_key, "reqres-free-v1");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [form]
            headless = true

            [api]
            base_url = "http://127.0.0.1:8080/api"
            "#,
        )
        .unwrap();

        assert!(config.form.headless);
        assert_eq!(config.form.settle_ms, 1000);
        assert_eq!(config.api.base_url, "http://127.0.0.1:8080/api");
        assert_eq!(config.api.request_timeout_secs, 30);
    }

    #[test]
    fn test_load_from_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[form]\nwait_timeout_secs = \"soon\"").unwrap();

        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, crate::common::Error::ConfigParse(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/qa/config.toml")).unwrap_err();
        assert!(matches!(err, crate::common::Error::FileRead { .. }));
    }
}
