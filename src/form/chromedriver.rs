//! Local chromedriver process
//!
//! Spawned on demand for `--spawn-driver` and killed when dropped.

use std::process::Stdio;
use std::time::Duration;

use tokio::process::{Child, Command};

use crate::common::{Error, Result};

/// Timeout for chromedriver to report ready
const SPAWN_TIMEOUT_SECS: u64 = 10;

/// Port chromedriver listens on when the URL has none
const DEFAULT_PORT: u16 = 9515;

/// A running chromedriver; the process dies with this value
pub struct DriverProcess {
    _child: Child,
    url: String,
}

impl DriverProcess {
    /// Start chromedriver for `webdriver_url` and wait until it is ready
    pub async fn spawn(webdriver_url: &str) -> Result<Self> {
        let port = listen_port(webdriver_url)?;
        let binary = which::which("chromedriver").map_err(|_| Error::DriverNotFound)?;

        tracing::debug!("Spawning {} on port {}", binary.display(), port);
        let child = Command::new(&binary)
            .arg(format!("--port={}", port))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let process = Self {
            _child: child,
            url: webdriver_url.trim_end_matches('/').to_string(),
        };
        process.wait_ready().await?;
        Ok(process)
    }

    async fn wait_ready(&self) -> Result<()> {
        let http = reqwest::Client::new();
        let status_url = format!("{}/status", self.url);
        let deadline = std::time::Instant::now() + Duration::from_secs(SPAWN_TIMEOUT_SECS);

        loop {
            if std::time::Instant::now() >= deadline {
                return Err(Error::DriverStartTimeout(SPAWN_TIMEOUT_SECS));
            }

            tokio::time::sleep(Duration::from_millis(100)).await;

            let Ok(response) = http.get(&status_url).send().await else {
                continue;
            };
            let Ok(status) = response.json::<serde_json::Value>().await else {
                continue;
            };
            if is_ready(&status) {
                tracing::debug!("chromedriver ready at {}", self.url);
                return Ok(());
            }
        }
    }
}

/// Port to bind, taken from the WebDriver URL
fn listen_port(webdriver_url: &str) -> Result<u16> {
    let url = reqwest::Url::parse(webdriver_url)
        .map_err(|e| Error::Config(format!("Invalid WebDriver URL '{}': {}", webdriver_url, e)))?;
    if !matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "::1" | "[::1]")) {
        return Err(Error::Config(format!(
            "Can only spawn chromedriver for a local WebDriver URL, got '{}'",
            webdriver_url
        )));
    }
    Ok(url.port().unwrap_or(DEFAULT_PORT))
}

/// W3C `/status` puts readiness under `value.ready`
fn is_ready(status: &serde_json::Value) -> bool {
    status["value"]["ready"].as_bool().unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_listen_port() {
        assert_eq!(listen_port("http://localhost:9515").unwrap(), 9515);
        assert_eq!(listen_port("http://127.0.0.1:4444/").unwrap(), 4444);
        assert_eq!(listen_port("http://localhost").unwrap(), DEFAULT_PORT);
        assert!(listen_port("http://grid.example.com:4444").is_err());
        assert!(listen_port("not a url").is_err());
    }

    #[test]
    fn test_is_ready() {
        assert!(is_ready(&json!({"value": {"ready": true, "message": "ChromeDriver ready for new sessions."}})));
        assert!(!is_ready(&json!({"value": {"ready": false}})));
        assert!(!is_ready(&json!({})));
    }
}
