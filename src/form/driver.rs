//! Browser session over WebDriver
//!
//! Waits are bounded polls: look the element up, check its state, sleep,
//! repeat until the deadline. The first element satisfying the state wins.

use std::fmt;
use std::time::{Duration, Instant};

use thirtyfour::prelude::*;

use crate::common::{Error, FormConfig, Result};

/// Chrome flags for an uncluttered window
const CHROME_ARGS: [&str; 4] = [
    "--start-maximized",
    "--disable-infobars",
    "--disable-extensions",
    "--disable-notifications",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LocatorKind {
    Id,
    Class,
    XPath,
}

/// How to find an element, with a readable description for timeouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    kind: LocatorKind,
    value: String,
}

impl Locator {
    pub fn id(value: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::Id,
            value: value.into(),
        }
    }

    pub fn class(value: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::Class,
            value: value.into(),
        }
    }

    pub fn xpath(value: impl Into<String>) -> Self {
        Self {
            kind: LocatorKind::XPath,
            value: value.into(),
        }
    }

    fn by(&self) -> By {
        match self.kind {
            LocatorKind::Id => By::Id(self.value.clone()),
            LocatorKind::Class => By::ClassName(self.value.clone()),
            LocatorKind::XPath => By::XPath(self.value.clone()),
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            LocatorKind::Id => write!(f, "#{}", self.value),
            LocatorKind::Class => write!(f, ".{}", self.value),
            LocatorKind::XPath => write!(f, "{}", self.value),
        }
    }
}

/// Element state a wait can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Present,
    Clickable,
    Visible,
}

impl fmt::Display for ElementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ElementState::Present => "present",
            ElementState::Clickable => "clickable",
            ElementState::Visible => "visible",
        };
        f.write_str(s)
    }
}

impl ElementState {
    // Lookups race with re-renders; a failed check counts as "not yet".
    async fn holds(&self, element: &WebElement) -> bool {
        match self {
            ElementState::Present => true,
            ElementState::Clickable => element.is_clickable().await.unwrap_or(false),
            ElementState::Visible => element.is_displayed().await.unwrap_or(false),
        }
    }
}

/// An open WebDriver session
pub struct BrowserSession {
    driver: WebDriver,
    timeout: Duration,
    poll_interval: Duration,
}

impl BrowserSession {
    /// Open a Chrome session on the configured WebDriver server
    pub async fn connect(config: &FormConfig) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        for arg in CHROME_ARGS {
            caps.add_arg(arg)?;
        }
        if config.headless {
            caps.add_arg("--headless=new")?;
        }

        tracing::debug!("Opening browser session on {}", config.webdriver_url);
        let driver = WebDriver::new(config.webdriver_url.as_str(), caps).await?;

        Ok(Self {
            driver,
            timeout: Duration::from_secs(config.wait_timeout_secs),
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    pub async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.driver.goto(url).await?;
        Ok(())
    }

    /// Find an element without waiting
    pub async fn find(&self, locator: &Locator) -> Result<WebElement> {
        Ok(self.driver.find(locator.by()).await?)
    }

    pub async fn wait_present(&self, locator: &Locator) -> Result<WebElement> {
        self.wait_for(locator, ElementState::Present).await
    }

    pub async fn wait_clickable(&self, locator: &Locator) -> Result<WebElement> {
        self.wait_for(locator, ElementState::Clickable).await
    }

    pub async fn wait_visible(&self, locator: &Locator) -> Result<WebElement> {
        self.wait_for(locator, ElementState::Visible).await
    }

    /// Poll until an element matching `locator` is in `state`
    pub async fn wait_for(&self, locator: &Locator, state: ElementState) -> Result<WebElement> {
        let deadline = Instant::now() + self.timeout;

        loop {
            for element in self.driver.find_all(locator.by()).await? {
                if state.holds(&element).await {
                    tracing::debug!("{} is {}", locator, state);
                    return Ok(element);
                }
            }

            if Instant::now() >= deadline {
                return Err(Error::timeout(
                    format!("element {} to be {}", locator, state),
                    self.timeout.as_secs(),
                ));
            }

            tokio::time::sleep(self.poll_interval).await;
        }
    }

    /// Click through JavaScript, for controls whose pointer events are
    /// intercepted by an overlay
    pub async fn js_click(&self, element: &WebElement) -> Result<()> {
        self.driver
            .execute("arguments[0].click();", vec![element.to_json()?])
            .await?;
        Ok(())
    }

    pub async fn scroll_into_view(&self, element: &WebElement) -> Result<()> {
        self.driver
            .execute("arguments[0].scrollIntoView(true);", vec![element.to_json()?])
            .await?;
        Ok(())
    }

    /// End the session and close the browser
    pub async fn quit(self) -> Result<()> {
        tracing::debug!("Closing browser session");
        self.driver.quit().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_descriptions() {
        assert_eq!(Locator::id("firstName").to_string(), "#firstName");
        assert_eq!(Locator::class("modal-content").to_string(), ".modal-content");
        assert_eq!(
            Locator::xpath("//label[contains(text(),'Male')]").to_string(),
            "//label[contains(text(),'Male')]"
        );
    }

    #[test]
    fn test_timeout_message_uses_locator_and_state() {
        let locator = Locator::id("submit");
        let err = Error::timeout(format!("element {} to be {}", locator, ElementState::Clickable), 20);
        assert_eq!(
            err.to_string(),
            "Timed out after 20 seconds waiting for element #submit to be clickable"
        );
    }
}
