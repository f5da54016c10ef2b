//! Live Chrome session through a chromedriver server.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use thirtyfour::ChromiumLikeCapabilities;
use thirtyfour::prelude::*;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::locator::Locator;
use crate::session::{Element, Scope, Session};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct ChromeSession {
    driver: WebDriver,
}

pub struct ChromeElement {
    inner: WebElement,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    value: StatusValue,
}

#[derive(Debug, Deserialize)]
struct StatusValue {
    #[serde(default)]
    ready: bool,
    #[serde(default)]
    message: String,
}

/// Asks the WebDriver server whether it can start a session.
pub async fn probe(webdriver_url: &str) -> Result<()> {
    let unavailable = |reason: String| TrackerError::WebDriverUnavailable {
        url: webdriver_url.to_string(),
        reason,
    };

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| unavailable(e.to_string()))?;

    let body = client
        .get(format!("{webdriver_url}/status"))
        .send()
        .await
        .map_err(|e| unavailable(e.to_string()))?
        .text()
        .await
        .map_err(|e| unavailable(e.to_string()))?;

    let status: StatusResponse =
        serde_json::from_str(&body).map_err(|e| unavailable(format!("unexpected status reply: {e}")))?;

    if status.value.ready {
        debug!("WebDriver ready: {}", status.value.message);
        Ok(())
    } else {
        Err(unavailable(status.value.message))
    }
}

impl ChromeSession {
    pub async fn start(config: &Config) -> Result<Self> {
        let mut caps = DesiredCapabilities::chrome();
        if config.headless {
            caps.set_headless()?;
        }
        caps.add_arg("--no-sandbox")?;
        caps.add_arg("--disable-dev-shm-usage")?;
        caps.add_arg("--window-size=1200,800")?;

        let driver = WebDriver::new(config.webdriver_url.as_str(), caps).await?;
        info!("Chrome session started (headless: {})", config.headless);
        Ok(ChromeSession { driver })
    }
}

fn by(locator: &Locator) -> By {
    match *locator {
        Locator::Css(sel) => By::Css(sel),
        Locator::XPath(sel) => By::XPath(sel),
    }
}

fn wrap(found: Vec<WebElement>) -> Vec<ChromeElement> {
    found.into_iter().map(|inner| ChromeElement { inner }).collect()
}

impl Scope for ChromeSession {
    type Element = ChromeElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ChromeElement>> {
        Ok(wrap(self.driver.find_all(by(locator)).await?))
    }
}

impl Scope for ChromeElement {
    type Element = ChromeElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<ChromeElement>> {
        Ok(wrap(self.inner.find_all(by(locator)).await?))
    }
}

impl Element for ChromeElement {
    async fn text(&self) -> Result<String> {
        Ok(self.inner.text().await?)
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self.inner.attr(name).await?)
    }

    async fn click(&self) -> Result<()> {
        Ok(self.inner.click().await?)
    }

    async fn clear(&self) -> Result<()> {
        Ok(self.inner.clear().await?)
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        Ok(self.inner.send_keys(text).await?)
    }

    async fn is_attached(&self) -> Result<bool> {
        Ok(self.inner.is_present().await?)
    }
}

impl Session for ChromeSession {
    async fn goto(&self, url: &str) -> Result<()> {
        Ok(self.driver.goto(url).await?)
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<ChromeElement> {
        self.driver
            .query(by(locator))
            .wait(timeout, POLL_INTERVAL)
            .first()
            .await
            .map(|inner| ChromeElement { inner })
            .map_err(|e| {
                debug!("wait for {locator} ended with: {e}");
                TrackerError::Timeout {
                    what: locator.to_string(),
                    seconds: timeout.as_secs(),
                }
            })
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        Ok(self.driver.screenshot(path).await?)
    }

    async fn close(&self) -> Result<()> {
        Ok(self.driver.clone().quit().await?)
    }
}
