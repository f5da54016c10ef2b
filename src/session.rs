//! What the tracker needs from a browser.
//!
//! `webdriver::ChromeSession` drives a real Chrome through chromedriver;
//! `snapshot::SnapshotSession` answers the same calls from saved HTML.

#![allow(async_fn_in_trait)]

use std::path::Path;
use std::time::Duration;

use crate::error::Result;
use crate::locator::Locator;

/// Anything elements can be searched under: the whole page or one element.
pub trait Scope {
    type Element: Element;

    /// Every match for `locator`, in document order. No match is `Ok(vec![])`.
    async fn find_all(&self, locator: &Locator) -> Result<Vec<Self::Element>>;
}

pub trait Element: Scope<Element = Self> + Sized {
    async fn text(&self) -> Result<String>;
    async fn attr(&self, name: &str) -> Result<Option<String>>;
    async fn click(&self) -> Result<()>;
    async fn clear(&self) -> Result<()>;
    async fn send_keys(&self, text: &str) -> Result<()>;
    /// False once the page has re-rendered the element away.
    async fn is_attached(&self) -> Result<bool>;
}

pub trait Session: Scope {
    async fn goto(&self, url: &str) -> Result<()>;

    /// Blocks until `locator` matches something or `timeout` runs out.
    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<Self::Element>;

    async fn screenshot(&self, path: &Path) -> Result<()>;

    /// Ends the browser session. Called exactly once per run.
    async fn close(&self) -> Result<()>;
}
