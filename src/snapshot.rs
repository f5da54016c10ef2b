//! Browser stand-in backed by a saved HTML page.
//!
//! Powers `--replay` and the tests. There is no rendering: clicks and typing
//! are only recorded, and XPath candidates never match. An element carrying
//! `data-detached` behaves like one the page has re-rendered away.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::error::{Result, TrackerError};
use crate::locator::Locator;
use crate::session::{Element, Scope, Session};

/// Everything the tracker asked the stand-in browser to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Goto(String),
    Clicked(String),
    Cleared,
    Typed(String),
    Screenshot(PathBuf),
    Closed,
}

type Journal = Rc<RefCell<Vec<Action>>>;

pub struct SnapshotSession {
    page: Html,
    journal: Journal,
}

pub struct SnapshotElement {
    fragment: Html,
    journal: Journal,
}

impl SnapshotSession {
    pub fn from_html(html: &str) -> Self {
        SnapshotSession {
            page: Html::parse_document(html),
            journal: Rc::default(),
        }
    }

    pub fn open(path: &Path) -> Result<Self> {
        let html = std::fs::read_to_string(path)?;
        info!("Loaded saved page {}", path.display());
        Ok(Self::from_html(&html))
    }

    pub fn actions(&self) -> Vec<Action> {
        self.journal.borrow().clone()
    }

    fn record(&self, action: Action) {
        self.journal.borrow_mut().push(action);
    }
}

impl SnapshotElement {
    // The element is re-parsed on its own so nested lookups only see its
    // descendants.
    fn new(element: ElementRef<'_>, journal: &Journal) -> Self {
        SnapshotElement {
            fragment: Html::parse_fragment(&element.html()),
            journal: Rc::clone(journal),
        }
    }

    fn element(&self) -> Option<ElementRef<'_>> {
        self.fragment
            .root_element()
            .children()
            .find_map(ElementRef::wrap)
    }

    fn record(&self, action: Action) {
        self.journal.borrow_mut().push(action);
    }
}

fn css(locator: &Locator) -> Result<Option<Selector>> {
    match locator {
        Locator::Css(sel) => Selector::parse(sel)
            .map(Some)
            .map_err(|e| TrackerError::Driver(format!("invalid selector '{sel}': {e}"))),
        Locator::XPath(_) => {
            debug!("{locator} skipped: saved pages only support CSS");
            Ok(None)
        }
    }
}

fn visible_text(element: ElementRef<'_>) -> String {
    let text: String = element.text().collect::<Vec<_>>().join(" ");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl Scope for SnapshotSession {
    type Element = SnapshotElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<SnapshotElement>> {
        let Some(selector) = css(locator)? else {
            return Ok(Vec::new());
        };
        Ok(self
            .page
            .select(&selector)
            .map(|el| SnapshotElement::new(el, &self.journal))
            .collect())
    }
}

impl Scope for SnapshotElement {
    type Element = SnapshotElement;

    async fn find_all(&self, locator: &Locator) -> Result<Vec<SnapshotElement>> {
        let Some(selector) = css(locator)? else {
            return Ok(Vec::new());
        };
        let Some(element) = self.element() else {
            return Ok(Vec::new());
        };
        Ok(element
            .select(&selector)
            .map(|el| SnapshotElement::new(el, &self.journal))
            .collect())
    }
}

impl Element for SnapshotElement {
    async fn text(&self) -> Result<String> {
        Ok(self.element().map(visible_text).unwrap_or_default())
    }

    async fn attr(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .element()
            .and_then(|el| el.value().attr(name))
            .map(str::to_string))
    }

    async fn click(&self) -> Result<()> {
        let tag = self
            .element()
            .map(|el| el.value().name().to_string())
            .unwrap_or_default();
        self.record(Action::Clicked(tag));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.record(Action::Cleared);
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        self.record(Action::Typed(text.to_string()));
        Ok(())
    }

    // Saved pages mark re-rendered nodes with `data-detached`.
    async fn is_attached(&self) -> Result<bool> {
        Ok(self
            .element()
            .is_some_and(|el| el.value().attr("data-detached").is_none()))
    }
}

impl Session for SnapshotSession {
    async fn goto(&self, url: &str) -> Result<()> {
        self.record(Action::Goto(url.to_string()));
        Ok(())
    }

    async fn wait_for(&self, locator: &Locator, timeout: Duration) -> Result<SnapshotElement> {
        // A saved page never changes, so one look is as good as waiting.
        self.find_all(locator)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| TrackerError::Timeout {
                what: locator.to_string(),
                seconds: timeout.as_secs(),
            })
    }

    async fn screenshot(&self, path: &Path) -> Result<()> {
        self.record(Action::Screenshot(path.to_path_buf()));
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.record(Action::Closed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
          <article class="job-card">
            <h3 class="job-title"><a href="/jobs/1">Backend   Developer</a></h3>
            <span class="company-name">Acme</span>
          </article>
          <article class="job-card"><h3 class="job-title">Frontend</h3></article>
        </body></html>"#;

    #[tokio::test]
    async fn nested_lookups_stay_inside_the_element() {
        let page = SnapshotSession::from_html(PAGE);
        let cards = page.find_all(&Locator::Css(".job-card")).await.unwrap();
        assert_eq!(cards.len(), 2);

        let companies = cards[1].find_all(&Locator::Css(".company-name")).await.unwrap();
        assert!(companies.is_empty());

        let titles = cards[0].find_all(&Locator::Css("h3.job-title")).await.unwrap();
        assert_eq!(titles[0].text().await.unwrap(), "Backend Developer");
    }

    #[tokio::test]
    async fn xpath_never_matches() {
        let page = SnapshotSession::from_html(PAGE);
        let found = page.find_all(&Locator::XPath("//article")).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn wait_for_missing_element_times_out() {
        let page = SnapshotSession::from_html(PAGE);
        let err = page
            .wait_for(&Locator::Css(".results"), Duration::from_secs(4))
            .await
            .err()
            .expect("timeout");
        assert!(matches!(err, TrackerError::Timeout { seconds: 4, .. }));
    }

    #[tokio::test]
    async fn interactions_are_journaled() {
        let page = SnapshotSession::from_html(PAGE);
        page.goto("https://example.test").await.unwrap();
        let card = page.wait_for(&Locator::Css(".job-card"), Duration::ZERO).await.unwrap();
        card.click().await.unwrap();
        page.close().await.unwrap();
        assert_eq!(
            page.actions(),
            vec![
                Action::Goto("https://example.test".to_string()),
                Action::Clicked("article".to_string()),
                Action::Closed,
            ]
        );
    }
}
