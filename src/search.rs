use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::locator::{self, Locator, Role};
use crate::session::{Element, Session};

pub const KEYWORDS_INPUT: Locator = Locator::Css("input[placeholder='Keywords']");

const KEYWORDS: Role = Role {
    name: "keywords input",
    candidates: &[KEYWORDS_INPUT],
};

/// Present once the results page has rendered.
pub const RESULTS: Locator =
    Locator::Css(".job-card, .job-listing, .job-item, [class*='job'], [class*='listing']");

pub const SUBMIT: Role = Role {
    name: "search button",
    candidates: &[
        Locator::Css("button[type='submit']"),
        Locator::Css("input[type='submit']"),
        Locator::Css("button.btn-primary"),
        Locator::Css("button.btn"),
        Locator::Css("input.btn"),
        Locator::Css("input[value*='Search']"),
        Locator::Css("input[value*='Find']"),
        Locator::Css("input[value*='Go']"),
        Locator::Css("button[class*='search']"),
        Locator::Css("input[class*='search']"),
        // Text matches need XPath
        Locator::XPath("//button[contains(text(), 'Search')]"),
        Locator::XPath("//button[contains(text(), 'Find')]"),
        Locator::XPath("//input[@type='submit' and contains(@value, 'Search')]"),
        Locator::XPath("//input[@type='submit' and contains(@value, 'Find')]"),
        Locator::XPath("//input[@type='button' and contains(@value, 'Search')]"),
        Locator::XPath("//input[@type='button' and contains(@value, 'Find')]"),
    ],
};

/// Opens the search page and waits for the keywords box.
pub async fn navigate<S: Session>(session: &S, config: &Config) -> Result<()> {
    info!("Navigating to {} ...", config.search_url());
    session.goto(config.search_url()).await?;
    session.wait_for(&KEYWORDS_INPUT, config.browser_timeout).await?;
    Ok(())
}

/// Types the keywords, presses the search button and waits for results.
///
/// Location and category are custom dropdown widgets on the site and are
/// left untouched.
pub async fn submit<S: Session>(session: &S, config: &Config) -> Result<()> {
    info!("Performing job search...");

    let input = locator::require(session, &KEYWORDS).await?.value;
    input.clear().await?;
    input.send_keys(&config.query()).await?;

    let button = match locator::first(session, &SUBMIT).await {
        Some(hit) => {
            info!("Found search button using {}", hit.locator);
            hit.value
        }
        None => {
            log_buttons(session).await;
            return Err(TrackerError::ElementNotFound { role: SUBMIT.name });
        }
    };
    button.click().await?;

    session.wait_for(&RESULTS, config.results_timeout()).await?;
    Ok(())
}

/// Dumps every <button> so a new selector can be picked from the log.
async fn log_buttons<S: Session>(session: &S) {
    warn!("No search button matched; listing all buttons on the page");
    let buttons = match session.find_all(&Locator::Css("button")).await {
        Ok(buttons) => buttons,
        Err(e) => {
            error!("Could not list buttons: {e}");
            return;
        }
    };

    for (i, button) in buttons.iter().enumerate() {
        let text = button.text().await.unwrap_or_default();
        let aria_label = attr(button, "aria-label").await;
        let title = attr(button, "title").await;
        let class = attr(button, "class").await;
        warn!(
            "Button {}: text='{}', aria-label='{}', title='{}', class='{}'",
            i + 1,
            text.trim(),
            aria_label,
            title,
            class,
        );
    }
}

async fn attr<E: Element>(element: &E, name: &str) -> String {
    element.attr(name).await.ok().flatten().unwrap_or_default()
}
