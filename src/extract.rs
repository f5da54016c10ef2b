use chrono::Local;
use reqwest::Url;
use tracing::{info, warn};

use crate::error::{Result, TrackerError};
use crate::locator::{self, Hit, Locator, Role};
use crate::model::JobPosting;
use crate::session::{Element, Scope};

pub const LISTING: Role = Role {
    name: "job listings",
    candidates: &[
        Locator::Css(".job-card"),
        Locator::Css(".job-listing"),
        Locator::Css(".job-item"),
        Locator::Css(".job"),
        Locator::Css("[class*='job']"),
        Locator::Css("[class*='listing']"),
        Locator::Css("div[data-job]"),
    ],
};

const TITLE: Role = Role {
    name: "title",
    candidates: &[
        Locator::Css("h3.job-title"),
        Locator::Css("h2.job-title"),
        Locator::Css("a.job-title"),
    ],
};

const COMPANY: Role = Role {
    name: "company",
    candidates: &[Locator::Css(".company-name"), Locator::Css(".employer-name")],
};

const LOCATION: Role = Role {
    name: "location",
    candidates: &[Locator::Css(".job-location")],
};

const POSTED_DATE: Role = Role {
    name: "posted date",
    candidates: &[Locator::Css(".posted-date")],
};

const DESCRIPTION: Role = Role {
    name: "description",
    candidates: &[Locator::Css(".job-description"), Locator::Css(".description")],
};

const TITLE_LINK: Role = Role {
    name: "title link",
    candidates: &[Locator::Css("a.job-title")],
};

/// Listing elements on the results page, or `None` when no candidate
/// matches anything.
pub async fn find_listings<S: Scope>(page: &S) -> Option<Vec<S::Element>> {
    let Hit { value, locator } = locator::all(page, &LISTING).await?;
    info!("Found {} job elements using {}", value.len(), locator);
    Some(value)
}

/// Reads one listing. Missing fields come back empty; only a listing that
/// has dropped off the page is an error.
pub async fn posting<E: Element>(listing: &E, index: usize, base_url: &str) -> Result<JobPosting> {
    if !listing.is_attached().await? {
        return Err(TrackerError::StaleListing { index });
    }

    let href = locator::attr_or_empty(listing, &TITLE_LINK, "href").await;

    Ok(JobPosting {
        title: locator::text_or_empty(listing, &TITLE).await,
        company: locator::text_or_empty(listing, &COMPANY).await,
        location: locator::text_or_empty(listing, &LOCATION).await,
        posted_date: locator::text_or_empty(listing, &POSTED_DATE).await,
        description: locator::text_or_empty(listing, &DESCRIPTION).await,
        url: absolute_url(&href, base_url),
        extracted_at: Local::now(),
    })
}

/// Extracts up to `max` listings in page order, keeping those `keep` accepts.
/// A listing that fails is logged and skipped.
pub async fn postings<E, F>(listings: &[E], max: usize, base_url: &str, keep: F) -> Vec<JobPosting>
where
    E: Element,
    F: Fn(&JobPosting) -> bool,
{
    let mut retained = Vec::new();
    for (i, listing) in listings.iter().take(max).enumerate() {
        match posting(listing, i, base_url).await {
            Ok(job) if keep(&job) => {
                info!("Extracted job {}: {}", i + 1, display_title(&job));
                retained.push(job);
            }
            Ok(job) => info!("Skipped job {} (posted '{}')", i + 1, job.posted_date),
            Err(e) => warn!("Error extracting job {}: {}", i + 1, e),
        }
    }
    retained
}

fn display_title(job: &JobPosting) -> &str {
    if job.title.is_empty() { "Unknown" } else { &job.title }
}

/// Relative links (including "//host/..." ones) are resolved against the
/// base URL; links that already parse as absolute URLs are kept as is.
pub fn absolute_url(href: &str, base_url: &str) -> String {
    if href.is_empty() || Url::parse(href).is_ok() {
        return href.to_string();
    }
    match Url::parse(base_url).and_then(|base| base.join(href)) {
        Ok(url) => url.to_string(),
        Err(_) => format!("{base_url}{href}"),
    }
}
