//! One run: navigate, search, extract, filter, track, save, close.

use chrono::Local;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{Result, TrackerError};
use crate::extract;
use crate::model::{ApplicationRecord, ApplicationStatus, JobPosting};
use crate::persist;
use crate::recency;
use crate::search;
use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Drive the search form on the live site.
    Live,
    /// The session already shows a results page; skip navigation and search.
    Replay,
}

/// What a finished run kept.
#[derive(Debug, Default)]
pub struct Report {
    pub postings: Vec<JobPosting>,
    pub applications: Vec<ApplicationRecord>,
}

pub struct Tracker<'a, S: Session> {
    config: &'a Config,
    session: &'a S,
}

impl<'a, S: Session> Tracker<'a, S> {
    pub fn new(config: &'a Config, session: &'a S) -> Self {
        Tracker { config, session }
    }

    /// Runs the whole sequence. The session is closed exactly once whether
    /// the run succeeds, fails or is interrupted with Ctrl-C.
    pub async fn run(&self, mode: Mode) -> Result<Report> {
        let outcome = tokio::select! {
            outcome = self.pipeline(mode) => outcome,
            _ = tokio::signal::ctrl_c() => Err(TrackerError::Interrupted),
        };

        match &outcome {
            Ok(_) => info!("Job tracking completed successfully!"),
            Err(TrackerError::Interrupted) => warn!("Run interrupted by user"),
            Err(e) => {
                error!("Error during execution: {e}");
                self.screenshot("execution_error").await;
            }
        }

        if let Err(e) = self.session.close().await {
            error!("Error closing browser: {e}");
        }
        outcome
    }

    async fn pipeline(&self, mode: Mode) -> Result<Report> {
        if mode == Mode::Live {
            search::navigate(self.session, self.config).await?;
            if let Err(e) = search::submit(self.session, self.config).await {
                error!("Error during search: {e}");
                self.screenshot("search_error").await;
                return Err(e);
            }
        }

        let postings = self.extract().await;
        let applications = track(&postings);
        self.save(&postings, &applications);

        Ok(Report { postings, applications })
    }

    async fn extract(&self) -> Vec<JobPosting> {
        info!("Extracting job listings...");

        let Some(listings) = extract::find_listings(self.session).await else {
            warn!("No job elements found with any selector");
            self.screenshot("no_jobs_found").await;
            return Vec::new();
        };

        let days_recent = self.config.days_recent;
        extract::postings(
            &listings,
            self.config.max_listings,
            &self.config.base_url,
            |job| recency::is_recent(&job.posted_date, days_recent),
        )
        .await
    }

    /// Each file is written independently; a failed write is logged and the
    /// run carries on.
    fn save(&self, postings: &[JobPosting], applications: &[ApplicationRecord]) {
        match persist::save_csv(&self.config.listings_path(), postings) {
            Ok(0) => info!("No job listings to save"),
            Ok(_) => {}
            Err(e) => error!("Error saving job listings: {e}"),
        }
        if let Err(e) = persist::save_csv(&self.config.applications_path(), applications) {
            error!("Error saving applications: {e}");
        }
    }

    /// Best effort; a failed screenshot is only logged.
    async fn screenshot(&self, label: &str) {
        let name = format!("{label}_{}.png", Local::now().format("%Y%m%d_%H%M%S"));
        let path = self.config.screenshots_dir.join(name);
        match self.session.screenshot(&path).await {
            Ok(()) => info!("Screenshot saved: {}", path.display()),
            Err(e) => error!("Error capturing screenshot: {e}"),
        }
    }
}

/// Every retained posting starts out as "Not Applied".
pub fn track(postings: &[JobPosting]) -> Vec<ApplicationRecord> {
    postings
        .iter()
        .map(|job| ApplicationRecord::track(job, ApplicationStatus::NotApplied))
        .collect()
}
