pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod locator;
pub mod logging;
pub mod model;
pub mod persist;
pub mod recency;
pub mod search;
pub mod session;
pub mod snapshot;
pub mod tracker;
pub mod webdriver;

pub use config::Config;
pub use error::{Result, TrackerError};
pub use model::{ApplicationRecord, ApplicationStatus, JobPosting};
pub use tracker::{Mode, Report, Tracker};
