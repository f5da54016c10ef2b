use std::path::PathBuf;
use std::time::Duration;

use crate::cli::Args;

pub const BASE_URL: &str = "https://www.kenyajob.com";
pub const WEBDRIVER_URL: &str = "http://localhost:9515";

/// Listing cap applied by `--test`.
pub const TEST_MODE_MAX_LISTINGS: usize = 5;

/// Search parameters and output locations for one run.
///
/// Built once at startup from the defaults plus command-line overrides and
/// only ever handed out by reference afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub keywords: Vec<String>,
    /// Shown in the banner but never typed into the search form.
    pub location: String,
    /// Shown in the banner but never typed into the search form.
    pub category: String,
    pub max_listings: usize,
    pub days_recent: u32,
    pub headless: bool,
    pub output_dir: PathBuf,
    pub screenshots_dir: PathBuf,
    pub listings_file_name: String,
    pub applications_file_name: String,
    pub browser_timeout: Duration,
    pub base_url: String,
    pub webdriver_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            keywords: vec![
                "software developer".to_string(),
                "python developer".to_string(),
                "web developer".to_string(),
            ],
            location: "Nairobi".to_string(),
            category: "IT & Telecoms".to_string(),
            max_listings: 50,
            days_recent: 7,
            headless: false,
            output_dir: PathBuf::from("output"),
            screenshots_dir: PathBuf::from("screenshots"),
            listings_file_name: "job_listings.csv".to_string(),
            applications_file_name: "applications_tracker.csv".to_string(),
            browser_timeout: Duration::from_secs(30),
            base_url: BASE_URL.to_string(),
            webdriver_url: WEBDRIVER_URL.to_string(),
        }
    }
}

impl Config {
    /// Defaults with every flag the user actually passed layered on top.
    pub fn from_args(args: &Args) -> Self {
        let mut config = Config::default();

        if let Some(keywords) = &args.keywords {
            if !keywords.is_empty() {
                config.keywords = keywords.clone();
            }
        }
        if let Some(location) = &args.location {
            config.location = location.clone();
        }
        if let Some(category) = &args.category {
            config.category = category.clone();
        }
        // Zero means "not given", as with an omitted flag
        if let Some(max) = args.max_listings.filter(|&n| n > 0) {
            config.max_listings = max;
        }
        if let Some(days) = args.days_recent.filter(|&n| n > 0) {
            config.days_recent = days;
        }
        if args.headless {
            config.headless = true;
        }
        if let Some(dir) = &args.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(dir) = &args.screenshots_dir {
            config.screenshots_dir = dir.clone();
        }
        if let Some(url) = &args.webdriver_url {
            config.webdriver_url = url.trim_end_matches('/').to_string();
        }
        // --test wins over --max-listings
        if args.test {
            config.max_listings = TEST_MODE_MAX_LISTINGS;
        }

        config
    }

    /// The search form lives on the home page.
    pub fn search_url(&self) -> &str {
        &self.base_url
    }

    /// Free-text query typed into the keywords box.
    pub fn query(&self) -> String {
        self.keywords.join(" ")
    }

    pub fn listings_path(&self) -> PathBuf {
        self.output_dir.join(&self.listings_file_name)
    }

    pub fn applications_path(&self) -> PathBuf {
        self.output_dir.join(&self.applications_file_name)
    }

    /// Results pages load slower than the home page.
    pub fn results_timeout(&self) -> Duration {
        self.browser_timeout * 2
    }
}
