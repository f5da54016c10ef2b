use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Default)]
#[command(name = "job_tracker", about = "KenyaJob.com job application tracker")]
pub struct Args {
    /// Job search keywords
    #[arg(long, num_args = 1..)]
    pub keywords: Option<Vec<String>>,

    /// Job location
    #[arg(long)]
    pub location: Option<String>,

    /// Job category
    #[arg(long)]
    pub category: Option<String>,

    /// Maximum number of listings to extract
    #[arg(long)]
    pub max_listings: Option<usize>,

    /// Only keep jobs from the last N days
    #[arg(long)]
    pub days_recent: Option<u32>,

    /// Run the browser in headless mode
    #[arg(long)]
    pub headless: bool,

    /// Test mode (limits extraction to 5 listings)
    #[arg(long)]
    pub test: bool,

    /// Directory for the CSV files
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory for diagnostic screenshots
    #[arg(long)]
    pub screenshots_dir: Option<PathBuf>,

    /// WebDriver server (chromedriver) URL
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Extract from a saved results page instead of a live browser
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
