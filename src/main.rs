use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::error;

use job_tracker::cli::Args;
use job_tracker::snapshot::SnapshotSession;
use job_tracker::webdriver::{self, ChromeSession};
use job_tracker::{Config, Mode, Report, Tracker, TrackerError, logging};

fn setup_environment(config: &Config) -> anyhow::Result<()> {
    println!("{}", "=".repeat(60));
    println!("KENYAJOB.COM JOB APPLICATION TRACKER");
    println!("{}", "=".repeat(60));

    for dir in [&config.output_dir, &config.screenshots_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    println!("Output directory: {}", absolute(&config.output_dir).display());
    println!("Screenshots directory: {}", absolute(&config.screenshots_dir).display());
    println!();
    Ok(())
}

fn display_configuration(config: &Config) {
    println!("CURRENT CONFIGURATION:");
    println!("Keywords: {}", config.keywords.join(", "));
    println!("Location: {}", config.location);
    println!("Category: {}", config.category);
    println!("Max Listings: {}", config.max_listings);
    println!("Days Recent: {}", config.days_recent);
    println!("Headless Mode: {}", if config.headless { "Yes" } else { "No" });
    println!();
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

async fn run(config: &Config, replay: Option<&Path>) -> anyhow::Result<Report> {
    setup_environment(config)?;
    display_configuration(config);

    println!("Starting job tracking process...");
    println!("{}", "-".repeat(40));

    let report = match replay {
        Some(path) => {
            let session = SnapshotSession::open(path)
                .with_context(|| format!("opening saved page {}", path.display()))?;
            Tracker::new(config, &session).run(Mode::Replay).await?
        }
        None => {
            webdriver::probe(&config.webdriver_url)
                .await
                .context("is chromedriver running?")?;
            let session = ChromeSession::start(config).await?;
            Tracker::new(config, &session).run(Mode::Live).await?
        }
    };

    println!("{}", "-".repeat(40));
    println!("Process completed!");
    println!(
        "Kept {} listings. Check the '{}' directory for results.",
        report.postings.len(),
        config.output_dir.display()
    );
    Ok(report)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    logging::init(args.verbose);

    // Frozen from here on
    let config = Config::from_args(&args);

    match run(&config, args.replay.as_deref()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<TrackerError>(), Some(TrackerError::Interrupted)) => {
            eprintln!("\n\nProcess interrupted by user. Exiting...");
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{e:#}");
            eprintln!("Please check your internet connection and ChromeDriver setup.");
            ExitCode::FAILURE
        }
    }
}
