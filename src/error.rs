use thiserror::Error;

/// Conditions that abort a run. Everything recoverable (a missing field, a
/// single broken listing) is handled where it happens and never gets here.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{role} not found with any known selector")]
    ElementNotFound { role: &'static str },

    #[error("timed out after {seconds}s waiting for {what}")]
    Timeout { what: String, seconds: u64 },

    #[error("listing {index} is no longer attached to the page")]
    StaleListing { index: usize },

    #[error("browser error: {0}")]
    Driver(String),

    #[error("WebDriver server at {url} is not available: {reason}")]
    WebDriverUnavailable { url: String, reason: String },

    #[error("interrupted")]
    Interrupted,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<thirtyfour::error::WebDriverError> for TrackerError {
    fn from(e: thirtyfour::error::WebDriverError) -> Self {
        TrackerError::Driver(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, TrackerError>;
