use chrono::{DateTime, Local};
use serde::{Serialize, Serializer};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One listing as it appeared on the results page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobPosting {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free text such as "3 days ago" or "12 March 2024".
    pub posted_date: String,
    pub description: String,
    /// Absolute, or empty when the listing had no title link.
    pub url: String,
    #[serde(serialize_with = "timestamp")]
    pub extracted_at: DateTime<Local>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ApplicationStatus {
    Applied,
    #[serde(rename = "Not Applied")]
    NotApplied,
}

impl ApplicationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplicationStatus::Applied => "Applied",
            ApplicationStatus::NotApplied => "Not Applied",
        }
    }
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tracker row derived from a retained posting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApplicationRecord {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub job_url: String,
    pub status: ApplicationStatus,
    #[serde(serialize_with = "optional_timestamp")]
    pub applied_date: Option<DateTime<Local>>,
    pub notes: String,
    #[serde(serialize_with = "timestamp")]
    pub tracked_at: DateTime<Local>,
}

impl ApplicationRecord {
    pub fn track(posting: &JobPosting, status: ApplicationStatus) -> Self {
        let now = Local::now();
        ApplicationRecord {
            job_title: posting.title.clone(),
            company: posting.company.clone(),
            location: posting.location.clone(),
            job_url: posting.url.clone(),
            status,
            applied_date: (status == ApplicationStatus::Applied).then_some(now),
            notes: String::new(),
            tracked_at: now,
        }
    }
}

fn timestamp<S: Serializer>(at: &DateTime<Local>, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(&at.format(TIMESTAMP_FORMAT))
}

// Empty cell rather than a missing one so the column count stays fixed.
fn optional_timestamp<S: Serializer>(at: &Option<DateTime<Local>>, s: S) -> Result<S::Ok, S::Error> {
    match at {
        Some(at) => timestamp(at, s),
        None => s.serialize_str(""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting() -> JobPosting {
        JobPosting {
            title: "Rust Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Nairobi".to_string(),
            posted_date: "2 days ago".to_string(),
            description: "Systems work".to_string(),
            url: "https://www.kenyajob.com/jobs/1".to_string(),
            extracted_at: Local::now(),
        }
    }

    #[test]
    fn not_applied_record_has_no_applied_date() {
        let record = ApplicationRecord::track(&posting(), ApplicationStatus::NotApplied);
        assert_eq!(record.status, ApplicationStatus::NotApplied);
        assert!(record.applied_date.is_none());
        assert!(record.notes.is_empty());
        assert_eq!(record.job_title, "Rust Engineer");
        assert_eq!(record.job_url, "https://www.kenyajob.com/jobs/1");
    }

    #[test]
    fn applied_record_is_dated() {
        let record = ApplicationRecord::track(&posting(), ApplicationStatus::Applied);
        assert_eq!(record.applied_date, Some(record.tracked_at));
    }

    #[test]
    fn status_labels() {
        assert_eq!(ApplicationStatus::NotApplied.to_string(), "Not Applied");
        assert_eq!(ApplicationStatus::Applied.to_string(), "Applied");
    }
}
