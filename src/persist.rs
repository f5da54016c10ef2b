use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::error::Result;

/// Writes `rows` to `path` with a header row, replacing any existing file.
/// Nothing is written for an empty slice. Returns the number of rows saved.
pub fn save_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<usize> {
    if rows.is_empty() {
        return Ok(0);
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    info!("Saved {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ApplicationRecord, ApplicationStatus, JobPosting};
    use chrono::{Local, TimeZone};
    use pretty_assertions::assert_eq;

    fn posting(title: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            company: "Acme, Inc".to_string(),
            location: "Nairobi".to_string(),
            posted_date: "today".to_string(),
            description: String::new(),
            url: "https://www.kenyajob.com/jobs/1".to_string(),
            extracted_at: Local.with_ymd_and_hms(2024, 3, 12, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn listings_have_header_and_one_row_each() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_listings.csv");

        let saved = save_csv(&path, &[posting("Rust Engineer"), posting("Go Engineer")]).unwrap();
        assert_eq!(saved, 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines[0], "title,company,location,posted_date,description,url,extracted_at");
        assert_eq!(
            lines[1],
            "Rust Engineer,\"Acme, Inc\",Nairobi,today,,https://www.kenyajob.com/jobs/1,2024-03-12 09:30:00"
        );
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn applications_have_status_and_blank_applied_date() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("applications_tracker.csv");
        let record = ApplicationRecord::track(&posting("Rust Engineer"), ApplicationStatus::NotApplied);

        save_csv(&path, &[record]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(
            lines[0],
            "job_title,company,location,job_url,status,applied_date,notes,tracked_at"
        );
        assert!(lines[1].starts_with(
            "Rust Engineer,\"Acme, Inc\",Nairobi,https://www.kenyajob.com/jobs/1,Not Applied,,,"
        ));
    }

    #[test]
    fn empty_input_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_listings.csv");
        assert_eq!(save_csv::<JobPosting>(&path, &[]).unwrap(), 0);
        assert!(!path.exists());
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job_listings.csv");
        std::fs::write(&path, "stale\nstale\nstale\nstale\n").unwrap();

        save_csv(&path, &[posting("Fresh")]).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(!text.contains("stale"));
    }
}
