//! Keep-or-drop decision on the free-text "posted" label of a listing.
//!
//! Rules are checked in order:
//! 1. empty label: keep
//! 2. mentions "hour" or "today": keep
//! 3. mentions "day": keep when the number is within `days_recent`,
//!    or when no number can be read
//! 4. mentions "week": keep only "1 week"; no readable number drops it
//! 5. anything else (calendar dates included): keep

pub fn is_recent(posted_date: &str, days_recent: u32) -> bool {
    if posted_date.is_empty() {
        return true;
    }

    let posted = posted_date.to_lowercase();

    if posted.contains("hour") || posted.contains("today") {
        true
    } else if posted.contains("day") {
        match number_in(&posted) {
            Some(days) => days <= u64::from(days_recent),
            None => true,
        }
    } else if posted.contains("week") {
        match number_in(&posted) {
            Some(weeks) => weeks == 1,
            None => false,
        }
    } else {
        true
    }
}

/// All ASCII digits in the label read as one number: "2 days ago" is 2.
/// Numbers too large for `u64` saturate.
fn number_in(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAYS: u32 = 7;

    #[test]
    fn empty_label_is_kept() {
        assert!(is_recent("", DAYS));
    }

    #[test]
    fn hours_and_today_are_kept() {
        for label in ["3 hours ago", "1 hour ago", "Today", "posted today", "48 hours ago"] {
            assert!(is_recent(label, DAYS), "{label}");
        }
    }

    #[test]
    fn days_compare_against_threshold() {
        assert!(is_recent("1 day ago", DAYS));
        assert!(is_recent("7 days ago", DAYS));
        assert!(!is_recent("8 days ago", DAYS));
        assert!(!is_recent("30 Days Ago", DAYS));
        assert!(is_recent("3 days ago", 3));
        assert!(!is_recent("4 days ago", 3));
    }

    #[test]
    fn days_without_a_number_are_kept() {
        assert!(is_recent("a few days ago", DAYS));
        assert!(is_recent("yesterday", DAYS));
    }

    #[test]
    fn only_one_week_is_kept() {
        assert!(is_recent("1 week ago", DAYS));
        assert!(!is_recent("2 weeks ago", DAYS));
        assert!(!is_recent("3 Weeks ago", DAYS));
    }

    #[test]
    fn weeks_without_a_number_are_dropped() {
        assert!(!is_recent("several weeks ago", DAYS));
        assert!(!is_recent("last week", DAYS));
    }

    #[test]
    fn huge_day_counts_are_dropped() {
        assert!(!is_recent("99999999999999999999 days ago", DAYS));
        assert_eq!(number_in("99999999999999999999"), Some(u64::MAX));
    }

    #[test]
    fn calendar_dates_are_kept() {
        assert!(is_recent("12 March 2024", DAYS));
        assert!(is_recent("2024-03-12", DAYS));
        assert!(is_recent("1 month ago", DAYS));
    }

    #[test]
    fn digits_are_read_across_the_whole_label() {
        assert_eq!(number_in("posted 2 days ago"), Some(2));
        assert_eq!(number_in("10 days"), Some(10));
        assert_eq!(number_in("a few days"), None);
    }
}
