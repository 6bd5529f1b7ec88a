//! Long-form date formatting for post metadata.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateError {
    #[error("Invalid time value: {0:?}")]
    Invalid(String),
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%B %d, %Y", "%b %d, %Y", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Formats a date string as a US long date, e.g. `January 5, 2024`.
///
/// Accepts epoch milliseconds, RFC 3339 timestamps, plain `YYYY-MM-DD`
/// dates and a few common written forms. Timestamps with an offset are
/// formatted on their own calendar day.
///
/// # Errors
///
/// Returns [`DateError::Invalid`] for anything else. Broken dates mean
/// broken content, so this never falls back to a placeholder.
pub fn get_formatted_date(date_string: &str) -> Result<String, DateError> {
    parse_date(date_string)
        .map(|date| date.format("%B %-d, %Y").to_string())
        .ok_or_else(|| {
            tracing::error!("Invalid date value: {}", date_string);
            DateError::Invalid(date_string.to_string())
        })
}

/// Parses a date string into a calendar date, if it is in a known form.
pub fn parse_date(date_string: &str) -> Option<NaiveDate> {
    let s = date_string.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(millis) = s.parse::<i64>() {
        return DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_iso_date() {
        assert_eq!(get_formatted_date("2024-01-05").unwrap(), "January 5, 2024");
    }

    #[test]
    fn test_rfc3339() {
        assert_eq!(
            get_formatted_date("2023-12-31T23:00:00+02:00").unwrap(),
            "December 31, 2023"
        );
    }

    #[test]
    fn test_naive_datetime() {
        assert_eq!(
            get_formatted_date("2022-07-04T10:30:00").unwrap(),
            "July 4, 2022"
        );
    }

    #[test]
    fn test_epoch_millis() {
        assert_eq!(get_formatted_date("0").unwrap(), "January 1, 1970");
        assert_eq!(
            get_formatted_date("1700000000000").unwrap(),
            "November 14, 2023"
        );
    }

    #[test]
    fn test_written_date() {
        assert_eq!(get_formatted_date("March 15, 2021").unwrap(), "March 15, 2021");
    }

    #[test]
    fn test_invalid_date_is_an_error() {
        assert_eq!(
            get_formatted_date("not-a-date"),
            Err(DateError::Invalid("not-a-date".to_string()))
        );
        assert!(get_formatted_date("2024-13-40").is_err());
    }

    #[test]
    fn test_empty_date_is_an_error() {
        assert!(get_formatted_date("").is_err());
        assert!(get_formatted_date("   ").is_err());
    }
}
