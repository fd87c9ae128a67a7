//! Date parsing for front matter values.
//!
//! Accepted forms, tried in order:
//! - RFC 3339: `2024-01-05T10:30:00+01:00`
//! - RFC 2822: `Fri, 05 Jan 2024 10:30:00 +0100`
//! - `2024-01-05 10:30:00`, `2024-01-05 10:30`, `2024-01-05T10:30:00`
//! - `2024-01-05`, `2024/01/05`
//! - `January 5, 2024`, `Jan 5, 2024`, `5 January 2024`
//!
//! Inputs without an offset are taken as UTC. Dates without a time are
//! midnight.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%B %d, %Y", "%b %d, %Y", "%d %B %Y"];

pub trait DateParser {
    /// Parse a date, returning `None` when the input is not recognised.
    fn parse(&self, input: &str) -> Option<DateTime<FixedOffset>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoDateParser;

impl DateParser for ChronoDateParser {
    fn parse(&self, input: &str) -> Option<DateTime<FixedOffset>> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }

        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(dt);
        }
        if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
            return Some(dt);
        }

        let naive = DATETIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
            .or_else(|| {
                DATE_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                    .and_then(|date| date.and_hms_opt(0, 0, 0))
            })?;

        Some(Utc.from_utc_datetime(&naive).fixed_offset())
    }
}
