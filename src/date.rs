use chrono::{NaiveDate, NaiveTime};

use crate::error::{ParseError, Result};

/// Accepted publication date layouts.
///
/// NOTE: Ordering is important here, as it signifies priority. The first layout that parses the
/// input wins.
static DATE_PATTERNS: &[&str] = &[
    // January 5, 2019
    "%B %d, %Y",
    // Jan 5, 2019
    "%b %d, %Y",
];

/// Parse a textual publication date into epoch seconds at midnight UTC.
pub fn normalise_date(raw: &str) -> Result<i64> {
    let t = raw.trim();
    DATE_PATTERNS
        .iter()
        .find_map(|pattern| NaiveDate::parse_from_str(t, pattern).ok())
        .map(|date| date.and_time(NaiveTime::MIN).and_utc().timestamp())
        .ok_or_else(|| ParseError::DateFormat(raw.to_string()))
}
