use anyhow::Result;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Canonical fallback for unparseable dates, written by the ingestion
/// adapter. Duration consumers then naturally exclude the resulting
/// non-positive gaps.
pub const SENTINEL: &str = "1970-01-01T00:00:00Z";

/// Handles parsing timestamps from the formats that show up in sheet-exported
/// movement data.
pub struct TimestampParser;

impl TimestampParser {
    /// Parse a timestamp string into a `DateTime<Utc>`.
    /// Handles RFC 3339, naive ISO, and spreadsheet `Y-m-d H:M:S` formats.
    pub fn parse(timestamp_str: &str) -> Result<DateTime<Utc>> {
        let timestamp = timestamp_str.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp) {
            return Ok(dt.with_timezone(&Utc));
        }

        // Naive datetime variants, assumed UTC
        for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"] {
            if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, format) {
                return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
            }
        }

        // Bare date cells
        if let Ok(date) = NaiveDate::parse_from_str(timestamp, "%Y-%m-%d") {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(DateTime::from_naive_utc_and_offset(naive, Utc));
            }
        }

        anyhow::bail!("Failed to parse timestamp: {}", timestamp_str)
    }

    /// Parse, falling back to the epoch sentinel. Used where a total ordering
    /// is needed and a bad cell must not abort the batch.
    pub fn parse_or_epoch(timestamp_str: &str) -> DateTime<Utc> {
        Self::parse(timestamp_str).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Fractional days from `start` to `end`. `None` when either side is
    /// unparseable; callers exclude those from duration math.
    pub fn days_between(start: &str, end: &str) -> Option<f64> {
        let start = Self::parse(start).ok()?;
        let end = Self::parse(end).ok()?;
        Some((end - start).num_seconds() as f64 / 86_400.0)
    }
}
