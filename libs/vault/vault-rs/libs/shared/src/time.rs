use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::debug;

/// Parses the timestamp formats the document store has been observed to hold:
/// RFC 3339 (`2024-05-01T10:00:00.000Z`) and offset-less ISO-8601, which is
/// read as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }

    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(ts) => Some(ts.and_utc()),
        Err(err) => {
            debug!(raw, ?err, "unparsable timestamp");
            None
        }
    }
}

/// Whether `raw` is strictly after `now`. Missing or malformed timestamps are
/// never in the future.
pub fn is_future(raw: Option<&str>, now: DateTime<Utc>) -> bool {
    raw.and_then(parse_timestamp).map(|ts| ts > now).unwrap_or(false)
}

/// Whether `raw` is at or before `now`. Missing or malformed timestamps are
/// never in the past.
pub fn is_past(raw: Option<&str>, now: DateTime<Utc>) -> bool {
    raw.and_then(parse_timestamp).map(|ts| ts <= now).unwrap_or(false)
}
