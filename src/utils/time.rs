//! Timestamp parsing and formatting.
//!
//! The backend stamps messages with ISO-8601 strings that usually carry no
//! offset (`2025-06-01T14:03:22.481516`), so parsing is lenient: RFC 3339 is
//! accepted and converted to local time, naive timestamps are taken as-is,
//! and anything else is treated as "no timestamp".

use serde::{Deserialize, Deserializer};
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, PrimitiveDateTime, UtcOffset};

const NAIVE_WITH_FRACTION: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]");
const NAIVE: &[FormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");

/// Parse a backend timestamp, returning `None` when it is not recognizable.
pub fn parse_timestamp(s: &str) -> Option<PrimitiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = OffsetDateTime::parse(s, &Rfc3339) {
        let dt = dt.to_offset(local_offset());
        return Some(PrimitiveDateTime::new(dt.date(), dt.time()));
    }
    PrimitiveDateTime::parse(s, NAIVE_WITH_FRACTION)
        .or_else(|_| PrimitiveDateTime::parse(s, NAIVE))
        .ok()
}

/// Deserialize an optional timestamp string, mapping unparseable values to `None`.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<Option<PrimitiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    Ok(s.as_deref().and_then(parse_timestamp))
}

/// The current wall-clock time, local when the offset is known and UTC otherwise.
pub fn now() -> PrimitiveDateTime {
    let dt = OffsetDateTime::now_utc().to_offset(local_offset());
    PrimitiveDateTime::new(dt.date(), dt.time())
}

/// Today's date in UTC.
pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Format the time-of-day part as `HH:MM:SS`.
pub fn format_clock(timestamp: &PrimitiveDateTime) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        timestamp.hour(),
        timestamp.minute(),
        timestamp.second()
    )
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

// The local offset cannot be determined soundly once other threads exist, in
// which case UTC is used.
fn local_offset() -> UtcOffset {
    UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime};

    #[test]
    fn parses_naive_timestamp_with_fraction() {
        let parsed = parse_timestamp("2025-06-01T14:03:22.481516").unwrap();
        assert_eq!(parsed.date(), date!(2025 - 06 - 01));
        assert_eq!(format_clock(&parsed), "14:03:22");
    }

    #[test]
    fn parses_naive_timestamp_without_fraction() {
        let parsed = parse_timestamp("2025-06-01T09:00:05").unwrap();
        assert_eq!(parsed, datetime!(2025-06-01 09:00:05));
    }

    #[test]
    fn parses_rfc3339() {
        assert!(parse_timestamp("2025-06-01T14:03:22Z").is_some());
        assert!(parse_timestamp("2025-06-01T14:03:22.5+02:00").is_some());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
        assert!(parse_timestamp("").is_none());
    }

    #[test]
    fn lenient_deserialization() {
        #[derive(Deserialize)]
        struct Stamped {
            #[serde(default, deserialize_with = "deserialize_lenient")]
            timestamp: Option<PrimitiveDateTime>,
        }

        let ok: Stamped = serde_json::from_str(r#"{"timestamp":"2025-06-01T09:00:05"}"#).unwrap();
        assert_eq!(ok.timestamp, Some(datetime!(2025-06-01 09:00:05)));

        let bad: Stamped = serde_json::from_str(r#"{"timestamp":"not a time"}"#).unwrap();
        assert!(bad.timestamp.is_none());

        let null: Stamped = serde_json::from_str(r#"{"timestamp":null}"#).unwrap();
        assert!(null.timestamp.is_none());

        let missing: Stamped = serde_json::from_str("{}").unwrap();
        assert!(missing.timestamp.is_none());
    }

    #[test]
    fn formats_dates() {
        assert_eq!(format_date(date!(2025 - 01 - 07)), "2025-01-07");
    }
}
