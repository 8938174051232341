//! Timestamp parsing and formatting.
//!
//! Everything is stored as RFC 3339 UTC text with second precision, which
//! keeps lexicographic and chronological order identical in SQL.

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};

use crate::error::{PlannerError, PlannerResult};

/// Format a timestamp for storage.
pub fn format(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time truncated to the stored precision.
pub fn current() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

/// Current time, formatted for storage.
pub fn now() -> String {
    format(&current())
}

/// Parse a stored timestamp. Accepts RFC 3339 and SQLite's `datetime('now')` layout.
pub fn parse(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parse a stored timestamp that must be present and valid.
pub(crate) fn parse_required(field: &str, s: &str) -> PlannerResult<DateTime<Utc>> {
    parse(s).ok_or_else(|| PlannerError::validation(format!("invalid {field} timestamp '{s}'")))
}

/// Parse an optional stored timestamp.
pub(crate) fn parse_optional(field: &str, s: Option<&str>) -> PlannerResult<Option<DateTime<Utc>>> {
    s.map(|v| parse_required(field, v)).transpose()
}

/// Parse a date typed by a person: RFC 3339, `YYYY-MM-DD HH:MM`, or a bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_user_date(s: &str) -> PlannerResult<DateTime<Utc>> {
    let s = s.trim();
    if let Some(dt) = parse(s) {
        return Ok(dt);
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M") {
        return Ok(naive.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| PlannerError::validation(format!("unrecognized date '{s}' (expected YYYY-MM-DD)")))
}

/// Serde helper for clearable fields in partial updates: a missing key
/// stays `None` (via `#[serde(default)]`), `null` becomes `Some(None)`.
pub(crate) fn deserialize_clearable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_round_trips_through_parse() {
        let ts = Utc.with_ymd_and_hms(2026, 11, 5, 18, 30, 0).unwrap();
        assert_eq!(format(&ts), "2026-11-05T18:30:00Z");
        assert_eq!(parse(&format(&ts)), Some(ts));
    }

    #[test]
    fn test_parse_sqlite_layout() {
        let ts = parse("2026-11-05 18:30:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2026, 11, 5, 18, 30, 0).unwrap());
    }

    #[test]
    fn test_parse_user_date_variants() {
        let midnight = Utc.with_ymd_and_hms(2026, 12, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_user_date("2026-12-01").unwrap(), midnight);
        assert_eq!(
            parse_user_date("2026-12-01 19:00").unwrap(),
            Utc.with_ymd_and_hms(2026, 12, 1, 19, 0, 0).unwrap()
        );
        assert_eq!(parse_user_date("2026-12-01T00:00:00+00:00").unwrap(), midnight);
        assert!(parse_user_date("next tuesday").is_err());
    }
}
