//! Date helpers
//!
//! The backend is not consistent about date formats, so parsing is lenient.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Parse a backend date string. Accepts plain dates, RFC 3339 timestamps and
/// `YYYY-MM-DD HH:MM:SS`. Empty or unparseable input yields `None`.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.date());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.date());
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

pub(crate) fn parse_opt(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(parse_date)
}

/// `18 Oct 2026`, or an empty string for no date
pub fn format_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_default()
}

/// Calendar days from `today` to `date` (negative when `date` is in the past)
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(parse_date("2026-10-18"), Some(ymd(2026, 10, 18)));
        assert_eq!(parse_date("18/10/2026"), Some(ymd(2026, 10, 18)));
        assert_eq!(parse_date("2026-10-18T09:30:00Z"), Some(ymd(2026, 10, 18)));
        assert_eq!(parse_date("2026-10-18T09:30:00.123"), Some(ymd(2026, 10, 18)));
        assert_eq!(parse_date("2026-10-18 09:30:00"), Some(ymd(2026, 10, 18)));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("   "), None);
        assert_eq!(parse_date("next tuesday"), None);
    }

    #[test]
    fn test_days_until_sign() {
        let today = ymd(2026, 10, 18);
        assert_eq!(days_until(ymd(2026, 10, 20), today), 2);
        assert_eq!(days_until(ymd(2026, 10, 18), today), 0);
        assert_eq!(days_until(ymd(2026, 10, 1), today), -17);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(Some(ymd(2026, 1, 5))), "05 Jan 2026");
        assert_eq!(format_date(None), "");
    }
}
