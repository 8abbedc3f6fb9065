//! Form Helpers
//!
//! Conversions between `<input type="date">` values and dates.

use chrono::NaiveDate;

const INPUT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Value for a date input; empty when there is no date
pub fn date_value(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(INPUT_DATE_FORMAT).to_string()).unwrap_or_default()
}

/// Date input value back to a date; empty or malformed gives `None`
pub fn input_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), INPUT_DATE_FORMAT).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_input_values() {
        let date = NaiveDate::from_ymd_opt(2027, 3, 9).unwrap();
        assert_eq!(date_value(Some(date)), "2027-03-09");
        assert_eq!(date_value(None), "");
        assert_eq!(input_date("2027-03-09"), Some(date));
        assert_eq!(input_date(""), None);
        assert_eq!(input_date("09/03/2027"), None);
    }
}
