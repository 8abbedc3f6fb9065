//! Money helpers
//!
//! Prices arrive as free text ("₹1,499", "USD 20.00 / month"). Only the first
//! decimal number is taken; currency symbols and thousands separators are ignored.

use rust_decimal::Decimal;
use std::str::FromStr;

/// First decimal number in `raw`, or `None` when there is none
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let mut number = String::new();
    let mut seen_dot = false;
    let mut started = false;

    for c in raw.chars() {
        match c {
            '0'..='9' => {
                started = true;
                number.push(c);
            }
            ',' if started => {}
            '.' if started && !seen_dot => {
                seen_dot = true;
                number.push(c);
            }
            _ if started => break,
            _ => {}
        }
    }

    let number = number.trim_end_matches('.');
    if number.is_empty() {
        return None;
    }
    Decimal::from_str(number).ok()
}

/// `1234567.5` → `1,234,567.50`
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    format!("{}{}.{}", if negative { "-" } else { "" }, grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_price_strips_symbols() {
        assert_eq!(parse_price("₹1,499"), Some(dec("1499")));
        assert_eq!(parse_price("USD 20.50 / month"), Some(dec("20.50")));
        assert_eq!(parse_price("1200"), Some(dec("1200")));
        assert_eq!(parse_price("Rs. 300."), Some(dec("300")));
    }

    #[test]
    fn test_parse_price_takes_first_number() {
        assert_eq!(parse_price("99 for 12 months"), Some(dec("99")));
    }

    #[test]
    fn test_parse_price_none() {
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("free"), None);
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(dec("1234567.5")), "1,234,567.50");
        assert_eq!(format_amount(dec("999")), "999.00");
        assert_eq!(format_amount(dec("0")), "0.00");
        assert_eq!(format_amount(dec("-1500.333")), "-1,500.33");
    }
}
