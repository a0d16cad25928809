// Utility helpers for parsing cells and formatting numbers.
//
// This module centralizes the "dirty" CSV/number handling so the allocator
// can assume typed cells.
use num_format::{Locale, ToFormattedString};

/// Vote and seat counts as they appear in election spreadsheets: padded,
/// sometimes with thousands separators (`"1,250"`). Anything containing a
/// letter stays text, which also keeps `inf` and `NaN` spellings out.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    if s.is_empty() || s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    s.replace(',', "").parse::<f64>().ok()
}

/// Spellings spreadsheet and dataframe exports use for an absent value.
pub fn is_missing_marker(s: &str) -> bool {
    let s = s.trim();
    s.is_empty()
        || s.eq_ignore_ascii_case("nan")
        || s.eq_ignore_ascii_case("na")
        || s.eq_ignore_ascii_case("null")
        || s.eq_ignore_ascii_case("none")
}

/// Render a number without a trailing `.0` when it is integral, so seat
/// counts and whole vote counts round-trip through CSV unchanged.
pub fn format_plain(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Fixed number of decimal places plus locale-aware thousands separators
    // (e.g., `1,234,567.89`).
    let neg = n.is_sign_negative() && n != 0.0;
    let abs_n = n.abs();
    let s = format!("{:.*}", decimals, abs_n);
    let mut parts = s.split('.');
    let int_part = parts.next().unwrap_or("0");
    let frac_part = parts.next();
    let int_val: i64 = int_part.parse().unwrap_or(0);
    let mut res = int_val.to_formatted_string(&Locale::en);
    if let Some(frac) = frac_part {
        if decimals > 0 {
            res.push('.');
            res.push_str(frac);
        }
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Seat and row counts for console output, e.g. `12,345`.
pub fn format_int<T: ToFormattedString>(n: T) -> String {
    n.to_formatted_string(&Locale::en)
}

/// Vote share as a percentage string, e.g. `0.1234` -> `12.34%`.
pub fn format_share(share: f64) -> String {
    format!("{}%", format_number(share * 100.0, 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thousands_separators() {
        assert_eq!(parse_f64_safe(Some(" 1,234 ")), Some(1234.0));
        assert_eq!(parse_f64_safe(Some("12.5")), Some(12.5));
    }

    #[test]
    fn rejects_text_and_blanks() {
        assert_eq!(parse_f64_safe(Some("abc")), None);
        assert_eq!(parse_f64_safe(Some("inf")), None);
        assert_eq!(parse_f64_safe(Some("   ")), None);
        assert_eq!(parse_f64_safe(None), None);
    }

    #[test]
    fn missing_markers() {
        assert!(is_missing_marker(""));
        assert!(is_missing_marker("NaN"));
        assert!(is_missing_marker(" null "));
        assert!(!is_missing_marker("0"));
        assert!(!is_missing_marker("Istanbul"));
    }

    #[test]
    fn plain_formatting_drops_integral_fraction() {
        assert_eq!(format_plain(3.0), "3");
        assert_eq!(format_plain(2.5), "2.5");
        assert_eq!(format_plain(-4.0), "-4");
    }

    #[test]
    fn grouped_formatting() {
        assert_eq!(format_number(1234567.891, 2), "1,234,567.89");
        assert_eq!(format_number(-12.0, 0), "-12");
        assert_eq!(format_int(9855u32), "9,855");
        assert_eq!(format_share(0.1), "10.00%");
    }
}
