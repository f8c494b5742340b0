//! Defensive coercion and display formatting.
//!
//! The analytics API is loose about types: counts arrive as numbers, as
//! numeric strings, or not at all, and timestamps come in several shapes.
//! Everything here degrades to a neutral value instead of failing.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Placeholder rendered for missing labels and dates.
pub const MISSING: &str = "-";

/// Coerces a JSON value to a finite number.
///
/// Numbers pass through, numeric strings are parsed (an empty string is 0),
/// booleans map to 1/0 and `null` to 0. Anything else, or anything that is
/// not finite, yields `fallback`.
pub fn safe_number(value: &Value, fallback: f64) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map(|v| finite_or(v, fallback)).unwrap_or(fallback),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return 0.0;
            }
            trimmed
                .parse::<f64>()
                .map(|v| finite_or(v, fallback))
                .unwrap_or(fallback)
        }
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => fallback,
    }
}

/// Returns `value` unless it is NaN or infinite.
pub fn finite_or(value: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        fallback
    }
}

/// Leading-integer parse: `"2 games"` is 2, `3` is 3, garbage is 0.
pub fn safe_int_prefix(value: &Value) -> i64 {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => {
            let trimmed = s.trim_start();
            let (sign, digits) = match trimmed.strip_prefix('-') {
                Some(rest) => (-1, rest),
                None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
            };
            let end = digits
                .char_indices()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, _)| i)
                .unwrap_or(digits.len());
            digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
        }
        _ => 0,
    }
}

/// Parses the timestamp shapes the API emits into a UTC instant.
///
/// Accepts RFC 3339, ISO date-times without a zone (read as UTC), SQL-style
/// `"YYYY-MM-DD HH:MM:SS[.fff] UTC"` and bare `YYYY-MM-DD` dates.
pub fn safe_date(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let without_zone = trimmed
        .strip_suffix("UTC")
        .map(str::trim_end)
        .unwrap_or(trimmed);
    let normalized = without_zone.replacen(' ', "T", 1);

    if let Ok(dt) = DateTime::parse_from_rfc3339(&normalized) {
        return Some(dt.with_timezone(&Utc));
    }

    let naive = normalized.strip_suffix('Z').unwrap_or(&normalized);
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(naive, format) {
            return Some(dt.and_utc());
        }
    }

    NaiveDate::parse_from_str(naive, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Calendar-day part of a timestamp string, splitting on `T` then on space.
pub fn date_key(raw: &str) -> String {
    raw.split('T')
        .next()
        .unwrap_or_default()
        .split(' ')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Thousands-separated number with at most three fraction digits.
pub fn format_number(value: f64) -> String {
    let value = finite_or(value, 0.0);
    let rounded = (value * 1000.0).round() / 1000.0;
    let negative = rounded < 0.0;
    let text = format!("{:.3}", rounded.abs());
    let (int_part, frac_part) = text.split_once('.').unwrap_or((text.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::new();
    if negative && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

pub fn format_fixed(value: f64, decimals: usize) -> String {
    format!("{:.*}", decimals, finite_or(value, 0.0))
}

pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{}%", format_fixed(value, decimals))
}

/// US dollar amount, e.g. `$1,234.50`.
pub fn format_currency(value: f64) -> String {
    let value = finite_or(value, 0.0);
    let cents = format!("{:.2}", value.abs());
    let (int_part, frac_part) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(int_part), frac_part)
}

/// `"Jan 05, 2024"`; `-` for missing values, the raw day part if unparseable.
pub fn format_day_label(raw: &str) -> String {
    format_day_with(raw, "%b %d, %Y")
}

/// `"Jan 05"`
pub fn format_short_day(raw: &str) -> String {
    format_day_with(raw, "%b %d")
}

fn format_day_with(raw: &str, pattern: &str) -> String {
    let day = date_key(raw);
    if day.is_empty() {
        return MISSING.to_string();
    }
    match safe_date(&day) {
        Some(dt) => dt.format(pattern).to_string(),
        None => day,
    }
}

/// Seven-day window starting at `raw`, e.g. `"Jan 01 - Jan 07"`.
pub fn format_week_range(raw: &str) -> String {
    let day = date_key(raw);
    if day.is_empty() {
        return MISSING.to_string();
    }
    match safe_date(&day) {
        Some(start) => {
            let end = start + Duration::days(6);
            format!("{} - {}", start.format("%b %d"), end.format("%b %d"))
        }
        None => MISSING.to_string(),
    }
}

/// `"Jan 5, 2024, 3:04 PM UTC"`, or the input unchanged when unparseable.
pub fn format_timestamp_utc(raw: &str) -> String {
    match safe_date(raw) {
        Some(dt) => dt.format("%b %-d, %Y, %-I:%M %p UTC").to_string(),
        None => raw.to_string(),
    }
}

/// Coarse age: `"5 hours ago"` under a day, `"2 days ago"` beyond.
pub fn format_relative_hours(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let hours = (now - then).num_hours().max(0);
    if hours < 24 {
        format!("{} hours ago", hours)
    } else {
        format!("{} days ago", hours / 24)
    }
}

/// `abcdef...uvwxyz` for long wallet addresses.
pub fn shorten_wallet(wallet: &str) -> String {
    let chars: Vec<char> = wallet.chars().collect();
    if chars.len() <= 12 {
        return wallet.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 6..].iter().collect();
    format!("{}...{}", head, tail)
}

pub fn solscan_account_url(wallet: &str) -> String {
    format!("https://solscan.io/account/{}", wallet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use test_case::test_case;

    #[test_case(json!("abc"), 0.0 ; "non numeric string")]
    #[test_case(json!("42"), 42.0 ; "numeric string")]
    #[test_case(json!(" 3.5 "), 3.5 ; "padded string")]
    #[test_case(json!(""), 0.0 ; "empty string")]
    #[test_case(json!(null), 0.0 ; "null")]
    #[test_case(json!(true), 1.0 ; "boolean")]
    #[test_case(json!(17), 17.0 ; "integer")]
    #[test_case(json!("NaN"), 0.0 ; "nan string")]
    #[test_case(json!("inf"), 0.0 ; "infinite string")]
    #[test_case(json!([1, 2]), 0.0 ; "array")]
    fn test_safe_number(input: Value, expected: f64) {
        assert_eq!(safe_number(&input, 0.0), expected);
    }

    #[test]
    fn test_safe_number_uses_fallback() {
        assert_eq!(safe_number(&json!("abc"), 7.0), 7.0);
        assert_eq!(finite_or(f64::NAN, 7.0), 7.0);
        assert_eq!(finite_or(f64::INFINITY, -1.0), -1.0);
        assert_eq!(finite_or(2.5, -1.0), 2.5);
    }

    #[test_case(json!("2 games"), 2)]
    #[test_case(json!("10 Games"), 10)]
    #[test_case(json!(4), 4)]
    #[test_case(json!(4.9), 4)]
    #[test_case(json!("games"), 0)]
    #[test_case(json!(null), 0)]
    fn test_safe_int_prefix(input: Value, expected: i64) {
        assert_eq!(safe_int_prefix(&input), expected);
    }

    #[test]
    fn test_sql_timestamp_matches_iso_instant() {
        let sql = safe_date("2024-01-01 00:00:00 UTC").unwrap();
        let iso = safe_date("2024-01-01T00:00:00Z").unwrap();
        assert_eq!(sql, iso);
        assert_eq!(sql, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_safe_date_shapes() {
        let expected = Utc.with_ymd_and_hms(2024, 3, 9, 14, 30, 0).unwrap();
        assert_eq!(safe_date("2024-03-09 14:30:00.000 UTC"), Some(expected));
        assert_eq!(safe_date("2024-03-09T14:30:00"), Some(expected));
        assert_eq!(safe_date("2024-03-09T16:30:00+02:00"), Some(expected));
        assert_eq!(
            safe_date("2024-03-09"),
            Some(Utc.with_ymd_and_hms(2024, 3, 9, 0, 0, 0).unwrap())
        );
        assert_eq!(safe_date(""), None);
        assert_eq!(safe_date("not a date"), None);
    }

    #[test]
    fn test_date_key() {
        assert_eq!(date_key("2024-01-05T10:00:00Z"), "2024-01-05");
        assert_eq!(date_key("2024-01-05 10:00:00.000 UTC"), "2024-01-05");
        assert_eq!(date_key(""), "");
    }

    #[test_case(1234567.0, "1,234,567")]
    #[test_case(999.0, "999")]
    #[test_case(1000.5, "1,000.5")]
    #[test_case(0.12345, "0.123")]
    #[test_case(-4321.0, "-4,321")]
    #[test_case(f64::NAN, "0")]
    fn test_format_number(input: f64, expected: &str) {
        assert_eq!(format_number(input), expected);
    }

    #[test]
    fn test_format_currency_and_percent() {
        assert_eq!(format_currency(1234.5), "$1,234.50");
        assert_eq!(format_currency(150.0), "$150.00");
        assert_eq!(format_percent(12.345, 1), "12.3%");
        assert_eq!(format_fixed(2.0, 2), "2.00");
    }

    #[test]
    fn test_day_labels() {
        assert_eq!(format_day_label("2024-01-05 00:00:00.000 UTC"), "Jan 05, 2024");
        assert_eq!(format_short_day("2024-01-05T00:00:00Z"), "Jan 05");
        assert_eq!(format_day_label(""), MISSING);
        assert_eq!(format_day_label("garbage value"), "garbage");
    }

    #[test]
    fn test_week_range() {
        assert_eq!(format_week_range("2024-01-01 00:00:00.000 UTC"), "Jan 01 - Jan 07");
        assert_eq!(format_week_range("2023-12-29"), "Dec 29 - Jan 04");
        assert_eq!(format_week_range(""), MISSING);
    }

    #[test]
    fn test_timestamp_utc() {
        assert_eq!(format_timestamp_utc("2024-01-05 15:04:00"), "Jan 5, 2024, 3:04 PM UTC");
        assert_eq!(format_timestamp_utc("Never"), "Never");
    }

    #[test]
    fn test_relative_hours() {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(format_relative_hours(now - Duration::hours(5), now), "5 hours ago");
        assert_eq!(format_relative_hours(now - Duration::hours(50), now), "2 days ago");
    }

    #[test]
    fn test_shorten_wallet() {
        assert_eq!(
            shorten_wallet("7xKXtg2CW87d97TXJSDpbD5jBkheTqA83TZRuJosgAsU"),
            "7xKXtg...osgAsU"
        );
        assert_eq!(shorten_wallet("short"), "short");
    }
}
