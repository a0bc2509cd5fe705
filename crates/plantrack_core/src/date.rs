//! Calendar-date parsing and formatting.
//!
//! # Responsibility
//! - Turn API date values into calendar dates without local-time shifts.
//! - Provide the month/day keys and month arithmetic used by layout.
//!
//! # Invariants
//! - Year/month/day are always read from UTC fields. Values carrying an
//!   offset are converted to UTC first; values without one are taken as UTC.
//! - Unparseable input yields `None`, never an error or a sentinel date.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static DATE_ONLY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date-only regex"));

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Reads a calendar date from a JSON value.
///
/// Strings go through [`parse_date_text`]; integers are epoch milliseconds.
pub fn parse_calendar_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(text) => parse_date_text(text),
        Value::Number(number) => number.as_i64().and_then(date_from_epoch_millis),
        _ => None,
    }
}

/// Parses `YYYY-MM-DD`, RFC 3339, naive ISO date-times and RFC 2822 text.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if DATE_ONLY_RE.is_match(trimmed) {
        return NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok();
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc).date_naive());
    }

    for format in NAIVE_DATE_TIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(parsed.date());
        }
    }

    DateTime::parse_from_rfc2822(trimmed)
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc).date_naive())
}

pub fn date_from_epoch_millis(millis: i64) -> Option<NaiveDate> {
    DateTime::from_timestamp_millis(millis).map(|instant| instant.date_naive())
}

/// `DD/MM/YYYY`.
pub fn display_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// [`display_date`] over a raw field value; `-` when missing, raw text when unparseable.
pub fn format_display_date(value: Option<&Value>) -> String {
    let Some(value) = value.filter(|value| !is_blank(value)) else {
        return "-".to_string();
    };
    match parse_calendar_date(value) {
        Some(date) => display_date(date),
        None => match value {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        },
    }
}

/// Zero-padded `YYYY-MM`.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Zero-padded `YYYY-MM-DD`.
pub fn day_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}-{:02}", date.year(), date.month(), date.day())
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// First day of the month `offset` months away from `date`'s month.
///
/// Saturates at the calendar bounds chrono supports.
pub fn shift_month_start(date: NaiveDate, offset: i32) -> NaiveDate {
    let start = first_of_month(date);
    let shifted = if offset >= 0 {
        start.checked_add_months(Months::new(offset.unsigned_abs()))
    } else {
        start.checked_sub_months(Months::new(offset.unsigned_abs()))
    };
    shifted.unwrap_or(start)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    shift_month_start(date, 1)
        .pred_opt()
        .unwrap_or(date)
}

/// UTC midnight at the start of `date`.
pub fn start_of_day_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        day_key, display_date, format_display_date, last_of_month, month_key,
        parse_calendar_date, parse_date_text, shift_month_start,
    };
    use chrono::NaiveDate;
    use serde_json::json;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_supported_shapes() {
        assert_eq!(parse_date_text("2024-03-05"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("2024-03-05T10:20:00"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("2024-03-05 10:20:00"), Some(ymd(2024, 3, 5)));
        assert_eq!(parse_date_text("2024-03-05T00:00:00Z"), Some(ymd(2024, 3, 5)));
        assert_eq!(
            parse_date_text("Tue, 05 Mar 2024 00:00:00 GMT"),
            Some(ymd(2024, 3, 5))
        );
    }

    #[test]
    fn offsets_are_converted_to_utc_before_taking_the_date() {
        assert_eq!(
            parse_date_text("2024-02-01T00:30:00+02:00"),
            Some(ymd(2024, 1, 31))
        );
        assert_eq!(
            parse_date_text("2024-01-31T22:00:00-03:00"),
            Some(ymd(2024, 2, 1))
        );
    }

    #[test]
    fn rejects_garbage_and_impossible_dates() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("soon"), None);
        assert_eq!(parse_date_text("2024-02-30"), None);
        assert_eq!(parse_calendar_date(&json!(true)), None);
    }

    #[test]
    fn integers_are_epoch_millis() {
        assert_eq!(
            parse_calendar_date(&json!(1_709_596_800_000_i64)),
            Some(ymd(2024, 3, 5))
        );
    }

    #[test]
    fn display_formats() {
        assert_eq!(format_display_date(Some(&json!("2024-03-05"))), "05/03/2024");
        assert_eq!(format_display_date(None), "-");
        assert_eq!(format_display_date(Some(&json!(null))), "-");
        assert_eq!(format_display_date(Some(&json!("pronto"))), "pronto");
        assert_eq!(
            format_display_date(Some(&json!("2024-03-05T23:59:00Z"))),
            "05/03/2024"
        );
        assert_eq!(display_date(ymd(2024, 12, 1)), "01/12/2024");
    }

    #[test]
    fn keys_are_zero_padded() {
        assert_eq!(month_key(ymd(2024, 3, 5)), "2024-03");
        assert_eq!(day_key(ymd(2024, 3, 5)), "2024-03-05");
    }

    #[test]
    fn month_arithmetic_crosses_years() {
        assert_eq!(shift_month_start(ymd(2024, 1, 20), -1), ymd(2023, 12, 1));
        assert_eq!(shift_month_start(ymd(2024, 12, 31), 1), ymd(2025, 1, 1));
        assert_eq!(last_of_month(ymd(2024, 2, 10)), ymd(2024, 2, 29));
        assert_eq!(last_of_month(ymd(2023, 12, 1)), ymd(2023, 12, 31));
    }
}
