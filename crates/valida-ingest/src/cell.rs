//! Cell-value helpers for polars `AnyValue`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use polars::prelude::{AnyValue, TimeUnit};

/// Days between 0001-01-01 (CE day 1) and the 1970-01-01 epoch polars dates
/// count from.
const EPOCH_CE_DAYS: i32 = 719_163;

/// Converts an `AnyValue` to its string form. Null becomes the empty string;
/// floats are formatted without trailing zeros.
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::Int8(v) => v.to_string(),
        AnyValue::Int16(v) => v.to_string(),
        AnyValue::Int32(v) => v.to_string(),
        AnyValue::Int64(v) => v.to_string(),
        AnyValue::UInt8(v) => v.to_string(),
        AnyValue::UInt16(v) => v.to_string(),
        AnyValue::UInt32(v) => v.to_string(),
        AnyValue::UInt64(v) => v.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        AnyValue::String(s) => s.to_string(),
        AnyValue::StringOwned(s) => s.to_string(),
        AnyValue::Boolean(b) => if b { "true" } else { "false" }.to_string(),
        other => other.to_string(),
    }
}

/// Equality key for duplicate detection: `None` for null cells, the string
/// form otherwise. Keeping null distinct from the empty string means an empty
/// text cell never collides with a missing one.
pub fn cell_key(value: AnyValue<'_>) -> Option<String> {
    match value {
        AnyValue::Null => None,
        other => Some(any_to_string(other)),
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Converts an `AnyValue` to `f64`. Numeric strings coerce; null and
/// non-numeric values return `None`.
pub fn any_to_f64(value: AnyValue<'_>) -> Option<f64> {
    match value {
        AnyValue::Null => None,
        AnyValue::Int8(v) => Some(f64::from(v)),
        AnyValue::Int16(v) => Some(f64::from(v)),
        AnyValue::Int32(v) => Some(f64::from(v)),
        AnyValue::Int64(v) => Some(v as f64),
        AnyValue::UInt8(v) => Some(f64::from(v)),
        AnyValue::UInt16(v) => Some(f64::from(v)),
        AnyValue::UInt32(v) => Some(f64::from(v)),
        AnyValue::UInt64(v) => Some(v as f64),
        AnyValue::Float32(v) => Some(f64::from(v)),
        AnyValue::Float64(v) => Some(v),
        AnyValue::String(s) => parse_f64(s),
        AnyValue::StringOwned(s) => parse_f64(&s),
        _ => None,
    }
}

/// Parses a string as `f64`, `None` for empty or invalid input.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Interprets a cell as a calendar date.
///
/// Native temporal dtypes convert directly; strings must be ISO-8601 (a bare
/// date or a date-time, whose date part is taken). Everything else, including
/// unparsable text, returns `None`; the caller treats those cells as
/// missing.
pub fn parse_cell_date(value: &AnyValue<'_>) -> Option<NaiveDate> {
    match value {
        AnyValue::Null => None,
        AnyValue::Date(days) => NaiveDate::from_num_days_from_ce_opt(EPOCH_CE_DAYS + days),
        AnyValue::Datetime(raw, unit, _) => datetime_to_date(*raw, *unit),
        AnyValue::DatetimeOwned(raw, unit, _) => datetime_to_date(*raw, *unit),
        AnyValue::String(s) => parse_date_str(s),
        AnyValue::StringOwned(s) => parse_date_str(s),
        _ => None,
    }
}

fn datetime_to_date(raw: i64, unit: TimeUnit) -> Option<NaiveDate> {
    let seconds = match unit {
        TimeUnit::Nanoseconds => raw.div_euclid(1_000_000_000),
        TimeUnit::Microseconds => raw.div_euclid(1_000_000),
        TimeUnit::Milliseconds => raw.div_euclid(1_000),
    };
    DateTime::from_timestamp(seconds, 0).map(|dt| dt.date_naive())
}

/// Parses an ISO-8601 date or date-time string into a calendar date.
pub fn parse_date_str(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}
