//! Primitive conversions from a dynamic [`Value`] to concrete scalars.
//!
//! Every function is total: unconvertible input yields a deterministic
//! fallback (`""`, `false`, `0`, or the Unix epoch) instead of an error.

use crate::value::{Number, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S",
];

pub fn to_str(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Str(s) => s.to_string(),
        Value::Timestamp(t) => t.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        Value::Array(_) | Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}

pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(Number::I64(i)) => *i != 0,
        Value::Number(Number::U64(u)) => *u != 0,
        Value::Number(Number::F64(f)) => *f != 0.0 && !f.is_nan(),
        Value::Str(s) => parse_bool(s),
        Value::Timestamp(_) => false,
        Value::Array(arr) => !arr.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

fn parse_bool(s: &str) -> bool {
    let s = s.trim();
    ["1", "t", "true", "y", "yes", "on"]
        .iter()
        .any(|truthy| s.eq_ignore_ascii_case(truthy))
}

/// Floats truncate toward zero and saturate at the `i64` bounds.
pub fn to_i64(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(Number::I64(i)) => *i,
        Value::Number(Number::U64(u)) => *u as i64,
        Value::Number(Number::F64(f)) => *f as i64,
        Value::Str(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .or_else(|_| s.parse::<f64>().map(|f| f as i64))
                .unwrap_or(0)
        }
        Value::Timestamp(t) => t.timestamp(),
        Value::Null | Value::Array(_) | Value::Object(_) => 0,
    }
}

pub fn to_f64(value: &Value) -> f64 {
    match value {
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64(),
        Value::Str(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        Value::Timestamp(t) => {
            t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) / 1_000_000_000.0
        }
        Value::Null | Value::Array(_) | Value::Object(_) => 0.0,
    }
}

#[inline]
pub fn to_f32(value: &Value) -> f32 {
    to_f64(value) as f32
}

/// Numbers are read as Unix seconds; strings as RFC 3339, then a few common
/// `date time` layouts, then a bare `YYYY-MM-DD` date.
pub fn to_timestamp(value: &Value) -> DateTime<Utc> {
    match value {
        Value::Timestamp(t) => *t,
        Value::Number(Number::F64(f)) if f.is_finite() => {
            let secs = f.floor();
            let nanos = ((f - secs) * 1_000_000_000.0) as u32;
            DateTime::from_timestamp(secs as i64, nanos).unwrap_or_default()
        }
        Value::Number(n) => n
            .as_i64()
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or_default(),
        Value::Str(s) => parse_timestamp(s.trim()).unwrap_or_default(),
        _ => DateTime::default(),
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Some(t.with_timezone(&Utc));
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(t) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(t.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|t| t.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::ObjectMap;
    use chrono::TimeZone;

    #[test]
    fn test_to_str_scalars() {
        assert_eq!(to_str(&Value::Null), "");
        assert_eq!(to_str(&Value::from(true)), "true");
        assert_eq!(to_str(&Value::from(1i64)), "1");
        assert_eq!(to_str(&Value::from(30.0f64)), "30");
        assert_eq!(to_str(&Value::from(2.5f64)), "2.5");
        assert_eq!(to_str(&Value::from("x")), "x");
    }

    #[test]
    fn test_to_str_nested_is_json() {
        let arr = Value::Array(vec![Value::from(1i64), Value::from("a")]);
        assert_eq!(to_str(&arr), r#"[1,"a"]"#);
        assert_eq!(to_str(&Value::Object(ObjectMap::new())), "{}");
        // unrepresentable nested content degrades to an empty string
        assert_eq!(to_str(&Value::Array(vec![Value::from(f64::NAN)])), "");
    }

    #[test]
    fn test_to_bool() {
        assert!(to_bool(&Value::from("TRUE")));
        assert!(to_bool(&Value::from(" yes ")));
        assert!(to_bool(&Value::from("1")));
        assert!(!to_bool(&Value::from("nope")));
        assert!(to_bool(&Value::from(2i64)));
        assert!(!to_bool(&Value::from(0.0f64)));
        assert!(!to_bool(&Value::Null));
    }

    #[test]
    fn test_to_i64() {
        assert_eq!(to_i64(&Value::from("42")), 42);
        assert_eq!(to_i64(&Value::from("30.9")), 30);
        assert_eq!(to_i64(&Value::from(-7.8f64)), -7);
        assert_eq!(to_i64(&Value::from(true)), 1);
        assert_eq!(to_i64(&Value::from("abc")), 0);
        assert_eq!(to_i64(&Value::from(f64::MAX)), i64::MAX);
    }

    #[test]
    fn test_to_float() {
        assert_eq!(to_f64(&Value::from("2.5")), 2.5);
        assert_eq!(to_f64(&Value::from(3i64)), 3.0);
        assert_eq!(to_f32(&Value::from(1.25f64)), 1.25f32);
        assert_eq!(to_f64(&Value::from("bad")), 0.0);
    }

    #[test]
    fn test_to_timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        assert_eq!(to_timestamp(&Value::from("2024-01-15T10:30:00Z")), expected);
        assert_eq!(to_timestamp(&Value::from("2024-01-15T12:30:00+02:00")), expected);
        assert_eq!(to_timestamp(&Value::from("2024-01-15 10:30:00")), expected);
        assert_eq!(to_timestamp(&Value::from(expected.timestamp())), expected);
        assert_eq!(
            to_timestamp(&Value::from("2024-01-15")),
            Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_to_timestamp_fallback_is_epoch() {
        assert_eq!(to_timestamp(&Value::from("not a date")), DateTime::<Utc>::default());
        assert_eq!(to_timestamp(&Value::from(true)), DateTime::<Utc>::default());
    }
}
