//! Normalization of the collector's `@timestamp` field.

use serde_json::Value;
use time::PrimitiveDateTime;
use time::macros::{datetime, format_description};

use crate::{PushError, PushResult};

/// Timestamp given to records that carry none.
pub const EPOCH_TIMESTAMP: &str = "1970-01-01T00:00:00";

/// Parse a collector timestamp (`YYYY-MM-DD HH:MM:SS`, no zone).
///
/// Month, day and time fields may be written with or without a leading zero.
pub fn parse_source_timestamp(value: &str) -> PushResult<PrimitiveDateTime> {
    PrimitiveDateTime::parse(
        value,
        format_description!(
            "[year]-[month padding:none]-[day padding:none] [hour padding:none]:[minute padding:none]:[second padding:none]"
        ),
    )
    .map_err(|e| PushError::TimestampFormat {
        value: value.to_string(),
        reason: format!("expected YYYY-MM-DD HH:MM:SS ({e})"),
    })
}

/// ISO 8601 without offset, e.g. `2020-01-01T00:00:00`.
pub fn format_timestamp(value: PrimitiveDateTime) -> PushResult<String> {
    value
        .format(format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
        .map_err(|e| PushError::Message(format!("failed to format timestamp: {e}")))
}

/// Null, false, zero and empty strings, arrays and objects.
fn is_unset(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// Resolve the document timestamp from a record's `@timestamp` value.
///
/// Missing and unset values fall back to the epoch. A set value must be a
/// string in collector format.
pub fn normalize_timestamp(value: Option<&Value>) -> PushResult<String> {
    match value {
        None => format_timestamp(datetime!(1970-01-01 0:00)),
        Some(v) if is_unset(v) => format_timestamp(datetime!(1970-01-01 0:00)),
        Some(Value::String(s)) => format_timestamp(parse_source_timestamp(s)?),
        Some(other) => Err(PushError::TimestampFormat {
            value: other.to_string(),
            reason: "expected a string".into(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_collector_format() {
        let ts = normalize_timestamp(Some(&json!("1999-12-31 23:59:59"))).unwrap();
        assert_eq!(ts, "1999-12-31T23:59:59");
    }

    #[test]
    fn test_parses_unpadded_fields() {
        assert_eq!(normalize_timestamp(Some(&json!("2020-1-1 0:0:0"))).unwrap(), "2020-01-01T00:00:00");
        assert_eq!(normalize_timestamp(Some(&json!("2020-01-01 1:02:03"))).unwrap(), "2020-01-01T01:02:03");
        assert_eq!(normalize_timestamp(Some(&json!("2021-6-30 12:5:09"))).unwrap(), "2021-06-30T12:05:09");
    }

    #[test]
    fn test_missing_falls_back_to_epoch() {
        assert_eq!(normalize_timestamp(None).unwrap(), EPOCH_TIMESTAMP);
        assert_eq!(normalize_timestamp(Some(&Value::Null)).unwrap(), EPOCH_TIMESTAMP);
        assert_eq!(normalize_timestamp(Some(&json!(""))).unwrap(), EPOCH_TIMESTAMP);
    }

    #[test]
    fn test_unset_non_string_falls_back_to_epoch() {
        for unset in [json!(0), json!(0.0), json!(false), json!([]), json!({})] {
            assert_eq!(normalize_timestamp(Some(&unset)).unwrap(), EPOCH_TIMESTAMP, "for {unset}");
        }
    }

    #[test]
    fn test_rejects_other_layouts() {
        for bad in ["2020-01-01T00:00:00", "2020-01-01", "01/02/2020 10:00:00", "2020-13-01 00:00:00", "2020-01-01 00:00:00Z"] {
            let err = normalize_timestamp(Some(&json!(bad))).unwrap_err();
            assert!(matches!(err, PushError::TimestampFormat { .. }), "accepted {bad}");
        }
    }

    #[test]
    fn test_rejects_set_non_string() {
        for set in [json!(1577836800), json!(true), json!(["2020-01-01 00:00:00"]), json!({"ts": 1})] {
            let err = normalize_timestamp(Some(&set)).unwrap_err();
            assert!(err.to_string().contains("expected a string"), "for {set}");
        }
    }
}
