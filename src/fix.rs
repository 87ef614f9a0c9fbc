//! Rider location fixes.
//!
//! The tracking service hands over fixes as loosely typed JSON records
//! (coordinates may arrive as numbers or as numeric strings). Everything
//! downstream of this module works on [`Fix`], whose coordinates are
//! guaranteed finite, so the geometry never sees a NaN.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, TraceError};

/// One recorded rider position in decimal degrees.
///
/// `recorded_at` is carried through untouched. It is never parsed and
/// never used for ordering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fix {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<Value>,
}

impl Fix {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            recorded_at: None,
        }
    }

    pub fn at(latitude: f64, longitude: f64, recorded_at: impl Into<Value>) -> Self {
        Self {
            latitude,
            longitude,
            recorded_at: Some(recorded_at.into()),
        }
    }
}

/// A fix as received from the tracking service, before normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawFix {
    #[serde(default)]
    pub latitude: Value,
    #[serde(default)]
    pub longitude: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recorded_at: Option<Value>,
}

impl RawFix {
    /// Parse both coordinates, failing on anything that is not a finite number.
    ///
    /// `index` is the position of this fix in its trace and is only used
    /// for error reporting.
    pub fn normalize(&self, index: usize) -> Result<Fix> {
        Ok(Fix {
            latitude: parse_coordinate(&self.latitude, index, "latitude")?,
            longitude: parse_coordinate(&self.longitude, index, "longitude")?,
            recorded_at: self.recorded_at.clone(),
        })
    }
}

impl From<&Fix> for RawFix {
    fn from(fix: &Fix) -> Self {
        Self {
            latitude: Value::from(fix.latitude),
            longitude: Value::from(fix.longitude),
            recorded_at: fix.recorded_at.clone(),
        }
    }
}

/// Normalize a whole trace. The first invalid fix aborts the call.
pub fn normalize_trace(raw: &[RawFix]) -> Result<Vec<Fix>> {
    raw.iter()
        .enumerate()
        .map(|(i, r)| r.normalize(i))
        .collect()
}

/// Parse a JSON array of raw fixes.
///
/// A `null` entry is reported as an invalid point rather than a JSON error.
pub fn parse_raw_fixes(data: &[u8]) -> Result<Vec<RawFix>> {
    let entries: Vec<Option<RawFix>> = serde_json::from_slice(data)?;
    entries
        .into_iter()
        .enumerate()
        .map(|(i, entry)| entry.ok_or_else(|| TraceError::invalid_point(i, "point", "is null")))
        .collect()
}

fn parse_coordinate(value: &Value, index: usize, field: &'static str) -> Result<f64> {
    let parsed = match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| TraceError::invalid_point(index, field, format!("{n} is not representable")))?,
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| TraceError::invalid_point(index, field, format!("{s:?} is not a number")))?,
        Value::Null => return Err(TraceError::invalid_point(index, field, "is missing")),
        Value::Bool(_) | Value::Array(_) | Value::Object(_) => {
            return Err(TraceError::invalid_point(index, field, "is not a number"));
        }
    };

    if !parsed.is_finite() {
        return Err(TraceError::invalid_point(index, field, "is not finite"));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw(latitude: Value, longitude: Value) -> RawFix {
        RawFix {
            latitude,
            longitude,
            recorded_at: None,
        }
    }

    #[test]
    fn normalize_numbers() {
        let fix = raw(json!(40.4237), json!(-86.9212)).normalize(0).unwrap();
        assert_eq!(fix, Fix::new(40.4237, -86.9212));
    }

    #[test]
    fn normalize_numeric_strings() {
        let fix = raw(json!(" 40.4237"), json!("-86.9212 ")).normalize(0).unwrap();
        assert_eq!(fix.latitude, 40.4237);
        assert_eq!(fix.longitude, -86.9212);
    }

    #[test]
    fn normalize_passes_timestamp_through() {
        let mut r = raw(json!(1.0), json!(2.0));
        r.recorded_at = Some(json!("2025-11-14T18:03:22.120Z"));
        let fix = r.normalize(0).unwrap();
        assert_eq!(fix.recorded_at, Some(json!("2025-11-14T18:03:22.120Z")));

        r.recorded_at = Some(json!(1763143402120_u64));
        assert_eq!(r.normalize(0).unwrap().recorded_at, Some(json!(1763143402120_u64)));
    }

    #[test]
    fn normalize_rejects_garbage_string() {
        let err = raw(json!("north"), json!(2.0)).normalize(7).unwrap_err();
        match err {
            TraceError::InvalidPoint { index, field, .. } => {
                assert_eq!(index, 7);
                assert_eq!(field, "latitude");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn normalize_rejects_missing_coordinate() {
        let err = raw(json!(1.0), Value::Null).normalize(0).unwrap_err();
        assert!(matches!(
            err,
            TraceError::InvalidPoint { field: "longitude", .. }
        ));
    }

    #[test]
    fn normalize_rejects_non_finite_strings() {
        for text in ["NaN", "inf", "-infinity"] {
            let result = raw(json!(text), json!(0.0)).normalize(0);
            assert!(result.is_err(), "{text} should be rejected");
        }
    }

    #[test]
    fn normalize_rejects_non_scalar_values() {
        assert!(raw(json!(true), json!(0.0)).normalize(0).is_err());
        assert!(raw(json!([1.0]), json!(0.0)).normalize(0).is_err());
        assert!(raw(json!({"v": 1.0}), json!(0.0)).normalize(0).is_err());
    }

    #[test]
    fn normalize_trace_stops_at_first_bad_fix() {
        let trace = vec![
            raw(json!(1.0), json!(1.0)),
            raw(json!(1.0), json!("x")),
            raw(json!("y"), json!(1.0)),
        ];
        let err = normalize_trace(&trace).unwrap_err();
        assert!(matches!(err, TraceError::InvalidPoint { index: 1, .. }));
    }

    #[test]
    fn parse_raw_fixes_accepts_mixed_types() {
        let data = br#"[
            {"latitude": 40.1, "longitude": "-86.2", "recorded_at": "t0"},
            {"latitude": "40.2", "longitude": -86.3}
        ]"#;
        let raw = parse_raw_fixes(data).unwrap();
        let fixes = normalize_trace(&raw).unwrap();
        assert_eq!(fixes.len(), 2);
        assert_eq!(fixes[0].recorded_at, Some(json!("t0")));
        assert_eq!(fixes[1].recorded_at, None);
    }

    #[test]
    fn parse_raw_fixes_missing_field_fails_normalization() {
        let raw = parse_raw_fixes(br#"[{"latitude": 1.0}]"#).unwrap();
        assert!(normalize_trace(&raw).is_err());
    }

    #[test]
    fn parse_raw_fixes_null_point() {
        let err = parse_raw_fixes(br#"[{"latitude": 1, "longitude": 2}, null]"#).unwrap_err();
        assert!(matches!(
            err,
            TraceError::InvalidPoint { index: 1, field: "point", .. }
        ));
    }

    #[test]
    fn parse_raw_fixes_malformed_json() {
        let err = parse_raw_fixes(b"[{").unwrap_err();
        assert!(matches!(err, TraceError::Json(_)));
    }

    #[test]
    fn fix_serializes_without_empty_timestamp() {
        let text = serde_json::to_string(&Fix::new(1.5, 2.5)).unwrap();
        assert_eq!(text, r#"{"latitude":1.5,"longitude":2.5}"#);
    }
}
