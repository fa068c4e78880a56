//! Numeric sanitization for bounded score fields.

use super::extract::JsonObject;
use serde_json::{Number, Value};

/// Coerce a JSON value to a float the way a lenient reader would.
///
/// Numbers pass through, numeric strings are parsed, booleans map to 1/0.
/// Anything else (including non-finite results) is `None`.
fn coerce_f64(value: &Value) -> Option<f64> {
    let raw = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }?;
    raw.is_finite().then_some(raw)
}

/// Clamp a value into [0, 1] and round to two decimal places.
///
/// Coercion failures become `0.0`.
pub fn unit_score(value: &Value) -> f64 {
    match coerce_f64(value) {
        Some(v) => (v.clamp(0.0, 1.0) * 100.0).round() / 100.0,
        None => 0.0,
    }
}

/// Sanitize every bounded field present in `object`.
///
/// Missing fields are left absent; the schema check decides whether they
/// were required.
pub fn sanitize_bounded_fields(object: &mut JsonObject, fields: &[&str]) {
    for field in fields {
        if let Some(value) = object.get_mut(*field) {
            let score = unit_score(value);
            *value = Number::from_f64(score).map_or(Value::from(0.0), Value::Number);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_in_range_value_is_rounded() {
        assert_eq!(unit_score(&json!(0.876)), 0.88);
        assert_eq!(unit_score(&json!(0.5)), 0.5);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(unit_score(&json!(7)), 1.0);
        assert_eq!(unit_score(&json!(-0.3)), 0.0);
        assert_eq!(unit_score(&json!(87)), 1.0);
    }

    #[test]
    fn test_numeric_string_is_coerced() {
        assert_eq!(unit_score(&json!("0.42")), 0.42);
        assert_eq!(unit_score(&json!(" 1.5 ")), 1.0);
    }

    #[test]
    fn test_non_numeric_becomes_zero() {
        assert_eq!(unit_score(&json!("high")), 0.0);
        assert_eq!(unit_score(&json!(null)), 0.0);
        assert_eq!(unit_score(&json!([0.3])), 0.0);
        assert_eq!(unit_score(&json!("NaN")), 0.0);
    }

    #[test]
    fn test_booleans() {
        assert_eq!(unit_score(&json!(true)), 1.0);
        assert_eq!(unit_score(&json!(false)), 0.0);
    }

    #[test]
    fn test_sanitize_only_touches_listed_fields() {
        let mut object = json!({"confidence": "0.919", "count": 12, "classification": "safe"})
            .as_object()
            .cloned()
            .unwrap();
        sanitize_bounded_fields(&mut object, &["confidence", "score"]);
        assert_eq!(object["confidence"], json!(0.92));
        assert_eq!(object["count"], json!(12));
        assert!(object.get("score").is_none());
    }
}
