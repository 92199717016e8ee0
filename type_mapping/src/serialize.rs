//! Serialization utilities
//!
//! This module converts bound values to and from JSON, for callers that
//! receive filter values as JSON and for logging or binding list values.

use crate::types::BoundValue;
use serde_json::Value;

/// Convert a JSON value into the closest bound value.
///
/// Strings holding an RFC3339 timestamp become `Timestamp`, strings holding
/// a UUID become `Uuid`, arrays become `List`, objects stay `Json`.
pub fn bound_value_from_json(value: Value) -> BoundValue {
    match value {
        Value::String(s) => {
            if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(&s) {
                BoundValue::Timestamp(dt.with_timezone(&chrono::Utc))
            } else if let Ok(uuid) = uuid::Uuid::parse_str(&s) {
                BoundValue::Uuid(uuid)
            } else {
                BoundValue::Text(s)
            }
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                if i >= i32::MIN as i64 && i <= i32::MAX as i64 {
                    BoundValue::Integer(i as i32)
                } else {
                    BoundValue::BigInt(i)
                }
            } else if let Some(f) = n.as_f64() {
                BoundValue::Float(f)
            } else {
                BoundValue::Json(Value::Number(n))
            }
        }
        Value::Bool(b) => BoundValue::Boolean(b),
        Value::Null => BoundValue::Null,
        Value::Array(items) => {
            BoundValue::List(items.into_iter().map(bound_value_from_json).collect())
        }
        other => BoundValue::Json(other),
    }
}

impl BoundValue {
    /// Render the value as JSON
    pub fn to_json(&self) -> Value {
        match self {
            BoundValue::Text(s) => Value::String(s.clone()),
            BoundValue::Integer(i) => Value::from(*i),
            BoundValue::BigInt(i) => Value::from(*i),
            BoundValue::Float(f) => Value::from(*f),
            BoundValue::Boolean(b) => Value::Bool(*b),
            BoundValue::Uuid(u) => Value::String(u.to_string()),
            BoundValue::Date(d) => Value::String(d.to_string()),
            BoundValue::Timestamp(ts) => Value::String(ts.to_rfc3339()),
            BoundValue::Json(v) => v.clone(),
            BoundValue::List(items) => Value::Array(items.iter().map(BoundValue::to_json).collect()),
            BoundValue::Null => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_numbers_narrow_to_integer() {
        assert_eq!(bound_value_from_json(json!(5)), BoundValue::Integer(5));
        assert_eq!(bound_value_from_json(json!(i64::MAX)), BoundValue::BigInt(i64::MAX));
        assert_eq!(bound_value_from_json(json!(1.5)), BoundValue::Float(1.5));
    }

    #[test]
    fn test_strings_detect_uuid_and_timestamp() {
        let uuid = uuid::Uuid::new_v4();
        assert_eq!(
            bound_value_from_json(json!(uuid.to_string())),
            BoundValue::Uuid(uuid)
        );
        assert_eq!(
            bound_value_from_json(json!("2024-01-01T00:00:00Z")).kind(),
            "timestamp"
        );
        assert_eq!(
            bound_value_from_json(json!("hello")),
            BoundValue::Text("hello".to_string())
        );
    }

    #[test]
    fn test_arrays_become_lists() {
        let value = bound_value_from_json(json!(["a", 1, null]));
        assert_eq!(
            value,
            BoundValue::List(vec![
                BoundValue::Text("a".to_string()),
                BoundValue::Integer(1),
                BoundValue::Null,
            ])
        );
        assert_eq!(value.to_json(), json!(["a", 1, null]));
    }

    #[test]
    fn test_objects_stay_json() {
        let value = bound_value_from_json(json!({"k": "v"}));
        assert_eq!(value, BoundValue::Json(json!({"k": "v"})));
    }
}
