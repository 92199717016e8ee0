//! Bound value definitions
//!
//! This module provides the closed set of literal values a placeholder
//! token may be bound to, and the conversions from plain Rust types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// A literal bound to a placeholder token.
///
/// Values never become statement text; the execution layer binds them
/// as data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BoundValue {
    Text(String),
    Integer(i32),
    BigInt(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
    /// Collection parameter, expanded by the execution layer
    List(Vec<BoundValue>),
    Null,
}

impl BoundValue {
    /// Short name of the variant, used in log output
    pub fn kind(&self) -> &'static str {
        match self {
            BoundValue::Text(_) => "text",
            BoundValue::Integer(_) => "integer",
            BoundValue::BigInt(_) => "bigint",
            BoundValue::Float(_) => "float",
            BoundValue::Boolean(_) => "boolean",
            BoundValue::Uuid(_) => "uuid",
            BoundValue::Date(_) => "date",
            BoundValue::Timestamp(_) => "timestamp",
            BoundValue::Json(_) => "json",
            BoundValue::List(_) => "list",
            BoundValue::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, BoundValue::Null)
    }

    /// Elements of a collection parameter, `None` for scalars
    pub fn as_list(&self) -> Option<&[BoundValue]> {
        match self {
            BoundValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for BoundValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundValue::Text(s) => write!(f, "'{}'", s),
            BoundValue::Integer(i) => write!(f, "{}", i),
            BoundValue::BigInt(i) => write!(f, "{}", i),
            BoundValue::Float(x) => write!(f, "{}", x),
            BoundValue::Boolean(b) => write!(f, "{}", b),
            BoundValue::Uuid(u) => write!(f, "{}", u),
            BoundValue::Date(d) => write!(f, "{}", d),
            BoundValue::Timestamp(ts) => write!(f, "{}", ts.to_rfc3339()),
            BoundValue::Json(v) => write!(f, "{}", v),
            BoundValue::List(items) => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            BoundValue::Null => write!(f, "NULL"),
        }
    }
}

impl From<String> for BoundValue {
    fn from(val: String) -> Self {
        BoundValue::Text(val)
    }
}

impl From<&str> for BoundValue {
    fn from(val: &str) -> Self {
        BoundValue::Text(val.to_string())
    }
}

impl From<&String> for BoundValue {
    fn from(val: &String) -> Self {
        BoundValue::Text(val.clone())
    }
}

impl From<i32> for BoundValue {
    fn from(val: i32) -> Self {
        BoundValue::Integer(val)
    }
}

impl From<i64> for BoundValue {
    fn from(val: i64) -> Self {
        BoundValue::BigInt(val)
    }
}

impl From<u32> for BoundValue {
    fn from(val: u32) -> Self {
        BoundValue::BigInt(val as i64)
    }
}

impl From<f64> for BoundValue {
    fn from(val: f64) -> Self {
        BoundValue::Float(val)
    }
}

impl From<bool> for BoundValue {
    fn from(val: bool) -> Self {
        BoundValue::Boolean(val)
    }
}

impl From<Uuid> for BoundValue {
    fn from(val: Uuid) -> Self {
        BoundValue::Uuid(val)
    }
}

impl From<NaiveDate> for BoundValue {
    fn from(val: NaiveDate) -> Self {
        BoundValue::Date(val)
    }
}

impl From<DateTime<Utc>> for BoundValue {
    fn from(val: DateTime<Utc>) -> Self {
        BoundValue::Timestamp(val)
    }
}

impl From<serde_json::Value> for BoundValue {
    fn from(val: serde_json::Value) -> Self {
        BoundValue::Json(val)
    }
}

impl<T> From<Vec<T>> for BoundValue
where
    T: Into<BoundValue>,
{
    fn from(val: Vec<T>) -> Self {
        BoundValue::List(val.into_iter().map(Into::into).collect())
    }
}

impl<T> From<Option<T>> for BoundValue
where
    T: Into<BoundValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => BoundValue::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(BoundValue::from("Alice"), BoundValue::Text("Alice".to_string()));
        assert_eq!(BoundValue::from(42), BoundValue::Integer(42));
        assert_eq!(BoundValue::from(42_i64), BoundValue::BigInt(42));
        assert_eq!(BoundValue::from(7_u32), BoundValue::BigInt(7));
        assert_eq!(BoundValue::from(true), BoundValue::Boolean(true));
    }

    #[test]
    fn test_option_and_vec_conversions() {
        assert!(BoundValue::from(Option::<i32>::None).is_null());
        assert_eq!(BoundValue::from(Some("x")), BoundValue::Text("x".to_string()));

        let list = BoundValue::from(vec![1, 2, 3]);
        assert_eq!(list.as_list().map(|items| items.len()), Some(3));
        assert_eq!(list.kind(), "list");
    }

    #[test]
    fn test_date_conversion() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let value = BoundValue::from(date);
        assert_eq!(value.kind(), "date");
        assert_eq!(value.to_string(), "2024-02-29");
    }

    #[test]
    fn test_display() {
        assert_eq!(BoundValue::from("a").to_string(), "'a'");
        assert_eq!(BoundValue::Null.to_string(), "NULL");
        assert_eq!(BoundValue::from(vec!["a", "b"]).to_string(), "['a', 'b']");
    }
}
