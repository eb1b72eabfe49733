//! Field normalization
//!
//! Backend producers disagree on column names (`session_count`,
//! `sessionCount`, `sessions`) and on encodings (`"4.5"` vs `4.5`). Every
//! lookup here takes an ordered list of candidate keys and returns the first
//! present value that coerces to the requested type. A present value that
//! does not coerce is skipped, never an error.

mod composite;

pub use composite::{areas, canonical_json, metadata, price, PriceColumns};

use crate::payload::Row;
use serde_json::Value;

/// Types a single JSON value can be coerced into.
pub trait FromField: Sized {
    /// Coerce `value`, or `None` if it has the wrong shape
    fn from_field(value: &Value) -> Option<Self>;
}

impl FromField for String {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }
}

impl FromField for f64 {
    fn from_field(value: &Value) -> Option<Self> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        parsed.filter(|v| v.is_finite())
    }
}

impl FromField for i64 {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(integral)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
            }
            _ => None,
        }
    }
}

impl FromField for bool {
    fn from_field(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim().to_lowercase().as_str() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

// 12.0 -> 12, 12.5 -> None
fn integral(v: f64) -> Option<i64> {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

/// Look up the first candidate key whose value coerces to `T`.
///
/// # Example
///
/// ```rust,ignore
/// let rating: Option<f64> = field(&row, &["rating", "avg_rating"]);
/// ```
pub fn field<T: FromField, K: AsRef<str>>(row: &Row, keys: &[K]) -> Option<T> {
    keys.iter()
        .filter_map(|key| row.get(key.as_ref()))
        .find_map(T::from_field)
}
