//! Composite extractors built on the scalar lookup

use super::field;
use crate::payload::Row;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mentorship areas: a native list of strings, or a string holding a JSON
/// list of strings. A list holding anything but strings does not count and
/// the next key is tried. Order and duplicates are kept as returned.
pub fn areas<K: AsRef<str>>(row: &Row, keys: &[K]) -> Option<Vec<String>> {
    keys.iter()
        .filter_map(|key| row.get(key.as_ref()))
        .find_map(|value| match value {
            Value::Array(items) => strings(items),
            Value::String(text) => match serde_json::from_str::<Value>(text) {
                Ok(Value::Array(items)) => strings(&items),
                _ => None,
            },
            _ => None,
        })
}

fn strings(items: &[Value]) -> Option<Vec<String>> {
    items
        .iter()
        .map(|v| v.as_str().map(|s| s.to_string()))
        .collect()
}

/// Metadata blob as a JSON string.
///
/// A string value is kept verbatim when it is valid JSON; any other non-null
/// value is re-serialized through [`canonical_json`]. The result is always
/// parseable JSON.
pub fn metadata<K: AsRef<str>>(row: &Row, keys: &[K]) -> Option<String> {
    keys.iter()
        .filter_map(|key| row.get(key.as_ref()))
        .find_map(|value| match value {
            Value::Null => None,
            Value::String(text) => serde_json::from_str::<Value>(text)
                .ok()
                .map(|_| text.clone()),
            other => Some(canonical_json(other)),
        })
}

/// Serialize with object keys sorted at every depth
pub fn canonical_json(value: &Value) -> String {
    sorted(value).to_string()
}

fn sorted(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            let mut out = Map::new();
            for (k, v) in entries {
                out.insert(k.clone(), sorted(v));
            }
            Value::Object(out)
        }
        Value::Array(items) => Value::Array(items.iter().map(sorted).collect()),
        other => other.clone(),
    }
}

/// Candidate columns for the price extractor, in precedence order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceColumns {
    /// Major-unit amount, numeric or numeric string
    pub money: Vec<String>,
    /// Alternate major-unit amount, numeric or numeric string
    pub price: Vec<String>,
    /// Integer amount in the smallest currency unit
    pub minor_units: Vec<String>,
}

impl Default for PriceColumns {
    fn default() -> Self {
        Self {
            money: vec!["money".into()],
            price: vec!["price".into()],
            minor_units: vec!["price_cents".into(), "priceCents".into()],
        }
    }
}

/// Display price, always prefixed with `prefix`.
///
/// Precedence: numeric `money`, numeric `price`, `minor_units / 100`
/// (truncating), then any non-empty raw text in `money` or `price`.
pub fn price(row: &Row, columns: &PriceColumns, prefix: &str) -> Option<String> {
    field::<f64, _>(row, &columns.money)
        .or_else(|| field::<f64, _>(row, &columns.price))
        .map(format_amount)
        .or_else(|| {
            field::<i64, _>(row, &columns.minor_units).map(|minor| (minor / 100).to_string())
        })
        .or_else(|| raw_text(row, &columns.money))
        .or_else(|| raw_text(row, &columns.price))
        .map(|amount| format!("{}{}", prefix, amount))
}

fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 && amount.abs() < 1e15 {
        format!("{}", amount as i64)
    } else {
        format!("{:.2}", amount)
    }
}

fn raw_text(row: &Row, keys: &[String]) -> Option<String> {
    keys.iter()
        .filter_map(|key| row.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
}
