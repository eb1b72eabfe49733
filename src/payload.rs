//! Payload unwrapping
//!
//! Turns whatever the query executor returned into an ordered list of rows.
//! Accepted shapes, first match wins:
//!
//! 1. a bare JSON array
//! 2. an object holding the array under `data`, `result`, `rows` or
//!    `payload`, or failing that under any key (first array in key order)
//! 3. JSON-encoded bytes or text of either of the above
//!
//! Anything else is "no rows" rather than an error. Bytes or text that are
//! not JSON at all are a [`MentorError::Decode`].

use crate::error::{MentorError, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// One record-like mapping from a backend response
pub type Row = Map<String, Value>;

/// Container keys checked, in order, when a payload is wrapped in an object
pub const CONTAINER_KEYS: [&str; 4] = ["data", "result", "rows", "payload"];

/// Opaque value returned by a query executor
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawPayload {
    /// Nothing came back
    #[default]
    Empty,
    /// Already-parsed JSON
    Json(Value),
    /// JSON-encoded bytes (typically an HTTP body)
    Bytes(Vec<u8>),
    /// JSON-encoded text
    Text(String),
}

impl From<Value> for RawPayload {
    fn from(value: Value) -> Self {
        RawPayload::Json(value)
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        RawPayload::Bytes(bytes)
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        RawPayload::Text(text)
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        RawPayload::Text(text.to_string())
    }
}

/// Extract the row sequence from a raw payload.
///
/// Returns `Ok(None)` for well-formed payloads that hold no array.
pub fn unwrap_rows(raw: RawPayload) -> Result<Option<Vec<Row>>> {
    match raw {
        RawPayload::Empty => Ok(None),
        RawPayload::Json(Value::String(text)) | RawPayload::Text(text) => {
            let value: Value = serde_json::from_str(&text)
                .map_err(|e| MentorError::Decode(format!("payload text is not JSON: {}", e)))?;
            Ok(rows_from_value(value))
        }
        RawPayload::Json(value) => Ok(rows_from_value(value)),
        RawPayload::Bytes(bytes) => {
            let value: Value = serde_json::from_slice(&bytes)
                .map_err(|e| MentorError::Decode(format!("payload bytes are not JSON: {}", e)))?;
            Ok(rows_from_value(value))
        }
    }
}

/// Like [`unwrap_rows`] but treats "no array found" as zero rows
pub fn unwrap_rows_or_empty(raw: RawPayload) -> Result<Vec<Row>> {
    Ok(unwrap_rows(raw)?.unwrap_or_default())
}

fn rows_from_value(value: Value) -> Option<Vec<Row>> {
    match value {
        Value::Array(items) => Some(into_rows(items)),
        Value::Object(mut map) => {
            for key in CONTAINER_KEYS {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return Some(into_rows(items));
                    }
                }
            }
            map.into_iter().find_map(|(_, v)| match v {
                Value::Array(items) => Some(into_rows(items)),
                _ => None,
            })
        }
        _ => None,
    }
}

fn into_rows(items: Vec<Value>) -> Vec<Row> {
    let total = items.len();
    let rows: Vec<Row> = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Object(row) => Some(row),
            _ => None,
        })
        .collect();

    if rows.len() != total {
        debug!(skipped = total - rows.len(), "Dropped non-object array elements");
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!([
            {"id": "m1", "name": "Asha"},
            {"id": "m2", "name": "Ravi"}
        ])
    }

    fn ids(rows: &[Row]) -> Vec<&str> {
        rows.iter().filter_map(|r| r.get("id").and_then(|v| v.as_str())).collect()
    }

    #[test]
    fn test_bare_list() {
        let rows = unwrap_rows(RawPayload::Json(sample())).unwrap().unwrap();
        assert_eq!(ids(&rows), vec!["m1", "m2"]);
    }

    #[test]
    fn test_known_container_key() {
        let wrapped = json!({"count": 2, "rows": sample()});
        let rows = unwrap_rows(wrapped.into()).unwrap().unwrap();
        assert_eq!(ids(&rows), vec!["m1", "m2"]);
    }

    #[test]
    fn test_container_key_precedence() {
        // "data" beats "rows" even though "rows" comes first in the object
        let wrapped = json!({
            "rows": [{"id": "wrong"}],
            "data": sample(),
        });
        let rows = unwrap_rows(wrapped.into()).unwrap().unwrap();
        assert_eq!(ids(&rows), vec!["m1", "m2"]);
    }

    #[test]
    fn test_unknown_key_fallback() {
        let wrapped = json!({"status": "ok", "mentors": sample()});
        let rows = unwrap_rows(wrapped.into()).unwrap().unwrap();
        assert_eq!(ids(&rows), vec!["m1", "m2"]);
    }

    #[test]
    fn test_encoded_bytes_and_text() {
        let wrapped = json!({"data": sample()}).to_string();

        let from_bytes = unwrap_rows(RawPayload::Bytes(wrapped.clone().into_bytes()))
            .unwrap()
            .unwrap();
        let from_text = unwrap_rows(RawPayload::Text(wrapped)).unwrap().unwrap();
        let from_bare_text = unwrap_rows(RawPayload::Text(sample().to_string()))
            .unwrap()
            .unwrap();

        assert_eq!(from_bytes, from_text);
        assert_eq!(from_text, from_bare_text);
        assert_eq!(ids(&from_bytes), vec!["m1", "m2"]);
    }

    #[test]
    fn test_shapeless_payload_is_absent() {
        assert_eq!(unwrap_rows(RawPayload::Empty).unwrap(), None);
        assert_eq!(unwrap_rows(json!({"status": "ok"}).into()).unwrap(), None);
        assert_eq!(unwrap_rows(json!(42).into()).unwrap(), None);
        assert!(unwrap_rows_or_empty(json!(null).into()).unwrap().is_empty());
    }

    #[test]
    fn test_malformed_bytes_are_decode_error() {
        let err = unwrap_rows(RawPayload::Bytes(b"{not json".to_vec())).unwrap_err();
        assert!(matches!(err, MentorError::Decode(_)));

        let err = unwrap_rows(RawPayload::Text("<html>502</html>".into())).unwrap_err();
        assert!(matches!(err, MentorError::Decode(_)));
    }

    #[test]
    fn test_non_object_elements_skipped() {
        let rows = unwrap_rows(json!([{"id": "m1"}, "junk", 3, {"id": "m2"}]).into())
            .unwrap()
            .unwrap();
        assert_eq!(ids(&rows), vec!["m1", "m2"]);
    }
}
