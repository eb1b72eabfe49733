//! Shared fake backend for integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use mentor_records::{
    ClientConfig, MentorClient, MentorError, Query, QueryExecutor, QueryResponse, RawPayload,
    Result,
};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// How the fake wraps its rows on the way out
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Bare,
    Wrapped,
    UnknownKey,
    Bytes,
    Text,
    Garbage,
}

/// In-memory table that evaluates equality filters and limits, and records
/// every query it receives.
pub struct FakeBackend {
    rows: Vec<Value>,
    shape: Shape,
    fail_on_column: Option<(String, MentorError)>,
    reported_error: Option<String>,
    delay: Option<Duration>,
    calls: Mutex<Vec<Query>>,
}

impl FakeBackend {
    pub fn new(rows: Value) -> Self {
        Self {
            rows: rows.as_array().cloned().unwrap_or_default(),
            shape: Shape::Bare,
            fail_on_column: None,
            reported_error: None,
            delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn shaped(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    /// Fail any query filtering on `column`
    pub fn failing_on(mut self, column: &str, error: MentorError) -> Self {
        self.fail_on_column = Some((column.to_string(), error));
        self
    }

    /// Complete every call but populate the response's error field
    pub fn reporting_error(mut self, message: &str) -> Self {
        self.reported_error = Some(message.to_string());
        self
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<Query> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn matches(row: &Value, query: &Query) -> bool {
        query.filters.iter().all(|filter| match row.get(&filter.column) {
            Some(Value::String(s)) => *s == filter.equals,
            Some(Value::Number(n)) => n.to_string() == filter.equals,
            _ => false,
        })
    }

    fn encode(&self, rows: Vec<Value>) -> RawPayload {
        let rows = Value::Array(rows);
        match self.shape {
            Shape::Bare => RawPayload::Json(rows),
            Shape::Wrapped => RawPayload::Json(json!({"count": 1, "data": rows})),
            Shape::UnknownKey => RawPayload::Json(json!({"status": "ok", "mentors": rows})),
            Shape::Bytes => RawPayload::Bytes(json!({"result": rows}).to_string().into_bytes()),
            Shape::Text => RawPayload::Text(rows.to_string()),
            Shape::Garbage => RawPayload::Bytes(b"<html>Bad Gateway</html>".to_vec()),
        }
    }
}

#[async_trait]
impl QueryExecutor for FakeBackend {
    async fn execute(&self, query: &Query) -> Result<QueryResponse> {
        self.calls.lock().unwrap().push(query.clone());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if let Some((column, error)) = &self.fail_on_column {
            if query.filter_value(column).is_some() {
                return Err(error.clone());
            }
        }

        if let Some(message) = &self.reported_error {
            return Ok(QueryResponse::failed(message.clone()));
        }

        let limit = query.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        let rows: Vec<Value> = self
            .rows
            .iter()
            .filter(|row| Self::matches(row, query))
            .take(limit)
            .cloned()
            .collect();

        Ok(QueryResponse::ok(self.encode(rows)))
    }
}

pub fn client(backend: &Arc<FakeBackend>) -> MentorClient {
    client_with(backend, ClientConfig::default())
}

pub fn client_with(backend: &Arc<FakeBackend>, config: ClientConfig) -> MentorClient {
    MentorClient::new(backend.clone(), config).unwrap()
}

/// A small mentor table with inconsistent column usage
pub fn mentor_rows() -> Value {
    json!([
        {
            "id": "m-1",
            "name": "Asha Rao",
            "role": "Casting Director",
            "rating": "4.8",
            "rating_count": 31,
            "mentorship_areas": ["Auditions", "Self-tapes"],
            "money": "500",
            "price_cents": 70000,
            "created_at": "2024-05-01T09:00:00Z"
        },
        {
            "id": "m-2",
            "name": "kabir",
            "full_name": "Kabir Menon",
            "title": "Acting Coach",
            "rating": 4.2,
            "mentorshipAreas": "[\"Method Acting\",\"Voice\"]",
            "price_cents": 12345
        },
        {
            "id": "m-3",
            "name": "V. Shah",
            "role": "Producer",
            "mentorship_areas": ["Stage Presence", "Pitching"],
            "metadata": {"years_of_experience": 12, "total_sessions": 88}
        }
    ])
}
