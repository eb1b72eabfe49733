//! Query executor boundary

use crate::error::Result;
use crate::payload::RawPayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Sort direction for an ordered query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}

impl Direction {
    /// Short form used in query strings ("asc" / "desc")
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Ascending => "asc",
            Direction::Descending => "desc",
        }
    }
}

/// Column ordering for a query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    pub direction: Direction,
}

impl OrderBy {
    pub fn new(column: impl Into<String>, direction: Direction) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }

    pub fn descending(column: impl Into<String>) -> Self {
        Self::new(column, Direction::Descending)
    }
}

/// Equality filter on one column
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub equals: String,
}

/// Description of a select query handed to a [`QueryExecutor`].
///
/// Built as `select(table, columns) -> eq(..)* -> order(..)? -> limit(..)?`.
/// The executor decides how to put it on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub table: String,
    pub columns: String,
    pub filters: Vec<Filter>,
    pub order: Option<OrderBy>,
    pub limit: Option<u32>,
}

impl Query {
    pub fn select(table: impl Into<String>, columns: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            columns: columns.into(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    pub fn eq(mut self, column: impl Into<String>, equals: impl Into<String>) -> Self {
        self.filters.push(Filter {
            column: column.into(),
            equals: equals.into(),
        });
        self
    }

    pub fn order(mut self, column: impl Into<String>, direction: Direction) -> Self {
        self.order = Some(OrderBy::new(column, direction));
        self
    }

    pub fn with_order(mut self, order: Option<OrderBy>) -> Self {
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Value of the equality filter on `column`, if any
    pub fn filter_value(&self, column: &str) -> Option<&str> {
        self.filters
            .iter()
            .find(|f| f.column == column)
            .map(|f| f.equals.as_str())
    }
}

/// What an executor hands back for one query.
///
/// A populated `error` means the backend rejected the query even though the
/// call itself completed; the engine treats it as a transport failure.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResponse {
    pub data: RawPayload,
    pub error: Option<String>,
}

impl QueryResponse {
    pub fn ok(data: impl Into<RawPayload>) -> Self {
        Self {
            data: data.into(),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            data: RawPayload::Empty,
            error: Some(error.into()),
        }
    }
}

/// Capability that runs a [`Query`] against the hosted backend.
///
/// Implementations own transport concerns: serialization, auth, timeouts
/// and retries. Errors should be reported as `MentorError::Transport`.
///
/// # Example
///
/// ```rust,ignore
/// struct Canned(serde_json::Value);
///
/// #[async_trait]
/// impl QueryExecutor for Canned {
///     async fn execute(&self, _query: &Query) -> Result<QueryResponse> {
///         Ok(QueryResponse::ok(self.0.clone()))
///     }
/// }
/// ```
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, query: &Query) -> Result<QueryResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder_chain() {
        let query = Query::select("mentors", "*")
            .eq("name", "Asha Rao")
            .order("created_at", Direction::Descending)
            .limit(100);

        assert_eq!(query.table, "mentors");
        assert_eq!(query.filter_value("name"), Some("Asha Rao"));
        assert_eq!(query.filter_value("id"), None);
        assert_eq!(query.order, Some(OrderBy::descending("created_at")));
        assert_eq!(query.limit, Some(100));
    }
}
