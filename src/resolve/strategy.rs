//! Lookup strategies for detail resolution
//!
//! Each strategy turns the caller's partial information into zero or more
//! rows. An empty result lets the next strategy run; an error ends the
//! resolution.

use crate::config::ClientConfig;
use crate::error::{MentorError, Result};
use crate::payload::{unwrap_rows_or_empty, Row};
use crate::traits::{Query, QueryExecutor};
use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

/// Inputs shared by every strategy in one resolution
pub struct LookupContext<'a> {
    pub executor: &'a dyn QueryExecutor,
    pub config: &'a ClientConfig,
    pub id: Option<&'a str>,
    /// Display name, trimmed by the resolver before any strategy runs
    pub name: &'a str,
}

impl LookupContext<'_> {
    /// Run one query and unwrap its rows
    pub async fn fetch(&self, query: &Query) -> Result<Vec<Row>> {
        fetch_rows(self.executor, query).await
    }

    fn base_query(&self) -> Query {
        Query::select(&self.config.table, &self.config.columns)
    }
}

/// Execute `query`, treating a backend-reported error as a transport failure
pub(crate) async fn fetch_rows(executor: &dyn QueryExecutor, query: &Query) -> Result<Vec<Row>> {
    let response = executor.execute(query).await?;
    if let Some(error) = response.error {
        return Err(MentorError::Transport(error));
    }
    unwrap_rows_or_empty(response.data)
}

/// One step in the resolution chain.
#[async_trait]
pub trait LookupStrategy: Send + Sync {
    /// Stable name reported in logs and resolution results
    fn name(&self) -> &'static str;

    /// Rows this strategy considers a match, best first
    async fn attempt(&self, ctx: &LookupContext<'_>) -> Result<Vec<Row>>;
}

/// Equality lookup on the unique identifier. Skipped when no id is known.
pub struct IdLookup;

#[async_trait]
impl LookupStrategy for IdLookup {
    fn name(&self) -> &'static str {
        "id"
    }

    async fn attempt(&self, ctx: &LookupContext<'_>) -> Result<Vec<Row>> {
        let Some(id) = ctx.id.map(str::trim).filter(|id| !id.is_empty()) else {
            debug!("No identifier supplied, skipping id lookup");
            return Ok(Vec::new());
        };

        let query = ctx.base_query().eq(&ctx.config.id_column, id);
        ctx.fetch(&query).await
    }
}

/// Which configured name column a [`NameLookup`] filters on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameColumn {
    Primary,
    Secondary,
}

/// Exact-equality lookup on a name column
pub struct NameLookup {
    column: NameColumn,
}

impl NameLookup {
    pub fn primary() -> Self {
        Self {
            column: NameColumn::Primary,
        }
    }

    pub fn secondary() -> Self {
        Self {
            column: NameColumn::Secondary,
        }
    }
}

#[async_trait]
impl LookupStrategy for NameLookup {
    fn name(&self) -> &'static str {
        match self.column {
            NameColumn::Primary => "primary_name",
            NameColumn::Secondary => "secondary_name",
        }
    }

    async fn attempt(&self, ctx: &LookupContext<'_>) -> Result<Vec<Row>> {
        let column = match self.column {
            NameColumn::Primary => &ctx.config.primary_name_column,
            NameColumn::Secondary => &ctx.config.secondary_name_column,
        };

        let query = ctx.base_query().eq(column, ctx.name);
        ctx.fetch(&query).await
    }
}

/// Fetch a bounded batch and scan it locally for a case-insensitive
/// substring match on any string or string-list field.
pub struct BatchScan;

#[async_trait]
impl LookupStrategy for BatchScan {
    fn name(&self) -> &'static str {
        "batch_scan"
    }

    async fn attempt(&self, ctx: &LookupContext<'_>) -> Result<Vec<Row>> {
        // an empty needle would match the first row of every batch
        let needle = ctx.name.to_lowercase();
        if needle.is_empty() {
            debug!("Blank name, skipping batch scan");
            return Ok(Vec::new());
        }

        let query = ctx
            .base_query()
            .with_order(ctx.config.batch_scan_order.clone())
            .limit(ctx.config.batch_scan_limit);
        let rows = ctx.fetch(&query).await?;
        let scanned = rows.len();

        let found: Vec<Row> = rows
            .into_iter()
            .find(|row| row_mentions(row, &needle))
            .into_iter()
            .collect();

        debug!(scanned, matched = !found.is_empty(), "Batch scan finished");
        Ok(found)
    }
}

/// Whether any string field, or any string inside a list field, contains
/// `needle` (already lowercased).
pub fn row_mentions(row: &Row, needle: &str) -> bool {
    let contains = |s: &str| s.to_lowercase().contains(needle);

    row.values().any(|value| match value {
        Value::String(s) => contains(s.as_str()),
        Value::Array(items) => items.iter().filter_map(Value::as_str).any(contains),
        _ => false,
    })
}

/// The standard chain: id, primary name, secondary name, batch scan
pub fn default_chain() -> Vec<Box<dyn LookupStrategy>> {
    vec![
        Box::new(IdLookup),
        Box::new(NameLookup::primary()),
        Box::new(NameLookup::secondary()),
        Box::new(BatchScan),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_row_mentions_strings_and_lists() {
        let r = row(json!({
            "name": "Priya Nair",
            "mentorship_areas": ["Stage Combat", "Voice Acting"],
            "rating": 4.5,
        }));

        assert!(row_mentions(&r, "nair"));
        assert!(row_mentions(&r, "voice"));
        assert!(!row_mentions(&r, "4.5"));
        assert!(!row_mentions(&r, "dance"));
    }

    #[test]
    fn test_row_mentions_ignores_nested_objects() {
        let r = row(json!({"metadata": {"alias": "Priya"}}));
        assert!(!row_mentions(&r, "priya"));
    }

    #[test]
    fn test_default_chain_order() {
        let names: Vec<_> = default_chain().iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["id", "primary_name", "secondary_name", "batch_scan"]);
    }
}
