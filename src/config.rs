//! Client configuration

use crate::error::{MentorError, Result};
use crate::record::{RecordSchema, DEFAULT_CURRENCY_PREFIX};
use crate::traits::OrderBy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default row cap for the batch scan strategy
pub const DEFAULT_BATCH_SCAN_LIMIT: u32 = 100;

/// Where mentor rows live and how they are read.
///
/// Every field has a default, so a config document only needs to name what
/// differs from the hosted schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend table holding mentor rows
    pub table: String,
    /// Column selection passed to the executor
    pub columns: String,
    /// Unique identifier column for direct lookup
    pub id_column: String,
    /// Column holding the primary display name
    pub primary_name_column: String,
    /// Alternate column some producers store the human name under
    pub secondary_name_column: String,
    /// Maximum rows fetched for the local substring scan
    pub batch_scan_limit: u32,
    /// Ordering for the batch scan fetch (most recent first by default)
    pub batch_scan_order: Option<OrderBy>,
    /// Ordering for bulk listing
    pub listing_order: Option<OrderBy>,
    /// Row cap for bulk listing
    pub listing_limit: Option<u32>,
    /// Prefix applied to every formatted price
    pub currency_prefix: String,
    /// Deadline for one whole detail resolution, in milliseconds
    pub resolve_timeout_ms: Option<u64>,
    /// Candidate keys for each record field
    pub schema: RecordSchema,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            table: "mentors".to_string(),
            columns: "*".to_string(),
            id_column: "id".to_string(),
            primary_name_column: "name".to_string(),
            secondary_name_column: "full_name".to_string(),
            batch_scan_limit: DEFAULT_BATCH_SCAN_LIMIT,
            batch_scan_order: Some(OrderBy::descending("created_at")),
            listing_order: None,
            listing_limit: None,
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
            resolve_timeout_ms: None,
            schema: RecordSchema::default(),
        }
    }
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON config document and validate it
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| MentorError::Config(format!("invalid config document: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    pub fn with_name_columns(
        mut self,
        primary: impl Into<String>,
        secondary: impl Into<String>,
    ) -> Self {
        self.primary_name_column = primary.into();
        self.secondary_name_column = secondary.into();
        self
    }

    pub fn with_batch_scan_limit(mut self, limit: u32) -> Self {
        self.batch_scan_limit = limit;
        self
    }

    pub fn with_currency_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.currency_prefix = prefix.into();
        self
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    pub fn with_schema(mut self, schema: RecordSchema) -> Self {
        self.schema = schema;
        self
    }

    /// Resolution deadline, if one is configured
    pub fn resolve_timeout(&self) -> Option<Duration> {
        self.resolve_timeout_ms.map(Duration::from_millis)
    }

    /// Reject configs that would make every lookup meaningless
    pub fn validate(&self) -> Result<()> {
        if self.table.trim().is_empty() {
            return Err(MentorError::Config("table must not be empty".into()));
        }
        for (label, column) in [
            ("id_column", &self.id_column),
            ("primary_name_column", &self.primary_name_column),
            ("secondary_name_column", &self.secondary_name_column),
        ] {
            if column.trim().is_empty() {
                return Err(MentorError::Config(format!("{} must not be empty", label)));
            }
        }
        if self.batch_scan_limit == 0 {
            return Err(MentorError::Config("batch_scan_limit must be at least 1".into()));
        }
        Ok(())
    }
}
