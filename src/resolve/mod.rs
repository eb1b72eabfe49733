//! Detail resolution - cascading lookup with first-non-empty-wins
//!
//! ```text
//! id lookup (only with an id)
//!      ↓ zero rows
//! primary name column = name
//!      ↓ zero rows
//! secondary name column = name
//!      ↓ zero rows
//! batch of ≤100 rows, local case-insensitive substring scan
//!      ↓ no match
//! not found (Ok(None))
//! ```
//!
//! Strategies run strictly in sequence. Any executor or decode error aborts
//! the whole resolution; only an empty result moves on to the next step.

mod attempt;
mod strategy;

pub use attempt::{AttemptState, ResolutionAttempt};
pub use strategy::{
    default_chain, row_mentions, BatchScan, IdLookup, LookupContext, LookupStrategy, NameColumn,
    NameLookup,
};

pub(crate) use strategy::fetch_rows;

use crate::config::ClientConfig;
use crate::error::{MentorError, Result};
use crate::record::MentorRecord;
use crate::traits::QueryExecutor;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// A resolved record with the strategy that found it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionResult {
    pub record: MentorRecord,
    /// Name of the winning strategy
    pub strategy: &'static str,
    /// Wall time for the whole chain in milliseconds
    pub duration_ms: f64,
}

/// Runs the strategy chain against an injected executor.
///
/// Holds no mutable state: concurrent `resolve` calls are independent and
/// nothing is cached between them.
pub struct Resolver {
    executor: Arc<dyn QueryExecutor>,
    config: Arc<ClientConfig>,
    strategies: Vec<Box<dyn LookupStrategy>>,
}

impl Resolver {
    /// Resolver with the standard four-step chain
    pub fn new(executor: Arc<dyn QueryExecutor>, config: Arc<ClientConfig>) -> Self {
        Self {
            executor,
            config,
            strategies: default_chain(),
        }
    }

    /// Replace the strategy chain
    pub fn with_strategies(mut self, strategies: Vec<Box<dyn LookupStrategy>>) -> Self {
        self.strategies = strategies;
        self
    }

    pub fn strategy_names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Resolve one record from an optional id and a display name.
    ///
    /// `Ok(None)` means every strategy ran and found nothing. When a
    /// deadline is configured, exceeding it yields [`MentorError::Timeout`].
    pub async fn resolve(&self, id: Option<&str>, name: &str) -> Result<Option<ResolutionResult>> {
        match self.config.resolve_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.run_chain(id, name))
                .await
                .map_err(|_| {
                    warn!(
                        name = name,
                        timeout_ms = limit.as_millis() as u64,
                        "Resolution timed out"
                    );
                    MentorError::Timeout(limit)
                })?,
            None => self.run_chain(id, name).await,
        }
    }

    async fn run_chain(&self, id: Option<&str>, name: &str) -> Result<Option<ResolutionResult>> {
        let start = Instant::now();
        // every strategy sees the same trimmed name
        let name = name.trim();
        let ctx = LookupContext {
            executor: self.executor.as_ref(),
            config: &self.config,
            id,
            name,
        };

        for strategy in &self.strategies {
            debug!(strategy = strategy.name(), name = name, "Trying lookup strategy");

            let rows = strategy.attempt(&ctx).await.map_err(|e| {
                warn!(
                    strategy = strategy.name(),
                    name = name,
                    error = %e,
                    "Lookup failed, aborting resolution"
                );
                e
            })?;

            if let Some(row) = rows.first() {
                let record = self.config.schema.assemble(row, &self.config.currency_prefix);
                let duration_ms = start.elapsed().as_secs_f64() * 1000.0;
                info!(
                    strategy = strategy.name(),
                    id = record.id.as_deref().unwrap_or(""),
                    duration_ms,
                    "Mentor resolved"
                );
                return Ok(Some(ResolutionResult {
                    record,
                    strategy: strategy.name(),
                    duration_ms,
                }));
            }

            debug!(strategy = strategy.name(), "No rows, falling through");
        }

        info!(name = name, has_id = id.is_some(), "Mentor not found by any strategy");
        Ok(None)
    }
}
