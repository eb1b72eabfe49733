//! Mentor client
//!
//! Two call shapes with different failure policies:
//! - listing is best-effort and degrades to an empty list
//! - detail resolution surfaces transport and decode errors so callers can
//!   tell "broken" from "not found"

use crate::config::ClientConfig;
use crate::error::Result;
use crate::record::MentorRecord;
use crate::resolve::{fetch_rows, ResolutionAttempt, ResolutionResult, Resolver};
use crate::traits::{Query, QueryExecutor};
use std::sync::Arc;
use tracing::{debug, error};

/// Entry point for listing and resolving mentors.
///
/// # Example
///
/// ```rust,ignore
/// use mentor_records::{ClientConfig, MentorClient};
///
/// let client = MentorClient::new(executor, ClientConfig::default())?;
///
/// // Listing never fails; an outage shows up as an empty list
/// let mentors = client.fetch_all_mentors().await;
///
/// // Detail: Ok(None) is "not found", Err is "broken"
/// match client.resolve_mentor_detail(Some("m-42"), "Asha Rao").await? {
///     Some(mentor) => render(mentor),
///     None => show_not_found(),
/// }
/// ```
pub struct MentorClient {
    executor: Arc<dyn QueryExecutor>,
    config: Arc<ClientConfig>,
    resolver: Resolver,
}

impl MentorClient {
    /// Create a client over an executor, validating the config first
    pub fn new(executor: Arc<dyn QueryExecutor>, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let resolver = Resolver::new(executor.clone(), config.clone());

        Ok(Self {
            executor,
            config,
            resolver,
        })
    }

    /// Client over the hosted REST endpoint
    #[cfg(feature = "rest")]
    pub fn rest(rest: crate::rest::RestConfig, config: ClientConfig) -> Result<Self> {
        let executor = crate::rest::RestExecutor::new(rest)?;
        Self::new(Arc::new(executor), config)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// All mentors, or an empty list if the backend cannot be read
    pub async fn fetch_all_mentors(&self) -> Vec<MentorRecord> {
        match self.try_fetch_all_mentors().await {
            Ok(mentors) => mentors,
            Err(e) => {
                error!(
                    table = %self.config.table,
                    error = %e,
                    "Failed to fetch mentors, returning empty list"
                );
                Vec::new()
            }
        }
    }

    /// All mentors, surfacing transport and decode failures
    pub async fn try_fetch_all_mentors(&self) -> Result<Vec<MentorRecord>> {
        let query = Query::select(&self.config.table, &self.config.columns)
            .with_order(self.config.listing_order.clone())
            .with_limit(self.config.listing_limit);

        let rows = fetch_rows(self.executor.as_ref(), &query).await?;
        debug!(table = %self.config.table, rows = rows.len(), "Fetched mentor rows");

        Ok(self
            .config
            .schema
            .assemble_all(&rows, &self.config.currency_prefix))
    }

    /// Resolve one mentor from an optional id and a display name
    pub async fn resolve_mentor_detail(
        &self,
        id: Option<&str>,
        name: &str,
    ) -> Result<Option<MentorRecord>> {
        Ok(self.resolver.resolve(id, name).await?.map(|r| r.record))
    }

    /// Like [`resolve_mentor_detail`](Self::resolve_mentor_detail), also
    /// reporting which strategy matched
    pub async fn resolve_with_source(
        &self,
        id: Option<&str>,
        name: &str,
    ) -> Result<Option<ResolutionResult>> {
        self.resolver.resolve(id, name).await
    }

    /// Start a resolution attempt that runs the chain at most once
    pub fn begin_resolution(&self, id: Option<&str>, name: &str) -> ResolutionAttempt {
        ResolutionAttempt::new(id.map(str::to_string), name)
    }

    /// Drive an attempt with this client's resolver
    pub async fn run_attempt(
        &self,
        attempt: &mut ResolutionAttempt,
    ) -> Result<Option<MentorRecord>> {
        attempt.run(&self.resolver).await
    }
}
