//! HTTP query executor for PostgREST-style backends
//!
//! Maps a [`Query`] onto `GET {base}/rest/v1/{table}` with `select`,
//! `{column}=eq.{value}`, `order` and `limit` parameters. The response body
//! is handed back untouched as [`RawPayload::Bytes`]; decoding happens in the
//! payload unwrapper. No retries.

use crate::error::{MentorError, Result};
use crate::payload::RawPayload;
use crate::traits::{Query, QueryExecutor, QueryResponse};
use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::debug;

/// Connection settings for [`RestExecutor`]
#[derive(Debug, Clone)]
pub struct RestConfig {
    /// Project base URL (without the `/rest/v1` suffix)
    pub base_url: String,
    /// Anon or service key sent as `apikey` and bearer token
    pub api_key: Option<String>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:54321".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Query executor over HTTP
pub struct RestExecutor {
    config: RestConfig,
    client: Client,
}

impl RestExecutor {
    pub fn new(config: RestConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        if let Some(ref api_key) = config.api_key {
            let invalid = |e: header::InvalidHeaderValue| {
                MentorError::Config(format!("invalid API key: {}", e))
            };
            headers.insert("apikey", header::HeaderValue::from_str(api_key).map_err(invalid)?);
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", api_key)).map_err(invalid)?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MentorError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Full request URL for `query`
    pub fn query_url(&self, query: &Query) -> String {
        let mut url = format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(&query.table)
        );

        let mut params = vec![format!("select={}", urlencoding::encode(&query.columns))];
        for filter in &query.filters {
            params.push(format!(
                "{}=eq.{}",
                urlencoding::encode(&filter.column),
                urlencoding::encode(&filter.equals)
            ));
        }
        if let Some(ref order) = query.order {
            params.push(format!(
                "order={}.{}",
                urlencoding::encode(&order.column),
                order.direction.as_str()
            ));
        }
        if let Some(limit) = query.limit {
            params.push(format!("limit={}", limit));
        }

        url.push('?');
        url.push_str(&params.join("&"));
        url
    }
}

#[async_trait]
impl QueryExecutor for RestExecutor {
    async fn execute(&self, query: &Query) -> Result<QueryResponse> {
        let url = self.query_url(query);
        debug!(table = %query.table, filters = query.filters.len(), "Executing REST query");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MentorError::Transport(format!(
                "HTTP {} - {}",
                status.as_u16(),
                body
            )));
        }

        let body = response.bytes().await?;
        Ok(QueryResponse::ok(RawPayload::Bytes(body.to_vec())))
    }
}
