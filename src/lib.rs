//! Mentor Records - schema-tolerant normalization and detail resolution
//!
//! Turns loosely-typed, shape-varying backend responses into a stable
//! [`MentorRecord`], and resolves a single detailed record when the caller
//! only has a possibly-stale id and a display name.
//!
//! # Architecture
//!
//! ```text
//! QueryExecutor → unwrap_rows → rows ─┬→ RecordSchema::assemble → Vec<MentorRecord>  (listing)
//!                                     └→ Resolver strategy chain → assemble → record (detail)
//! ```
//!
//! The engine never owns a transport. Callers inject a [`QueryExecutor`]
//! (the bundled [`rest::RestExecutor`] or their own), which keeps the
//! resolution logic testable against canned payloads.
//!
//! # Example
//!
//! ```rust,ignore
//! use mentor_records::{ClientConfig, MentorClient, RestConfig};
//!
//! let client = MentorClient::rest(
//!     RestConfig {
//!         base_url: "https://project.example.co".into(),
//!         api_key: Some(anon_key),
//!         ..Default::default()
//!     },
//!     ClientConfig::default(),
//! )?;
//!
//! let mentors = client.fetch_all_mentors().await;
//! let detail = client.resolve_mentor_detail(None, "Asha Rao").await?;
//! ```

// Collaborator traits (query executor boundary)
pub mod traits;

// Raw payload unwrapping
pub mod payload;

// Field lookup and coercion
pub mod normalize;

// Canonical entity and row assembly
pub mod record;

// Cascading detail resolution
pub mod resolve;

// Listing + detail entry point
pub mod client;

// Configuration
pub mod config;

// Error types
pub mod error;

// HTTP executor
#[cfg(feature = "rest")]
pub mod rest;

pub use client::MentorClient;
pub use config::ClientConfig;
pub use error::{MentorError, Result};
pub use payload::{unwrap_rows, RawPayload, Row};
pub use record::{MentorRecord, RecordSchema};
pub use resolve::{
    AttemptState, LookupContext, LookupStrategy, ResolutionAttempt, ResolutionResult, Resolver,
};
pub use traits::{Direction, OrderBy, Query, QueryExecutor, QueryResponse};

#[cfg(feature = "rest")]
pub use rest::{RestConfig, RestExecutor};
