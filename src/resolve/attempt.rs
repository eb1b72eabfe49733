//! One logical resolution attempt
//!
//! `Unresolved -> Resolved | NotFound | Failed`. The chain runs at most once
//! per attempt; later calls replay the stored outcome without touching the
//! executor. Retrying means starting a new attempt.

use super::{ResolutionResult, Resolver};
use crate::error::{MentorError, Result};
use crate::record::MentorRecord;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum AttemptState {
    Unresolved,
    Resolved(ResolutionResult),
    NotFound,
    Failed(MentorError),
}

#[derive(Debug, Clone)]
pub struct ResolutionAttempt {
    id: Option<String>,
    name: String,
    state: AttemptState,
}

impl ResolutionAttempt {
    pub fn new(id: Option<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            state: AttemptState::Unresolved,
        }
    }

    pub fn state(&self) -> &AttemptState {
        &self.state
    }

    pub fn is_finished(&self) -> bool {
        !matches!(self.state, AttemptState::Unresolved)
    }

    /// The winning resolution, once resolved
    pub fn resolution(&self) -> Option<&ResolutionResult> {
        match &self.state {
            AttemptState::Resolved(result) => Some(result),
            _ => None,
        }
    }

    /// Run the chain if this attempt has not finished, then report the
    /// outcome. Dropping the future before it completes leaves the attempt
    /// `Unresolved`.
    pub async fn run(&mut self, resolver: &Resolver) -> Result<Option<MentorRecord>> {
        if self.is_finished() {
            debug!(name = %self.name, "Attempt already finished, replaying outcome");
        } else {
            self.state = match resolver.resolve(self.id.as_deref(), &self.name).await {
                Ok(Some(result)) => AttemptState::Resolved(result),
                Ok(None) => AttemptState::NotFound,
                Err(e) => AttemptState::Failed(e),
            };
        }

        match &self.state {
            AttemptState::Resolved(result) => Ok(Some(result.record.clone())),
            AttemptState::Failed(e) => Err(e.clone()),
            AttemptState::NotFound | AttemptState::Unresolved => Ok(None),
        }
    }
}
