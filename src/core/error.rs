use crate::services::StoreError;
use thiserror::Error;
use validator::ValidationErrors;

/// Errors surfaced by the matching engine
#[derive(Debug, Error)]
pub enum MatchError {
    /// Requester id does not resolve to a profile; not retryable
    #[error("Profile not found: {0}")]
    NotFound(String),

    /// A profile violates a data-model invariant (no sports, blank fields, ...)
    #[error("Invalid profile {id}: {reason}")]
    InvalidProfile { id: String, reason: String },

    /// Store failure passed through unchanged
    #[error("Profile store error: {0}")]
    Store(#[source] StoreError),
}

impl MatchError {
    pub fn invalid(id: impl Into<String>, errors: &ValidationErrors) -> Self {
        MatchError::InvalidProfile {
            id: id.into(),
            reason: errors.to_string(),
        }
    }

    /// Whether the caller may usefully offer a retry
    pub fn is_retryable(&self) -> bool {
        match self {
            MatchError::Store(e) => e.is_transient(),
            _ => false,
        }
    }
}

impl From<StoreError> for MatchError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => MatchError::NotFound(id),
            StoreError::InvalidProfile { id, reason } => MatchError::InvalidProfile { id, reason },
            other => MatchError::Store(other),
        }
    }
}
