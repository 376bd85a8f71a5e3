// Service exports
pub mod memory;
pub mod postgres;
pub mod supabase;

pub use memory::InMemoryProfileStore;
pub use postgres::PostgresProfileStore;
pub use supabase::SupabaseProfileStore;

use crate::models::Profile;
use async_trait::async_trait;
use thiserror::Error;
use validator::Validate;

/// Errors that can occur when talking to a profile store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid profile {id}: {reason}")]
    InvalidProfile { id: String, reason: String },

    #[error("SQLx error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

impl StoreError {
    /// Transport-level failures the caller may retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreError::Database(_) | StoreError::Request(_) | StoreError::Api(_)
        )
    }
}

/// Persistence collaborator the matching engine reads from
///
/// Implementations must return `list_available_profiles` in a stable order
/// so repeated match requests over unchanged data are identical.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Fetch one profile by id
    async fn get_profile(&self, id: &str) -> Result<Profile, StoreError>;

    /// All profiles with `is_available == true`, minus `excluding`
    async fn list_available_profiles(&self, excluding: &str) -> Result<Vec<Profile>, StoreError>;

    /// Insert or replace a profile after validating it
    async fn upsert_profile(&self, profile: Profile) -> Result<Profile, StoreError>;

    /// Toggle whether a profile is offered as a match candidate
    async fn set_availability(&self, id: &str, is_available: bool) -> Result<Profile, StoreError>;

    async fn health_check(&self) -> Result<bool, StoreError>;
}

/// Reject invalid profiles at the store boundary
pub(crate) fn ensure_valid(profile: &Profile) -> Result<(), StoreError> {
    profile.validate().map_err(|e| StoreError::InvalidProfile {
        id: profile.id.clone(),
        reason: e.to_string(),
    })
}
