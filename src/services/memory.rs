use super::{ensure_valid, ProfileStore, StoreError};
use crate::models::Profile;
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

/// Process-local profile store
///
/// Keeps profiles in insertion order, which is also the order candidates
/// are listed in. Backs local runs, tests and benchmarks.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: RwLock<Vec<Profile>>,
}

impl InMemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a store without validation, e.g. to reproduce corrupted records
    pub fn from_profiles<I>(profiles: I) -> Self
    where
        I: IntoIterator<Item = Profile>,
    {
        Self {
            profiles: RwLock::new(profiles.into_iter().collect()),
        }
    }

    pub async fn len(&self) -> usize {
        self.profiles.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.profiles.read().await.is_empty()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get_profile(&self, id: &str) -> Result<Profile, StoreError> {
        self.profiles
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list_available_profiles(&self, excluding: &str) -> Result<Vec<Profile>, StoreError> {
        let profiles = self
            .profiles
            .read()
            .await
            .iter()
            .filter(|p| p.is_available && p.id != excluding)
            .cloned()
            .collect();

        Ok(profiles)
    }

    async fn upsert_profile(&self, mut profile: Profile) -> Result<Profile, StoreError> {
        ensure_valid(&profile)?;

        let now = Utc::now();
        let mut profiles = self.profiles.write().await;

        match profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => {
                profile.created_at = existing.created_at;
                profile.updated_at = Some(now);
                *existing = profile.clone();
            }
            None => {
                profile.created_at = Some(now);
                profile.updated_at = Some(now);
                profiles.push(profile.clone());
            }
        }

        tracing::debug!("Upserted profile {} ({} stored)", profile.id, profiles.len());

        Ok(profile)
    }

    async fn set_availability(&self, id: &str, is_available: bool) -> Result<Profile, StoreError> {
        let mut profiles = self.profiles.write().await;
        let profile = profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        profile.is_available = is_available;
        profile.updated_at = Some(Utc::now());

        Ok(profile.clone())
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        Ok(true)
    }
}
