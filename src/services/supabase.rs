use super::{ensure_valid, ProfileStore, StoreError};
use crate::models::{Availability, Profile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Supabase (PostgREST) profile store
///
/// Talks to `{base_url}/rest/v1/{table}` using the project API key. The
/// table layout matches the `profiles` migration.
pub struct SupabaseProfileStore {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

/// Row shape written to the `profiles` table
#[derive(Debug, Serialize)]
struct ProfileRow<'a> {
    id: &'a str,
    name: &'a str,
    pin_code: &'a str,
    sports: Vec<&'a str>,
    skill_level: &'a str,
    availability: &'a Availability,
    is_available: bool,
    updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Profile> for ProfileRow<'a> {
    fn from(profile: &'a Profile) -> Self {
        Self {
            id: &profile.id,
            name: &profile.name,
            pin_code: &profile.location_code,
            sports: profile.sports.iter().map(String::as_str).collect(),
            skill_level: profile.skill_level.as_str(),
            availability: &profile.availability,
            is_available: profile.is_available,
            updated_at: Utc::now(),
        }
    }
}

impl SupabaseProfileStore {
    /// Create a new Supabase client
    pub fn new(
        base_url: String,
        api_key: String,
        table: String,
        timeout: Duration,
    ) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            table,
            client,
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), self.table)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Accept", "application/json")
    }

    async fn send(&self, builder: RequestBuilder, action: &str) -> Result<Vec<Profile>, StoreError> {
        let response = self.authorize(builder).send().await?;
        let rows = Self::rows(response, action).await?;

        rows.into_iter().map(decode_profile).collect()
    }

    async fn rows(response: Response, action: &str) -> Result<Vec<Value>, StoreError> {
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Supabase request to {} failed: {} - {}", action, status, body);
            return Err(StoreError::Api(format!("Failed to {}: {}", action, status)));
        }

        let json: Value = response.json().await?;

        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(StoreError::InvalidResponse("Expected a JSON array of rows".into())),
        }
    }
}

/// Decode one PostgREST row; invariant violations become `InvalidProfile`
fn decode_profile(row: Value) -> Result<Profile, StoreError> {
    let id = row
        .get("id")
        .and_then(Value::as_str)
        .unwrap_or("<unknown>")
        .to_string();

    let profile: Profile = serde_json::from_value(row).map_err(|e| StoreError::InvalidProfile {
        id,
        reason: e.to_string(),
    })?;

    ensure_valid(&profile)?;
    Ok(profile)
}

#[async_trait]
impl ProfileStore for SupabaseProfileStore {
    async fn get_profile(&self, id: &str) -> Result<Profile, StoreError> {
        let url = format!(
            "{}?select=*&id=eq.{}",
            self.table_url(),
            urlencoding::encode(id)
        );

        tracing::debug!("Fetching profile for user: {}", id);

        self.send(self.client.get(&url), "fetch profile")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn list_available_profiles(&self, excluding: &str) -> Result<Vec<Profile>, StoreError> {
        let url = format!(
            "{}?select=*&is_available=eq.true&id=neq.{}&order=created_at.asc,id.asc",
            self.table_url(),
            urlencoding::encode(excluding)
        );

        let profiles = self.send(self.client.get(&url), "list profiles").await?;

        tracing::debug!("Listed {} available profiles (excluding {})", profiles.len(), excluding);

        Ok(profiles)
    }

    async fn upsert_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        ensure_valid(&profile)?;

        let request = self
            .client
            .post(self.table_url())
            .header("Prefer", "resolution=merge-duplicates,return=representation")
            .json(&ProfileRow::from(&profile));

        self.send(request, "upsert profile")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::InvalidResponse("Upsert returned no rows".into()))
    }

    async fn set_availability(&self, id: &str, is_available: bool) -> Result<Profile, StoreError> {
        let url = format!("{}?id=eq.{}", self.table_url(), urlencoding::encode(id));

        let request = self
            .client
            .patch(&url)
            .header("Prefer", "return=representation")
            .json(&serde_json::json!({
                "is_available": is_available,
                "updated_at": chrono::Utc::now(),
            }));

        self.send(request, "update availability")
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn health_check(&self) -> Result<bool, StoreError> {
        let url = format!("{}?select=id&limit=1", self.table_url());
        let response = self.authorize(self.client.get(&url)).send().await?;
        Ok(response.status().is_success())
    }
}
