use super::{ensure_valid, ProfileStore, StoreError};
use crate::models::{Availability, Profile, SkillLevel};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::types::Json;
use sqlx::{PgPool, Row};
use std::time::Duration;

const PROFILE_COLUMNS: &str =
    "id, name, pin_code, sports, skill_level, availability, is_available, created_at, updated_at";

/// PostgreSQL-backed profile store
///
/// Owns the `profiles` table. Rows are validated on the way out so a
/// corrupted record surfaces as `InvalidProfile` instead of a bad score.
pub struct PostgresProfileStore {
    pool: PgPool,
}

impl PostgresProfileStore {
    /// Create a new store from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new store from optional settings
    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
        acquire_timeout_secs: Option<u64>,
        idle_timeout_secs: Option<u64>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
            Duration::from_secs(acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Wrap an existing pool (migrations are the caller's concern)
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Decode a `profiles` row, rejecting undefined skill levels and
/// profiles that fail validation
fn profile_from_row(row: &PgRow) -> Result<Profile, StoreError> {
    let id: String = row.try_get("id")?;
    let raw_skill: String = row.try_get("skill_level")?;

    let skill_level: SkillLevel = raw_skill
        .parse()
        .map_err(|reason| StoreError::InvalidProfile { id: id.clone(), reason })?;

    let sports: Vec<String> = row.try_get("sports")?;
    let availability: Option<Json<Availability>> = row.try_get("availability")?;

    let profile = Profile {
        id,
        name: row.try_get("name")?,
        location_code: row.try_get("pin_code")?,
        sports: sports.into_iter().collect(),
        skill_level,
        is_available: row.try_get("is_available")?,
        availability: availability.map(|a| a.0).unwrap_or_default(),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    };

    ensure_valid(&profile)?;
    Ok(profile)
}

#[async_trait]
impl ProfileStore for PostgresProfileStore {
    async fn get_profile(&self, id: &str) -> Result<Profile, StoreError> {
        let query = format!("SELECT {} FROM profiles WHERE id = $1", PROFILE_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        profile_from_row(&row)
    }

    async fn list_available_profiles(&self, excluding: &str) -> Result<Vec<Profile>, StoreError> {
        let query = format!(
            r#"
            SELECT {}
            FROM profiles
            WHERE is_available = TRUE AND id <> $1
            ORDER BY created_at ASC, id ASC
            "#,
            PROFILE_COLUMNS
        );

        let rows = sqlx::query(&query).bind(excluding).fetch_all(&self.pool).await?;

        let profiles = rows
            .iter()
            .map(profile_from_row)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!("Listed {} available profiles (excluding {})", profiles.len(), excluding);

        Ok(profiles)
    }

    /// Uses INSERT ... ON CONFLICT so re-registering replaces the profile
    /// while keeping its original created_at.
    async fn upsert_profile(&self, profile: Profile) -> Result<Profile, StoreError> {
        ensure_valid(&profile)?;

        let query = format!(
            r#"
            INSERT INTO profiles (id, name, pin_code, sports, skill_level, availability, is_available, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, NOW(), NOW())
            ON CONFLICT (id)
            DO UPDATE SET
                name = EXCLUDED.name,
                pin_code = EXCLUDED.pin_code,
                sports = EXCLUDED.sports,
                skill_level = EXCLUDED.skill_level,
                availability = EXCLUDED.availability,
                is_available = EXCLUDED.is_available,
                updated_at = NOW()
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        );

        let sports: Vec<String> = profile.sports.iter().cloned().collect();

        let row = sqlx::query(&query)
            .bind(&profile.id)
            .bind(&profile.name)
            .bind(&profile.location_code)
            .bind(&sports)
            .bind(profile.skill_level.as_str())
            .bind(Json(&profile.availability))
            .bind(profile.is_available)
            .fetch_one(&self.pool)
            .await?;

        tracing::debug!("Upserted profile {}", profile.id);

        profile_from_row(&row)
    }

    async fn set_availability(&self, id: &str, is_available: bool) -> Result<Profile, StoreError> {
        let query = format!(
            "UPDATE profiles SET is_available = $2, updated_at = NOW() WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        );

        let row = sqlx::query(&query)
            .bind(id)
            .bind(is_available)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;

        profile_from_row(&row)
    }

    /// Health check for the database connection
    async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}
