use crate::models::domain::{Availability, Profile, SkillLevel};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

/// Request to find matches
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FindMatchesRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
}

/// Create or replace a profile
///
/// The id comes from the path (`PUT`) or is generated (`POST`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertProfileRequest {
    pub name: String,
    #[serde(alias = "pin_code", rename = "locationCode")]
    pub location_code: String,
    pub sports: BTreeSet<String>,
    #[serde(alias = "skill_level", rename = "skillLevel")]
    pub skill_level: SkillLevel,
    #[serde(default)]
    pub availability: Availability,
    #[serde(alias = "is_available", rename = "isAvailable", default = "default_true")]
    pub is_available: bool,
}

impl UpsertProfileRequest {
    pub fn into_profile(self, id: String) -> Profile {
        Profile {
            id,
            name: self.name.trim().to_string(),
            location_code: self.location_code.trim().to_string(),
            sports: self.sports,
            skill_level: self.skill_level,
            is_available: self.is_available,
            availability: self.availability,
            created_at: None,
            updated_at: None,
        }
    }
}

fn default_true() -> bool { true }

/// Toggle whether a profile is offered as a candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetAvailabilityRequest {
    #[serde(alias = "is_available", rename = "isAvailable")]
    pub is_available: bool,
}
