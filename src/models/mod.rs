// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Availability, DayOfWeek, MatchResult, MatchTier, Profile, ScoredMatch, ScoringWeights, SkillLevel};
pub use requests::{FindMatchesRequest, SetAvailabilityRequest, UpsertProfileRequest};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, ProfileResponse};
