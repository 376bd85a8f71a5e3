//! Buddy Match - sports buddy matching service
//!
//! This library provides the matching engine that pairs players who want to
//! play the same sport in the same area: a candidate filter, a transparent
//! integer scoring formula, and a stable ranker, plus the profile stores and
//! HTTP routes around them.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use self::core::{filter_candidates, calculate_match_score, MatchError, MatchOutcome, Matcher};
pub use models::{Profile, SkillLevel, MatchResult, ScoredMatch, ScoringWeights, FindMatchesRequest, FindMatchesResponse};
pub use services::{InMemoryProfileStore, ProfileStore, StoreError};
