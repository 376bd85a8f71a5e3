// Core algorithm exports
pub mod error;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use error::MatchError;
pub use filters::{filter_candidates, is_eligible};
pub use matcher::{Matcher, MatchOutcome};
pub use scoring::calculate_match_score;
