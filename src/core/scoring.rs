use crate::models::{Profile, ScoringWeights};
use std::collections::BTreeSet;

/// Calculate a match score (0-100) for a candidate against the requester
///
/// Scoring formula:
/// score = min(max_score,
///     shared_sports * 30 +         # Each sport both declare
///     same_location * 25 +         # Identical location code
///     same_skill * 15              # Identical skill level
/// )
///
/// Returns the score together with the shared sports it was computed from.
pub fn calculate_match_score<'a>(
    candidate: &'a Profile,
    requester: &Profile,
    weights: &ScoringWeights,
) -> (u8, BTreeSet<&'a str>) {
    let shared_sports = candidate.shared_sports(requester);

    let sports_points = sports_score(shared_sports.len(), weights.per_shared_sport);

    let location_points = if candidate.same_location(requester) {
        weights.same_location
    } else {
        0
    };

    let skill_points = if candidate.skill_level == requester.skill_level {
        weights.same_skill
    } else {
        0
    };

    let total = sports_points
        .saturating_add(location_points)
        .saturating_add(skill_points);

    (clamp_score(total, weights.max_score), shared_sports)
}

/// Unbounded by count; the cap is applied on the total
#[inline]
fn sports_score(shared_count: usize, per_sport: u32) -> u32 {
    u32::try_from(shared_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(per_sport)
}

#[inline]
fn clamp_score(total: u32, max_score: u8) -> u8 {
    let cap = max_score.min(100);
    // total <= cap <= 100 after min, so the narrowing cannot truncate
    total.min(u32::from(cap)) as u8
}
