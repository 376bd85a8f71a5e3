use crate::core::{
    error::MatchError,
    filters::filter_candidates,
    scoring::calculate_match_score,
};
use crate::models::{MatchResult, Profile, ScoredMatch, ScoringWeights};
use crate::services::ProfileStore;

/// Owned result of a full `compute_matches` run
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOutcome {
    pub matches: Vec<ScoredMatch>,
    pub total_candidates: usize,
}

/// Main matching orchestrator
///
/// # Pipeline Stages
/// 1. Candidate filter (self, availability, shared sport or location)
/// 2. Scoring
/// 3. Stable ranking by descending score
///
/// Holds only its weights; every call is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Match Ranker: score every candidate and sort by descending score
    ///
    /// Equal scores keep their input order; no secondary key is applied.
    pub fn rank<'a>(&self, requester: &Profile, candidates: &[&'a Profile]) -> Vec<MatchResult<'a>> {
        let mut ranked: Vec<MatchResult<'a>> = candidates
            .iter()
            .map(|&profile| {
                let (score, shared_sports) = calculate_match_score(profile, requester, &self.weights);
                MatchResult {
                    profile,
                    shared_sports,
                    score,
                }
            })
            .collect();

        // slice::sort_by is stable
        ranked.sort_by(|a, b| b.score.cmp(&a.score));

        ranked
    }

    /// Filter then rank an already fetched pool
    pub fn find_matches<'a>(
        &self,
        requester: &Profile,
        pool: &'a [Profile],
    ) -> Result<Vec<MatchResult<'a>>, MatchError> {
        let eligible = filter_candidates(requester, pool)?;
        Ok(self.rank(requester, &eligible))
    }

    /// Fetch requester and pool from the store, then filter and rank
    ///
    /// Store errors are passed through; `NotFound` for the requester is
    /// reported as such and never retried here.
    pub async fn compute_matches(
        &self,
        store: &dyn ProfileStore,
        requester_id: &str,
    ) -> Result<MatchOutcome, MatchError> {
        let requester = store.get_profile(requester_id).await?;
        let pool = store.list_available_profiles(requester_id).await?;

        tracing::debug!("Fetched {} candidates for {}", pool.len(), requester_id);

        let matches: Vec<ScoredMatch> = self
            .find_matches(&requester, &pool)?
            .iter()
            .map(MatchResult::to_scored)
            .collect();

        Ok(MatchOutcome {
            matches,
            total_candidates: pool.len(),
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;
    use crate::services::InMemoryProfileStore;

    fn create_requester() -> Profile {
        Profile::new("me", "Requester", "411001", ["Football", "Tennis"], SkillLevel::Intermediate)
    }

    fn create_pool() -> Vec<Profile> {
        vec![
            Profile::new("d", "D", "411001", ["Badminton"], SkillLevel::Intermediate),
            Profile::new("c", "C", "999999", ["Tennis", "Football"], SkillLevel::Pro),
            Profile::new("b", "B", "560001", ["Basketball"], SkillLevel::Beginner).with_available(false),
            Profile::new("a", "A", "411001", ["Football"], SkillLevel::Intermediate),
            Profile::new("e", "E", "110001", ["Squash"], SkillLevel::Beginner),
        ]
    }

    #[test]
    fn test_find_matches_scenarios() {
        let matcher = Matcher::with_default_weights();
        let requester = create_requester();
        let pool = create_pool();

        let result = matcher.find_matches(&requester, &pool).unwrap();
        let ranked: Vec<(&str, u8)> = result.iter().map(|m| (m.profile.id.as_str(), m.score)).collect();

        assert_eq!(ranked, vec![("a", 70), ("c", 60), ("d", 40)]);
    }

    #[test]
    fn test_rank_is_stable_for_equal_scores() {
        let matcher = Matcher::with_default_weights();
        let requester = create_requester();
        let pool = vec![
            Profile::new("third", "T", "000000", ["Tennis"], SkillLevel::Pro),
            Profile::new("first", "F", "000000", ["Football"], SkillLevel::Pro),
            Profile::new("second", "S", "000000", ["Tennis"], SkillLevel::Beginner),
        ];
        let candidates: Vec<&Profile> = pool.iter().collect();

        let ids: Vec<&str> = matcher
            .rank(&requester, &candidates)
            .iter()
            .map(|m| m.profile.id.as_str())
            .collect();

        assert_eq!(ids, vec!["third", "first", "second"]);
    }

    #[test]
    fn test_rank_empty() {
        let matcher = Matcher::with_default_weights();
        assert!(matcher.rank(&create_requester(), &[]).is_empty());
    }

    #[tokio::test]
    async fn test_compute_matches_from_store() {
        let store = InMemoryProfileStore::from_profiles(
            std::iter::once(create_requester()).chain(create_pool()),
        );
        let matcher = Matcher::with_default_weights();

        let outcome = matcher.compute_matches(&store, "me").await.unwrap();

        assert_eq!(outcome.matches.len(), 3);
        assert_eq!(outcome.matches[0].user_id, "a");
        assert_eq!(outcome.matches[0].shared_sports, vec!["Football"]);
    }

    #[tokio::test]
    async fn test_compute_matches_unknown_requester() {
        let store = InMemoryProfileStore::new();
        let matcher = Matcher::with_default_weights();

        let err = matcher.compute_matches(&store, "ghost").await.unwrap_err();
        assert!(matches!(err, MatchError::NotFound(_)));
        assert!(!err.is_retryable());
    }
}
