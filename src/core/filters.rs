use crate::core::error::MatchError;
use crate::models::Profile;
use validator::Validate;

/// Check whether a single candidate may be shown to the requester
///
/// Eligible iff the candidate is someone else, is available, and shares at
/// least one sport OR the exact location code with the requester.
#[inline]
pub fn is_eligible(candidate: &Profile, requester: &Profile) -> bool {
    // Never match yourself
    if candidate.id == requester.id {
        return false;
    }

    if !candidate.is_available {
        return false;
    }

    let shares_sport = !candidate.sports.is_disjoint(&requester.sports);
    shares_sport || candidate.same_location(requester)
}

/// Candidate Filter: select the eligible subset of `pool`, preserving pool order
///
/// Fails with `InvalidProfile` when the requester itself is not a valid
/// profile (most notably, declares no sports).
pub fn filter_candidates<'a>(
    requester: &Profile,
    pool: &'a [Profile],
) -> Result<Vec<&'a Profile>, MatchError> {
    requester
        .validate()
        .map_err(|e| MatchError::invalid(&requester.id, &e))?;

    let eligible: Vec<&Profile> = pool
        .iter()
        .filter(|candidate| is_eligible(candidate, requester))
        .collect();

    tracing::debug!(
        "Filter kept {} of {} candidates for {}",
        eligible.len(),
        pool.len(),
        requester.id
    );

    Ok(eligible)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SkillLevel;

    fn create_requester() -> Profile {
        Profile::new("me", "Requester", "411001", ["Football", "Tennis"], SkillLevel::Intermediate)
    }

    #[test]
    fn test_shared_sport_is_eligible() {
        let candidate = Profile::new("a", "A", "999999", ["Tennis"], SkillLevel::Pro);
        assert!(is_eligible(&candidate, &create_requester()));
    }

    #[test]
    fn test_shared_location_is_eligible() {
        let candidate = Profile::new("d", "D", "411001", ["Badminton"], SkillLevel::Intermediate);
        assert!(is_eligible(&candidate, &create_requester()));
    }

    #[test]
    fn test_no_overlap_filtered() {
        let candidate = Profile::new("e", "E", "110001", ["Squash"], SkillLevel::Intermediate);
        assert!(!is_eligible(&candidate, &create_requester()));
    }

    #[test]
    fn test_unavailable_filtered() {
        let candidate = Profile::new("b", "B", "411001", ["Football"], SkillLevel::Intermediate)
            .with_available(false);
        assert!(!is_eligible(&candidate, &create_requester()));
    }

    #[test]
    fn test_self_excluded() {
        let requester = create_requester();
        let pool = vec![requester.clone()];

        let result = filter_candidates(&requester, &pool).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_preserves_pool_order() {
        let requester = create_requester();
        let pool = vec![
            Profile::new("z", "Z", "411001", ["Cricket"], SkillLevel::Beginner),
            Profile::new("x", "X", "000000", ["Squash"], SkillLevel::Beginner),
            Profile::new("a", "A", "000000", ["Tennis"], SkillLevel::Beginner),
        ];

        let ids: Vec<&str> = filter_candidates(&requester, &pool)
            .unwrap()
            .iter()
            .map(|p| p.id.as_str())
            .collect();

        assert_eq!(ids, vec!["z", "a"]);
    }

    #[test]
    fn test_requester_without_sports_is_error() {
        let requester = Profile::new("me", "Requester", "411001", Vec::<String>::new(), SkillLevel::Pro);
        let pool = vec![Profile::new("a", "A", "411001", ["Tennis"], SkillLevel::Pro)];

        let err = filter_candidates(&requester, &pool).unwrap_err();
        assert!(matches!(err, MatchError::InvalidProfile { .. }));
    }
}
