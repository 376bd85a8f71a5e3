// Integration tests for Buddy Match

use buddy_match::core::{MatchError, Matcher};
use buddy_match::models::{MatchTier, Profile, SkillLevel};
use buddy_match::services::{InMemoryProfileStore, ProfileStore};
use std::collections::HashMap;

fn create_requester() -> Profile {
    Profile::new("me", "Priya", "411001", ["Football", "Tennis"], SkillLevel::Intermediate)
}

/// The concrete scenarios: A, B (unavailable), C, D (location only), E (no overlap)
fn create_scenario_pool() -> Vec<Profile> {
    vec![
        Profile::new("e", "Eshan", "110001", ["Squash"], SkillLevel::Pro),
        Profile::new("d", "Divya", "411001", ["Badminton"], SkillLevel::Intermediate),
        Profile::new("b", "Bala", "560001", ["Basketball"], SkillLevel::Beginner).with_available(false),
        Profile::new("c", "Chirag", "999999", ["Tennis", "Football"], SkillLevel::Pro),
        Profile::new("a", "Anil", "411001", ["Football"], SkillLevel::Intermediate),
    ]
}

fn create_store(pool: Vec<Profile>) -> InMemoryProfileStore {
    InMemoryProfileStore::from_profiles(std::iter::once(create_requester()).chain(pool))
}

#[tokio::test]
async fn test_integration_end_to_end_matching() {
    let store = create_store(create_scenario_pool());
    let matcher = Matcher::with_default_weights();

    let outcome = matcher.compute_matches(&store, "me").await.unwrap();

    let ranked: Vec<(&str, u8)> = outcome
        .matches
        .iter()
        .map(|m| (m.user_id.as_str(), m.match_score))
        .collect();
    assert_eq!(ranked, vec![("a", 70), ("c", 60), ("d", 40)]);

    // Store already drops the requester and unavailable profiles
    assert_eq!(outcome.total_candidates, 4);

    assert_eq!(outcome.matches[0].tier, MatchTier::Strong);
    assert_eq!(outcome.matches[1].tier, MatchTier::Good);
    assert_eq!(outcome.matches[2].tier, MatchTier::Fair);
    assert_eq!(outcome.matches[1].shared_sports, vec!["Football", "Tennis"]);
    assert_eq!(outcome.matches[1].suggested_sport.as_deref(), Some("Football, Tennis"));
    assert_eq!(outcome.matches[2].suggested_sport.as_deref(), Some("Badminton"));
}

#[tokio::test]
async fn test_empty_pool_returns_no_matches() {
    let store = create_store(vec![]);
    let matcher = Matcher::with_default_weights();

    let outcome = matcher.compute_matches(&store, "me").await.unwrap();

    assert!(outcome.matches.is_empty());
    assert_eq!(outcome.total_candidates, 0);
}

#[tokio::test]
async fn test_output_invariants_over_generated_pool() {
    let sports = ["Football", "Tennis", "Cricket", "Squash", "Badminton", "Volleyball"];
    let locations = ["411001", "411002", "560001"];
    let levels = [SkillLevel::Beginner, SkillLevel::Intermediate, SkillLevel::Pro];

    let pool: Vec<Profile> = (0..120)
        .map(|i| {
            let picked: Vec<&str> = sports
                .iter()
                .enumerate()
                .filter(|(j, _)| (i >> j) & 1 == 1 || *j == i % sports.len())
                .map(|(_, s)| *s)
                .collect();
            Profile::new(
                format!("p{}", i),
                format!("Player {}", i),
                locations[i % locations.len()],
                picked,
                levels[i % levels.len()],
            )
            .with_available(i % 5 != 0)
        })
        .collect();

    let availability: HashMap<String, bool> = pool.iter().map(|p| (p.id.clone(), p.is_available)).collect();
    let requester = create_requester();
    let store = create_store(pool.clone());
    let matcher = Matcher::with_default_weights();

    let outcome = matcher.compute_matches(&store, "me").await.unwrap();
    assert!(!outcome.matches.is_empty());

    let pool_position: HashMap<&str, usize> = pool.iter().enumerate().map(|(i, p)| (p.id.as_str(), i)).collect();

    for m in &outcome.matches {
        // Exclusion
        assert_ne!(m.user_id, requester.id);
        // Unavailable exclusion
        assert!(availability[&m.user_id], "unavailable profile {} returned", m.user_id);
        // Eligibility
        assert!(
            !m.shared_sports.is_empty() || m.location_code == requester.location_code,
            "{} has neither shared sport nor location",
            m.user_id
        );
        // Score bound
        assert!(m.match_score <= 100);
    }

    // Descending, and stable among equal scores
    for pair in outcome.matches.windows(2) {
        assert!(pair[0].match_score >= pair[1].match_score);
        if pair[0].match_score == pair[1].match_score {
            assert!(pool_position[pair[0].user_id.as_str()] < pool_position[pair[1].user_id.as_str()]);
        }
    }
}

#[tokio::test]
async fn test_compute_matches_is_idempotent() {
    let store = create_store(create_scenario_pool());
    let matcher = Matcher::with_default_weights();

    let first = matcher.compute_matches(&store, "me").await.unwrap();
    let second = matcher.compute_matches(&store, "me").await.unwrap();

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_refresh_sees_store_changes() {
    let store = create_store(create_scenario_pool());
    let matcher = Matcher::with_default_weights();

    store.set_availability("a", false).await.unwrap();
    store
        .upsert_profile(Profile::new("f", "Farah", "411001", ["Tennis", "Football"], SkillLevel::Intermediate))
        .await
        .unwrap();

    let outcome = matcher.compute_matches(&store, "me").await.unwrap();
    let ids: Vec<&str> = outcome.matches.iter().map(|m| m.user_id.as_str()).collect();

    assert_eq!(ids, vec!["f", "c", "d"]);
    assert_eq!(outcome.matches[0].match_score, 100);
}

#[tokio::test]
async fn test_unknown_requester_is_not_found() {
    let store = create_store(create_scenario_pool());
    let matcher = Matcher::with_default_weights();

    let err = matcher.compute_matches(&store, "nobody").await.unwrap_err();

    assert!(matches!(err, MatchError::NotFound(ref id) if id == "nobody"));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_corrupted_requester_is_invalid_profile() {
    // Seeded directly, bypassing upsert validation
    let store = InMemoryProfileStore::from_profiles(vec![
        Profile::new("me", "Priya", "411001", Vec::<String>::new(), SkillLevel::Beginner),
        Profile::new("a", "Anil", "411001", ["Football"], SkillLevel::Intermediate),
    ]);
    let matcher = Matcher::with_default_weights();

    let err = matcher.compute_matches(&store, "me").await.unwrap_err();

    assert!(matches!(err, MatchError::InvalidProfile { .. }));
    assert!(!err.is_retryable());
}
