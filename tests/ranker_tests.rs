// Integration tests for candidate discovery and ranking

mod common;

use common::{profile, MemoryStore};
use flare_match::core::CandidateRanker;
use flare_match::models::{Gender, GenderPreference};
use flare_match::MatchError;
use std::sync::Arc;
use uuid::Uuid;

fn ranker(store: &Arc<MemoryStore>) -> CandidateRanker<MemoryStore> {
    CandidateRanker::new(Arc::clone(store))
}

#[tokio::test]
async fn test_ranked_discovery_scenario() {
    let store = Arc::new(MemoryStore::default());

    // Seeker at (40.0, -73.0) looking for ages 25-35 within 50km, any gender
    let mut seeker = profile("Seeker", 30, Gender::Male, 40.0, -73.0, &["hiking", "jazz"]);
    seeker.preferences.min_age = 25;
    seeker.preferences.max_age = 35;
    seeker.preferences.max_distance_km = 50;
    seeker.preferences.gender_preference = GenderPreference::All;
    let seeker_id = store.add_profile(seeker);

    // ~10km away, two shared interests
    let p1 = store.add_profile(profile(
        "P1",
        30,
        Gender::Female,
        40.0899,
        -73.0,
        &["hiking", "jazz", "cooking"],
    ));
    // ~5km away, one shared interest
    let p2 = store.add_profile(profile("P2", 30, Gender::Female, 40.045, -73.0, &["jazz"]));
    // ~1km away but outside the age range
    store.add_profile(profile(
        "P3",
        40,
        Gender::Female,
        40.009,
        -73.0,
        &["hiking", "jazz"],
    ));

    let ranked = ranker(&store).rank_candidates(seeker_id, 20).await.unwrap();

    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0].user_id, p1);
    assert_eq!(ranked[0].common_interests, 2);
    assert_eq!(ranked[1].user_id, p2);
    assert_eq!(ranked[1].common_interests, 1);
    assert!(ranked[0].distance_km > ranked[1].distance_km);
}

#[tokio::test]
async fn test_overlap_outranks_distance_then_distance_breaks_ties() {
    let store = Arc::new(MemoryStore::default());

    let seeker_id = store.add_profile(profile(
        "Seeker",
        30,
        Gender::Male,
        40.0,
        -73.0,
        &["hiking", "jazz", "cooking"],
    ));

    // Equidistant east/west pair with different overlap
    let rich = store.add_profile(profile(
        "Rich",
        30,
        Gender::Female,
        40.0,
        -72.9,
        &["hiking", "jazz", "cooking"],
    ));
    let poor = store.add_profile(profile("Poor", 30, Gender::Female, 40.0, -73.1, &["jazz"]));

    // Same single overlap as Poor, but nearer
    let near = store.add_profile(profile("Near", 30, Gender::Female, 40.0, -73.05, &["jazz"]));

    let ranked = ranker(&store).rank_candidates(seeker_id, 20).await.unwrap();

    let order: Vec<Uuid> = ranked.iter().map(|c| c.user_id).collect();
    assert_eq!(order, vec![rich, near, poor]);
}

#[tokio::test]
async fn test_hard_filters_beat_interest_overlap() {
    let store = Arc::new(MemoryStore::default());

    let mut seeker = profile("Seeker", 30, Gender::Male, 40.0, -73.0, &["hiking", "jazz"]);
    seeker.preferences.min_age = 25;
    seeker.preferences.max_age = 35;
    seeker.preferences.gender_preference = GenderPreference::Female;
    let seeker_id = store.add_profile(seeker);

    // Perfect interest overlap, all rejected by a hard filter
    store.add_profile(profile("TooOld", 36, Gender::Female, 40.01, -73.0, &["hiking", "jazz"]));
    store.add_profile(profile("TooYoung", 24, Gender::Female, 40.01, -73.0, &["hiking", "jazz"]));
    store.add_profile(profile("WrongGender", 30, Gender::Male, 40.01, -73.0, &["hiking", "jazz"]));
    // ~100km north, outside the 50km preference
    store.add_profile(profile("TooFar", 30, Gender::Female, 40.9, -73.0, &["hiking", "jazz"]));

    let ranked = ranker(&store).rank_candidates(seeker_id, 20).await.unwrap();

    assert!(ranked.is_empty(), "expected empty result, not an error");
}

#[tokio::test]
async fn test_boundary_ages_are_included() {
    let store = Arc::new(MemoryStore::default());

    let mut seeker = profile("Seeker", 30, Gender::Male, 40.0, -73.0, &[]);
    seeker.preferences.min_age = 25;
    seeker.preferences.max_age = 35;
    let seeker_id = store.add_profile(seeker);

    store.add_profile(profile("Min", 25, Gender::Female, 40.01, -73.0, &[]));
    store.add_profile(profile("Max", 35, Gender::Female, 40.02, -73.0, &[]));

    let ranked = ranker(&store).rank_candidates(seeker_id, 20).await.unwrap();

    assert_eq!(ranked.len(), 2);
}

#[tokio::test]
async fn test_seeker_never_appears_in_own_results() {
    let store = Arc::new(MemoryStore::default());

    let seeker_id = store.add_profile(profile("Seeker", 30, Gender::Male, 40.0, -73.0, &["jazz"]));
    store.add_profile(profile("Other", 30, Gender::Female, 40.01, -73.0, &["jazz"]));

    let ranked = ranker(&store).rank_candidates(seeker_id, 20).await.unwrap();

    assert!(ranked.iter().all(|c| c.user_id != seeker_id));
}

#[tokio::test]
async fn test_limit_truncates_ranked_results() {
    let store = Arc::new(MemoryStore::default());

    let seeker_id = store.add_profile(profile("Seeker", 30, Gender::Male, 40.0, -73.0, &[]));
    for i in 0..30 {
        store.add_profile(profile(
            &format!("C{}", i),
            30,
            Gender::Female,
            40.0 + 0.001 * (i + 1) as f64,
            -73.0,
            &[],
        ));
    }

    let ranked = ranker(&store).rank_candidates(seeker_id, 5).await.unwrap();

    assert_eq!(ranked.len(), 5);
}

#[tokio::test]
async fn test_seeker_without_location_is_rejected() {
    let store = Arc::new(MemoryStore::default());

    let mut seeker = profile("Seeker", 30, Gender::Male, 40.0, -73.0, &[]);
    seeker.location = None;
    let seeker_id = store.add_profile(seeker);

    let err = ranker(&store).rank_candidates(seeker_id, 20).await.unwrap_err();

    assert!(matches!(err, MatchError::LocationRequired));
}

#[tokio::test]
async fn test_unknown_seeker_is_rejected() {
    let store = Arc::new(MemoryStore::default());

    let err = ranker(&store)
        .rank_candidates(Uuid::new_v4(), 20)
        .await
        .unwrap_err();

    assert!(matches!(err, MatchError::ProfileNotFound));
}

#[tokio::test]
async fn test_candidate_payload_carries_public_fields() {
    let store = Arc::new(MemoryStore::default());

    let seeker_id = store.add_profile(profile("Seeker", 30, Gender::Male, 40.0, -73.0, &["jazz"]));

    let mut candidate = profile("Candidate", 29, Gender::Female, 40.01, -73.0, &["jazz", "hiking"]);
    candidate.bio = Some("Hello".to_string());
    candidate.photos = vec!["photo-1".to_string()];
    store.add_profile(candidate);

    let ranked = ranker(&store).rank_candidates(seeker_id, 20).await.unwrap();

    assert_eq!(ranked.len(), 1);
    let top = &ranked[0];
    assert_eq!(top.name, "Candidate");
    assert_eq!(top.age, 29);
    assert_eq!(top.gender, Gender::Female);
    assert_eq!(top.bio.as_deref(), Some("Hello"));
    assert_eq!(top.photos, vec!["photo-1".to_string()]);
    assert_eq!(top.common_interests, 1);
    assert!(top.distance_km > 0.0 && top.distance_km < 2.0);
}
