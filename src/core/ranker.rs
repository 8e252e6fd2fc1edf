use crate::core::distance::haversine_distance;
use crate::core::engine::MatchError;
use crate::core::filters::passes_hard_filters;
use crate::core::store::ProfileStore;
use crate::models::{GeoPoint, Profile, RankedCandidate};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::sync::Arc;
use uuid::Uuid;

/// Default number of candidates returned by a discovery request
pub const DEFAULT_LIMIT: usize = 20;

/// Produces an ordered list of prospective matches for a seeking user.
///
/// Read-only: the storage layer supplies a coarse bounding-box cut around
/// the seeker, and the pipeline applies the hard filters, the exact
/// distance check, and the composite ordering (shared interests first,
/// distance second).
pub struct CandidateRanker<S> {
    store: Arc<S>,
}

impl<S> Clone for CandidateRanker<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> CandidateRanker<S>
where
    S: ProfileStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn rank_candidates(
        &self,
        seeker: Uuid,
        limit: usize,
    ) -> Result<Vec<RankedCandidate>, MatchError> {
        let profile = self
            .store
            .find_profile(seeker)
            .await?
            .ok_or(MatchError::ProfileNotFound)?;

        let origin = profile.location.ok_or(MatchError::LocationRequired)?;

        let candidates = self
            .store
            .query_nearby(
                origin.latitude,
                origin.longitude,
                f64::from(profile.preferences.max_distance_km),
            )
            .await?;

        tracing::debug!(
            seeker = %profile.user_id,
            candidates = candidates.len(),
            "ranking nearby candidates"
        );

        Ok(rank(&profile, &origin, candidates, limit))
    }
}

/// The ranking pipeline over an already-fetched candidate pool.
///
/// Filter stage: hard filters plus the exact Haversine distance cut.
/// Ordering: shared-interest count descending, then distance ascending.
/// Interests intersect as sets with case-sensitive exact matching.
pub fn rank(
    seeker: &Profile,
    origin: &GeoPoint,
    candidates: Vec<Profile>,
    limit: usize,
) -> Vec<RankedCandidate> {
    let seeker_interests: HashSet<&str> = seeker.interests.iter().map(String::as_str).collect();
    let max_distance_km = f64::from(seeker.preferences.max_distance_km);

    let mut ranked: Vec<RankedCandidate> = candidates
        .into_iter()
        .filter_map(|candidate| {
            // Candidates without a location can never satisfy the distance
            // filter
            let position = candidate.location?;

            if !passes_hard_filters(seeker, &candidate) {
                return None;
            }

            let distance_km = haversine_distance(
                origin.latitude,
                origin.longitude,
                position.latitude,
                position.longitude,
            );
            if distance_km > max_distance_km {
                return None;
            }

            let common_interests = candidate
                .interests
                .iter()
                .filter(|interest| seeker_interests.contains(interest.as_str()))
                .collect::<HashSet<_>>()
                .len();

            Some(RankedCandidate {
                user_id: candidate.user_id,
                name: candidate.name,
                age: candidate.age,
                gender: candidate.gender,
                bio: candidate.bio,
                photos: candidate.photos,
                interests: candidate.interests,
                distance_km,
                common_interests,
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.common_interests
            .cmp(&a.common_interests)
            .then_with(|| {
                a.distance_km
                    .partial_cmp(&b.distance_km)
                    .unwrap_or(Ordering::Equal)
            })
    });

    ranked.truncate(limit);
    ranked
}
