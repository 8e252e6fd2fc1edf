use crate::core::store::{
    InterestStore, NotificationSink, ProfileStore, StoreError, SubscriptionGate,
};
use crate::models::{InterestKind, MatchOutcome, MatchedPeer, Strength};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

/// Terminal, user-facing failures of the match and ranking operations
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("users are already matched")]
    AlreadyMatched,

    #[error("interest already expressed for this user")]
    DuplicateInterest,

    #[error("superlikes require a premium subscription")]
    PermissionDenied,

    #[error("target user not found")]
    TargetNotFound,

    #[error("profile not found")]
    ProfileNotFound,

    #[error("a location must be set before discovery")]
    LocationRequired,

    #[error("cannot express interest in yourself")]
    SelfInterest,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// The like/match state machine.
///
/// Each operation is a fresh read-decide-write cycle against the store;
/// nothing is cached across requests. The pairwise handshake: the first
/// mover creates a pending edge, and the second mover's action against the
/// same pair collapses it into a mutual match.
pub struct MatchEngine<S, N> {
    store: Arc<S>,
    notifier: Arc<N>,
}

impl<S, N> Clone for MatchEngine<S, N> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            notifier: Arc::clone(&self.notifier),
        }
    }
}

impl<S, N> MatchEngine<S, N>
where
    S: InterestStore + ProfileStore + SubscriptionGate,
    N: NotificationSink,
{
    pub fn new(store: Arc<S>, notifier: Arc<N>) -> Self {
        Self { store, notifier }
    }

    /// Express interest in another user.
    ///
    /// Creates a pending edge when the pair has no record, promotes the
    /// reverse pending edge to a mutual match, and rejects repeats from the
    /// same originator as well as anything against an already-matched pair.
    /// A repeat is rejected regardless of strength; a superlike never
    /// upgrades an earlier like.
    pub async fn express_interest(
        &self,
        actor: Uuid,
        target: Uuid,
        strength: Strength,
    ) -> Result<MatchOutcome, MatchError> {
        if actor == target {
            return Err(MatchError::SelfInterest);
        }

        if strength == Strength::SuperLike && !self.store.is_eligible_for_superlike(actor).await? {
            return Err(MatchError::PermissionDenied);
        }

        if self.store.find_profile(target).await?.is_none() {
            return Err(MatchError::TargetNotFound);
        }

        match self.decide(actor, target, strength).await {
            // A lost race means the pair's record changed between our read
            // and our write; one re-read settles on the definitive outcome.
            Err(MatchError::Store(StoreError::Conflict)) => {
                tracing::debug!(%actor, %target, "write on pair raced, retrying decide step");
                self.decide(actor, target, strength).await
            }
            other => other,
        }
    }

    /// One read-decide-write pass over the pair's record.
    async fn decide(
        &self,
        actor: Uuid,
        target: Uuid,
        strength: Strength,
    ) -> Result<MatchOutcome, MatchError> {
        match self.store.find_interest(actor, target).await? {
            None => {
                let record = self
                    .store
                    .create_interest(actor, target, InterestKind::from(strength))
                    .await?;
                tracing::info!(id = %record.id, %actor, %target, kind = ?record.kind, "interest created");

                self.emit_interest_received(actor, target).await;
                Ok(MatchOutcome::Created(strength))
            }
            Some(existing) if existing.kind == InterestKind::Match => {
                Err(MatchError::AlreadyMatched)
            }
            Some(existing) if existing.actor == actor => Err(MatchError::DuplicateInterest),
            Some(existing) => {
                // The other party already expressed interest in us
                let promoted = self.store.promote_to_match(existing.id).await?;
                tracing::info!(id = %promoted.id, %actor, %target, "match formed");

                self.emit_match_formed(actor, target).await;
                Ok(MatchOutcome::Matched)
            }
        }
    }

    /// All mutual matches of a user, resolved to the other party.
    pub async fn matches_for(&self, user: Uuid) -> Result<Vec<MatchedPeer>, MatchError> {
        let records = self.store.matches_for(user).await?;

        let mut peers = Vec::with_capacity(records.len());
        for record in records {
            let other = if record.actor == user {
                record.target
            } else {
                record.actor
            };

            match self.store.find_profile(other).await? {
                Some(profile) => peers.push(MatchedPeer {
                    user_id: other,
                    name: profile.name,
                    created_at: record.created_at,
                }),
                None => tracing::warn!(%other, "matched profile no longer exists, skipping"),
            }
        }

        Ok(peers)
    }

    async fn emit_interest_received(&self, actor: Uuid, target: Uuid) {
        if let Err(e) = self.notifier.on_interest_received(actor, target).await {
            tracing::warn!(%actor, %target, "failed to emit interest event: {}", e);
        }
    }

    async fn emit_match_formed(&self, a: Uuid, b: Uuid) {
        if let Err(e) = self.notifier.on_match_formed(a, b).await {
            tracing::warn!(user_a = %a, user_b = %b, "failed to emit match event: {}", e);
        }
    }
}
