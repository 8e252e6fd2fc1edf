//! Collaborator traits consumed by the match engine and candidate ranker.
//!
//! Production binds these to PostgreSQL; tests bind them to an in-memory
//! store. The engine never talks to a concrete backend directly.

#![allow(async_fn_in_trait)]

use crate::models::{Interest, InterestKind, Profile};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a storage backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// A concurrent write touched the same unordered user pair. The engine
    /// retries its decide step once on this signal.
    #[error("conflicting write on the same user pair")]
    Conflict,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Persistence of interest edges.
///
/// The backend must guarantee at most one record per unordered user pair:
/// `create_interest` fails with [`StoreError::Conflict`] when any record
/// already exists between the pair, and `promote_to_match` fails with
/// [`StoreError::Conflict`] when the record is already terminal.
pub trait InterestStore {
    /// Look up the interest record between two users, in either direction.
    async fn find_interest(&self, a: Uuid, b: Uuid) -> Result<Option<Interest>, StoreError>;

    /// Atomically insert a new pending edge.
    async fn create_interest(
        &self,
        actor: Uuid,
        target: Uuid,
        kind: InterestKind,
    ) -> Result<Interest, StoreError>;

    /// Atomically flip a pending edge to `Match`, keeping its `created_at`.
    async fn promote_to_match(&self, id: Uuid) -> Result<Interest, StoreError>;

    /// All `Match` records involving the user, newest first.
    async fn matches_for(&self, user: Uuid) -> Result<Vec<Interest>, StoreError>;
}

/// Read access to user profiles.
pub trait ProfileStore {
    async fn find_profile(&self, user: Uuid) -> Result<Option<Profile>, StoreError>;

    /// Profiles within a coarse bounding box around the given point. Callers
    /// re-check the exact distance; results may overshoot the radius.
    async fn query_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<Profile>, StoreError>;
}

/// Subscription tier check for superlike eligibility.
pub trait SubscriptionGate {
    async fn is_eligible_for_superlike(&self, user: Uuid) -> Result<bool, StoreError>;
}

/// Consumer of domain events raised by the match engine.
///
/// Fire-and-forget: the engine logs failures and never rolls back state on
/// a sink error.
pub trait NotificationSink {
    async fn on_interest_received(&self, actor: Uuid, target: Uuid) -> Result<(), StoreError>;

    async fn on_match_formed(&self, a: Uuid, b: Uuid) -> Result<(), StoreError>;
}
