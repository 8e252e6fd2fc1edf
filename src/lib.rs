//! Flare Match - match engine and candidate ranking service for the Flare
//! dating app
//!
//! This library owns the like/match state machine and the proximity plus
//! shared-interest candidate ranking used for discovery. Persistence,
//! subscription checks, and notification delivery are collaborators behind
//! traits.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    distance::{calculate_bounding_box, haversine_distance},
    rank, CandidateRanker, MatchEngine, MatchError,
};
pub use crate::models::{
    Interest, InterestKind, MatchOutcome, MatchedPeer, Profile, RankedCandidate, Strength,
};
