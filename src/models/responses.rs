use crate::models::domain::{MatchedPeer, Notification, RankedCandidate};
use serde::{Deserialize, Serialize};

/// Response for the like/superlike endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestResponse {
    pub matched: bool,
    pub message: String,
}

/// Response for the matches listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesResponse {
    pub matches: Vec<MatchedPeer>,
    pub total: usize,
}

/// Response for the discovery endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoverResponse {
    pub candidates: Vec<RankedCandidate>,
    pub total: usize,
}

/// Response for the notifications listing endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsResponse {
    pub notifications: Vec<Notification>,
    pub total: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
