use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Request to express interest in another user (like or superlike)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpressInterestRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[serde(alias = "target_user_id", rename = "targetUserId")]
    pub target_user_id: Uuid,
}

/// Request to discover ranked candidates
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DiscoverRequest {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    crate::core::ranker::DEFAULT_LIMIT as u16
}

/// Query for the mutual matches of a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchesQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
}

/// Query for raw nearby profiles
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbyQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
    #[validate(range(min = 1.0, max = 500.0))]
    #[serde(alias = "radius_km", rename = "radiusKm")]
    pub radius_km: Option<f64>,
}

/// Query scoping a notification operation to its owner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsQuery {
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: Uuid,
}
