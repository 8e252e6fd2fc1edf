use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strength of a one-directional expression of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strength {
    Like,
    SuperLike,
}

/// State of an interest edge between two users.
///
/// `Match` is terminal; a record never leaves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "interest_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InterestKind {
    Like,
    SuperLike,
    Match,
}

impl From<Strength> for InterestKind {
    fn from(value: Strength) -> Self {
        match value {
            Strength::Like => InterestKind::Like,
            Strength::SuperLike => InterestKind::SuperLike,
        }
    }
}

/// A directed interest edge recorded between two users.
///
/// At most one record exists per unordered user pair; the storage layer
/// enforces this with a uniqueness constraint on the pair key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interest {
    pub id: Uuid,
    pub actor: Uuid,
    pub target: Uuid,
    pub kind: InterestKind,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Successful result of expressing interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    /// A new pending edge was created with the given strength.
    Created(Strength),
    /// The reverse edge already existed and was promoted to a mutual match.
    Matched,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Gender filter applied during candidate discovery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "gender_preference", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    All,
    Male,
    Female,
    Other,
}

impl GenderPreference {
    pub fn accepts(&self, gender: Gender) -> bool {
        match self {
            GenderPreference::All => true,
            GenderPreference::Male => gender == Gender::Male,
            GenderPreference::Female => gender == Gender::Female,
            GenderPreference::Other => gender == Gender::Other,
        }
    }
}

/// Geographic coordinates in degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Discovery preferences attached to a profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "minAge")]
    pub min_age: u8,
    #[serde(rename = "maxAge")]
    pub max_age: u8,
    #[serde(rename = "maxDistanceKm")]
    pub max_distance_km: u16,
    #[serde(rename = "genderPreference")]
    pub gender_preference: GenderPreference,
}

/// User profile with demographic, interest, and location data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    pub preferences: Preferences,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Ranked discovery candidate, derived fresh per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedCandidate {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    pub age: u8,
    pub gender: Gender,
    pub bio: Option<String>,
    pub photos: Vec<String>,
    pub interests: Vec<String>,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    #[serde(rename = "commonInterests")]
    pub common_interests: usize,
}

/// A mutual match resolved to the other party's public identity.
///
/// `created_at` is the timestamp of the original pending edge; promotion
/// keeps it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedPeer {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    pub name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Like,
    Match,
}

/// Persisted notification produced from a domain event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: Uuid,
    pub kind: NotificationKind,
    #[serde(rename = "relatedUser")]
    pub related_user: Uuid,
    pub message: String,
    pub read: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Geospatial bounding box used to pre-filter nearby profiles.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}
