// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BoundingBox, Gender, GenderPreference, GeoPoint, Interest, InterestKind, MatchOutcome,
    MatchedPeer, Notification, NotificationKind, Preferences, Profile, RankedCandidate, Strength,
};
pub use requests::{
    DiscoverRequest, ExpressInterestRequest, MatchesQuery, NearbyQuery, NotificationsQuery,
};
pub use responses::{
    DiscoverResponse, ErrorResponse, HealthResponse, InterestResponse, MatchesResponse,
    NotificationsResponse,
};
