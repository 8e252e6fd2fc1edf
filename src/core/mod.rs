// Core algorithm exports
pub mod distance;
pub mod engine;
pub mod filters;
pub mod ranker;
pub mod store;

pub use distance::{calculate_bounding_box, haversine_distance};
pub use engine::{MatchEngine, MatchError};
pub use filters::passes_hard_filters;
pub use ranker::{rank, CandidateRanker, DEFAULT_LIMIT};
pub use store::{InterestStore, NotificationSink, ProfileStore, StoreError, SubscriptionGate};
