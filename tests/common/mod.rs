// Shared test fixtures: an in-memory store binding the engine's
// collaborator traits, plus notifier doubles.

#![allow(dead_code)]

use chrono::Utc;
use flare_match::core::{
    haversine_distance, InterestStore, NotificationSink, ProfileStore, StoreError,
    SubscriptionGate,
};
use flare_match::models::{
    Gender, GenderPreference, GeoPoint, Interest, InterestKind, Preferences, Profile,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use uuid::Uuid;

/// In-memory store with the same pair-uniqueness and promotion semantics
/// as the PostgreSQL backend. Races can be staged to land between the
/// engine's read and its write.
#[derive(Default)]
pub struct MemoryStore {
    profiles: Mutex<HashMap<Uuid, Profile>>,
    interests: Mutex<Vec<Interest>>,
    premium: Mutex<HashSet<Uuid>>,
    race_on_create: Mutex<Option<(Uuid, Uuid, InterestKind)>>,
    race_on_promote: Mutex<bool>,
}

impl MemoryStore {
    pub fn add_profile(&self, profile: Profile) -> Uuid {
        let id = profile.user_id;
        self.profiles.lock().unwrap().insert(id, profile);
        id
    }

    pub fn grant_premium(&self, user: Uuid) {
        self.premium.lock().unwrap().insert(user);
    }

    /// Stage a concurrent insert that lands just before the engine's next
    /// `create_interest`, which then fails with a conflict.
    pub fn stage_create_race(&self, actor: Uuid, target: Uuid, kind: InterestKind) {
        *self.race_on_create.lock().unwrap() = Some((actor, target, kind));
    }

    /// Make the next `promote_to_match` lose to a concurrent promotion.
    pub fn stage_promote_race(&self) {
        *self.race_on_promote.lock().unwrap() = true;
    }

    /// All interest records between the pair, in either direction.
    pub fn records_between(&self, a: Uuid, b: Uuid) -> Vec<Interest> {
        self.interests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| (r.actor == a && r.target == b) || (r.actor == b && r.target == a))
            .cloned()
            .collect()
    }

    fn insert(&self, actor: Uuid, target: Uuid, kind: InterestKind) -> Interest {
        let record = Interest {
            id: Uuid::new_v4(),
            actor,
            target,
            kind,
            created_at: Utc::now(),
        };
        self.interests.lock().unwrap().push(record.clone());
        record
    }
}

impl InterestStore for MemoryStore {
    async fn find_interest(&self, a: Uuid, b: Uuid) -> Result<Option<Interest>, StoreError> {
        Ok(self
            .interests
            .lock()
            .unwrap()
            .iter()
            .find(|r| (r.actor == a && r.target == b) || (r.actor == b && r.target == a))
            .cloned())
    }

    async fn create_interest(
        &self,
        actor: Uuid,
        target: Uuid,
        kind: InterestKind,
    ) -> Result<Interest, StoreError> {
        if let Some((race_actor, race_target, race_kind)) = self.race_on_create.lock().unwrap().take()
        {
            self.insert(race_actor, race_target, race_kind);
            return Err(StoreError::Conflict);
        }

        let exists = self
            .interests
            .lock()
            .unwrap()
            .iter()
            .any(|r| (r.actor == actor && r.target == target) || (r.actor == target && r.target == actor));
        if exists {
            return Err(StoreError::Conflict);
        }

        Ok(self.insert(actor, target, kind))
    }

    async fn promote_to_match(&self, id: Uuid) -> Result<Interest, StoreError> {
        let lost_race = std::mem::take(&mut *self.race_on_promote.lock().unwrap());

        let mut interests = self.interests.lock().unwrap();
        let record = interests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::Conflict)?;

        if lost_race {
            record.kind = InterestKind::Match;
            return Err(StoreError::Conflict);
        }

        if record.kind == InterestKind::Match {
            return Err(StoreError::Conflict);
        }

        record.kind = InterestKind::Match;
        Ok(record.clone())
    }

    async fn matches_for(&self, user: Uuid) -> Result<Vec<Interest>, StoreError> {
        let mut records: Vec<Interest> = self
            .interests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.kind == InterestKind::Match && (r.actor == user || r.target == user))
            .cloned()
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

impl ProfileStore for MemoryStore {
    async fn find_profile(&self, user: Uuid) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.lock().unwrap().get(&user).cloned())
    }

    async fn query_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<Profile>, StoreError> {
        Ok(self
            .profiles
            .lock()
            .unwrap()
            .values()
            .filter(|p| {
                p.location.is_some_and(|loc| {
                    haversine_distance(latitude, longitude, loc.latitude, loc.longitude)
                        <= radius_km
                })
            })
            .cloned()
            .collect())
    }
}

impl SubscriptionGate for MemoryStore {
    async fn is_eligible_for_superlike(&self, user: Uuid) -> Result<bool, StoreError> {
        Ok(self.premium.lock().unwrap().contains(&user))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyEvent {
    Interest { actor: Uuid, target: Uuid },
    Match { a: Uuid, b: Uuid },
}

/// Notifier that records every emitted domain event.
#[derive(Default)]
pub struct RecordingNotifier {
    pub events: Mutex<Vec<NotifyEvent>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<NotifyEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl NotificationSink for RecordingNotifier {
    async fn on_interest_received(&self, actor: Uuid, target: Uuid) -> Result<(), StoreError> {
        self.events
            .lock()
            .unwrap()
            .push(NotifyEvent::Interest { actor, target });
        Ok(())
    }

    async fn on_match_formed(&self, a: Uuid, b: Uuid) -> Result<(), StoreError> {
        self.events.lock().unwrap().push(NotifyEvent::Match { a, b });
        Ok(())
    }
}

/// Notifier whose delivery always fails.
pub struct FailingNotifier;

impl NotificationSink for FailingNotifier {
    async fn on_interest_received(&self, _actor: Uuid, _target: Uuid) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }

    async fn on_match_formed(&self, _a: Uuid, _b: Uuid) -> Result<(), StoreError> {
        Err(StoreError::Database(sqlx::Error::PoolClosed))
    }
}

pub fn profile(
    name: &str,
    age: u8,
    gender: Gender,
    lat: f64,
    lon: f64,
    interests: &[&str],
) -> Profile {
    Profile {
        user_id: Uuid::new_v4(),
        name: name.to_string(),
        age,
        gender,
        bio: None,
        photos: vec![],
        interests: interests.iter().map(|s| s.to_string()).collect(),
        location: Some(GeoPoint {
            latitude: lat,
            longitude: lon,
        }),
        preferences: Preferences {
            min_age: 18,
            max_age: 99,
            max_distance_km: 50,
            gender_preference: GenderPreference::All,
        },
        created_at: Some(Utc::now()),
    }
}
