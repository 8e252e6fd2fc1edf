use crate::core::distance::calculate_bounding_box;
use crate::core::store::{
    InterestStore, NotificationSink, ProfileStore, StoreError, SubscriptionGate,
};
use crate::models::{
    GeoPoint, Interest, InterestKind, Notification, NotificationKind, Preferences, Profile,
};
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::time::Duration;
use uuid::Uuid;

/// PostgreSQL-backed store for profiles, interest edges, subscriptions,
/// and notifications.
///
/// The unordered-pair invariant on interest edges is enforced by a unique
/// index over `(LEAST(actor_id, target_id), GREATEST(actor_id, target_id))`;
/// violations surface as [`StoreError::Conflict`] for the engine to retry.
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Connect and run pending migrations.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");

        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }

    /// Notifications for a user, newest first
    pub async fn notifications_for(&self, user: Uuid) -> Result<Vec<Notification>, StoreError> {
        let query = r#"
            SELECT id, recipient_id, kind, related_user_id, message, read, created_at
            FROM notifications
            WHERE recipient_id = $1
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(user).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(notification_from_row).collect())
    }

    /// Mark a notification as read; returns false when it does not belong
    /// to the user or does not exist
    pub async fn mark_notification_read(&self, id: Uuid, user: Uuid) -> Result<bool, StoreError> {
        let query = r#"
            UPDATE notifications
            SET read = TRUE
            WHERE id = $1 AND recipient_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(user)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Delete a notification; returns false when it does not belong to the
    /// user or does not exist
    pub async fn delete_notification(&self, id: Uuid, user: Uuid) -> Result<bool, StoreError> {
        let query = r#"
            DELETE FROM notifications
            WHERE id = $1 AND recipient_id = $2
        "#;

        let result = sqlx::query(query)
            .bind(id)
            .bind(user)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn insert_notification(
        &self,
        recipient: Uuid,
        kind: NotificationKind,
        related_user: Uuid,
        message: &str,
    ) -> Result<(), StoreError> {
        let query = r#"
            INSERT INTO notifications (id, recipient_id, kind, related_user_id, message)
            VALUES ($1, $2, $3, $4, $5)
        "#;

        sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(recipient)
            .bind(kind)
            .bind(related_user)
            .bind(message)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

impl InterestStore for PostgresStore {
    async fn find_interest(&self, a: Uuid, b: Uuid) -> Result<Option<Interest>, StoreError> {
        let query = r#"
            SELECT id, actor_id, target_id, kind, created_at
            FROM interests
            WHERE (actor_id = $1 AND target_id = $2)
               OR (actor_id = $2 AND target_id = $1)
        "#;

        let row = sqlx::query(query)
            .bind(a)
            .bind(b)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(interest_from_row))
    }

    async fn create_interest(
        &self,
        actor: Uuid,
        target: Uuid,
        kind: InterestKind,
    ) -> Result<Interest, StoreError> {
        let query = r#"
            INSERT INTO interests (id, actor_id, target_id, kind)
            VALUES ($1, $2, $3, $4)
            RETURNING id, actor_id, target_id, kind, created_at
        "#;

        let row = sqlx::query(query)
            .bind(Uuid::new_v4())
            .bind(actor)
            .bind(target)
            .bind(kind)
            .fetch_one(&self.pool)
            .await
            .map_err(conflict_or_database)?;

        Ok(interest_from_row(&row))
    }

    async fn promote_to_match(&self, id: Uuid) -> Result<Interest, StoreError> {
        // Conditional update: zero rows affected means another writer got
        // there first (or the record was never pending)
        let query = r#"
            UPDATE interests
            SET kind = 'match'
            WHERE id = $1 AND kind <> 'match'
            RETURNING id, actor_id, target_id, kind, created_at
        "#;

        let row = sqlx::query(query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        match row {
            Some(row) => Ok(interest_from_row(&row)),
            None => Err(StoreError::Conflict),
        }
    }

    async fn matches_for(&self, user: Uuid) -> Result<Vec<Interest>, StoreError> {
        let query = r#"
            SELECT id, actor_id, target_id, kind, created_at
            FROM interests
            WHERE kind = 'match' AND (actor_id = $1 OR target_id = $1)
            ORDER BY created_at DESC
        "#;

        let rows = sqlx::query(query).bind(user).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(interest_from_row).collect())
    }
}

impl ProfileStore for PostgresStore {
    async fn find_profile(&self, user: Uuid) -> Result<Option<Profile>, StoreError> {
        let query = r#"
            SELECT user_id, name, age, gender, bio, photos, interests,
                   latitude, longitude, min_age, max_age, max_distance_km,
                   gender_preference, created_at
            FROM profiles
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(profile_from_row))
    }

    async fn query_nearby(
        &self,
        latitude: f64,
        longitude: f64,
        radius_km: f64,
    ) -> Result<Vec<Profile>, StoreError> {
        let bbox = calculate_bounding_box(latitude, longitude, radius_km);

        let query = r#"
            SELECT user_id, name, age, gender, bio, photos, interests,
                   latitude, longitude, min_age, max_age, max_distance_km,
                   gender_preference, created_at
            FROM profiles
            WHERE latitude BETWEEN $1 AND $2
              AND longitude BETWEEN $3 AND $4
        "#;

        let rows = sqlx::query(query)
            .bind(bbox.min_lat)
            .bind(bbox.max_lat)
            .bind(bbox.min_lon)
            .bind(bbox.max_lon)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!(
            candidates = rows.len(),
            radius_km,
            "bounding-box query returned"
        );

        Ok(rows.iter().map(profile_from_row).collect())
    }
}

impl SubscriptionGate for PostgresStore {
    async fn is_eligible_for_superlike(&self, user: Uuid) -> Result<bool, StoreError> {
        let query = r#"
            SELECT tier, expires_at
            FROM subscriptions
            WHERE user_id = $1
        "#;

        let row = sqlx::query(query)
            .bind(user)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Ok(false);
        };

        let tier: String = row.get("tier");
        if tier == "free" {
            return Ok(false);
        }

        let expires_at: Option<chrono::DateTime<chrono::Utc>> = row.get("expires_at");
        Ok(expires_at.map_or(true, |t| t > chrono::Utc::now()))
    }
}

impl NotificationSink for PostgresStore {
    async fn on_interest_received(&self, actor: Uuid, target: Uuid) -> Result<(), StoreError> {
        self.insert_notification(
            target,
            NotificationKind::Like,
            actor,
            "Someone liked your profile",
        )
        .await
    }

    async fn on_match_formed(&self, a: Uuid, b: Uuid) -> Result<(), StoreError> {
        self.insert_notification(a, NotificationKind::Match, b, "It's a match!")
            .await?;
        self.insert_notification(b, NotificationKind::Match, a, "It's a match!")
            .await
    }
}

/// Map unique-index violations on the pair key to the conflict signal the
/// engine retries on.
fn conflict_or_database(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => StoreError::Conflict,
        _ => StoreError::Database(err),
    }
}

fn interest_from_row(row: &PgRow) -> Interest {
    Interest {
        id: row.get("id"),
        actor: row.get("actor_id"),
        target: row.get("target_id"),
        kind: row.get("kind"),
        created_at: row.get("created_at"),
    }
}

fn profile_from_row(row: &PgRow) -> Profile {
    let latitude: Option<f64> = row.get("latitude");
    let longitude: Option<f64> = row.get("longitude");
    let location = match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Some(GeoPoint {
            latitude,
            longitude,
        }),
        _ => None,
    };

    Profile {
        user_id: row.get("user_id"),
        name: row.get("name"),
        age: row.get::<i16, _>("age") as u8,
        gender: row.get("gender"),
        bio: row.get("bio"),
        photos: row.get("photos"),
        interests: row.get("interests"),
        location,
        preferences: Preferences {
            min_age: row.get::<i16, _>("min_age") as u8,
            max_age: row.get::<i16, _>("max_age") as u8,
            max_distance_km: row.get::<i16, _>("max_distance_km") as u16,
            gender_preference: row.get("gender_preference"),
        },
        created_at: row.get("created_at"),
    }
}

fn notification_from_row(row: &PgRow) -> Notification {
    Notification {
        id: row.get("id"),
        recipient: row.get("recipient_id"),
        kind: row.get("kind"),
        related_user: row.get("related_user_id"),
        message: row.get("message"),
        read: row.get("read"),
        created_at: row.get("created_at"),
    }
}
