//! Ad factory for creating test listing entities.
//!
//! Defaults produce an effectively active, non-premium ad expiring a week from now. Builder
//! methods override any field, including timestamps, so ordering and expiration scenarios can
//! be set up deterministically.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Duration, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test ads with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// let ad = AdFactory::new(&db)
///     .category("services")
///     .premium(true)
///     .updated_at(Utc::now() - Duration::hours(1))
///     .build()
///     .await?;
/// ```
pub struct AdFactory<'a> {
    db: &'a DatabaseConnection,
    user_id: i64,
    client_id: String,
    username: String,
    title: String,
    description: String,
    category: String,
    mode: String,
    tag: String,
    photo_path: Option<String>,
    photo_id: Option<String>,
    is_premium: bool,
    status: String,
    expires_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl<'a> AdFactory<'a> {
    /// Creates a new AdFactory with default values.
    ///
    /// Defaults:
    /// - user_id: auto-incremented, client_id: the same value as a string
    /// - username: `"seller_{id}"`, title: `"Ad {id}"`
    /// - category: `"services"`, mode: `"general"`, tag: `""`
    /// - no photo references
    /// - is_premium: `false`, status: `"active"`
    /// - expires_at: 7 days from now, created_at / updated_at: now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `AdFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        let now = Utc::now();
        Self {
            db,
            user_id: id as i64,
            client_id: id.to_string(),
            username: format!("seller_{}", id),
            title: format!("Ad {}", id),
            description: "Test ad description".to_string(),
            category: "services".to_string(),
            mode: "general".to_string(),
            tag: String::new(),
            photo_path: None,
            photo_id: None,
            is_premium: false,
            status: "active".to_string(),
            expires_at: now + Duration::days(7),
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the numeric owner identity.
    pub fn user_id(mut self, user_id: i64) -> Self {
        self.user_id = user_id;
        self
    }

    /// Sets the client identity string.
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = client_id.into();
        self
    }

    /// Sets the seller username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Sets the mode.
    pub fn mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = mode.into();
        self
    }

    /// Sets the tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    /// Sets the direct photo path reference.
    pub fn photo_path(mut self, photo_path: Option<String>) -> Self {
        self.photo_path = photo_path;
        self
    }

    /// Sets the opaque photo file handle.
    pub fn photo_id(mut self, photo_id: Option<String>) -> Self {
        self.photo_id = photo_id;
        self
    }

    /// Sets the premium flag.
    pub fn premium(mut self, is_premium: bool) -> Self {
        self.is_premium = is_premium;
        self
    }

    /// Sets the stored status column (`active`, `expired`, `removed`, ...).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the expiration timestamp.
    pub fn expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = expires_at;
        self
    }

    /// Sets the creation timestamp.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Sets the last-update timestamp.
    pub fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = updated_at;
        self
    }

    /// Builds and inserts the ad entity into the database.
    ///
    /// # Returns
    /// - `Ok(entity::ad::Model)` - Created ad entity
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::ad::Model, DbErr> {
        entity::ad::ActiveModel {
            id: ActiveValue::NotSet,
            user_id: ActiveValue::Set(self.user_id),
            client_id: ActiveValue::Set(self.client_id),
            username: ActiveValue::Set(self.username),
            title: ActiveValue::Set(self.title),
            description: ActiveValue::Set(self.description),
            category: ActiveValue::Set(self.category),
            mode: ActiveValue::Set(self.mode),
            tag: ActiveValue::Set(self.tag),
            photo_path: ActiveValue::Set(self.photo_path),
            photo_id: ActiveValue::Set(self.photo_id),
            is_premium: ActiveValue::Set(self.is_premium),
            status: ActiveValue::Set(self.status),
            expires_at: ActiveValue::Set(self.expires_at),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.updated_at),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an ad with default values.
///
/// Shorthand for `AdFactory::new(db).build().await`.
///
/// # Example
///
/// ```rust,ignore
/// let ad = create_ad(&db).await?;
/// ```
pub async fn create_ad(db: &DatabaseConnection) -> Result<entity::ad::Model, DbErr> {
    AdFactory::new(db).build().await
}
