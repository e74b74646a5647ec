//! Ad data repository for database operations.
//!
//! This module provides the `AdRepository` for reading listings. Every query converts rows
//! through `Ad::from_entity`, so returned ads always carry their effective status for the
//! supplied read instant.

use chrono::{DateTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Select,
};

use crate::server::{
    data::lower_eq,
    model::ad::{Ad, AdStatus, ListAdsFilter, OwnerKey},
};

/// Repository providing read operations over listings.
pub struct AdRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdRepository<'a> {
    /// Creates a new AdRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `AdRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds every effectively active ad matching the filter.
    ///
    /// Ordered by premium flag descending, then last update descending.
    ///
    /// # Arguments
    /// - `filter` - Normalized category, mode and tag filter
    /// - `now` - Read instant; only ads expiring after it are returned
    ///
    /// # Returns
    /// - `Ok(Vec<Ad>)` - Matching ads, possibly empty
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_active(
        &self,
        filter: &ListAdsFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Ad>, DbErr> {
        let entities = Self::active_query(filter, now)
            .order_by_desc(entity::ad::Column::IsPremium)
            .order_by_desc(entity::ad::Column::UpdatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| Ad::from_entity(entity, now))
            .collect())
    }

    /// Finds the premium subset of `find_active`, ordered by last update descending only.
    ///
    /// # Arguments
    /// - `filter` - Normalized category, mode and tag filter
    /// - `now` - Read instant; only ads expiring after it are returned
    ///
    /// # Returns
    /// - `Ok(Vec<Ad>)` - Matching premium ads, possibly empty
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_premium_active(
        &self,
        filter: &ListAdsFilter,
        now: DateTime<Utc>,
    ) -> Result<Vec<Ad>, DbErr> {
        let entities = Self::active_query(filter, now)
            .filter(entity::ad::Column::IsPremium.eq(true))
            .order_by_desc(entity::ad::Column::UpdatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| Ad::from_entity(entity, now))
            .collect())
    }

    /// Finds all ads of an owner regardless of status.
    ///
    /// Matches the client identity string and, when present, the numeric owner identity.
    /// Ads matching either are returned once.
    ///
    /// # Arguments
    /// - `key` - Owner key derived from the caller-supplied value
    /// - `now` - Read instant used to derive statuses
    ///
    /// # Returns
    /// - `Ok(Vec<Ad>)` - Owner's ads ordered by last update descending
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_owner(
        &self,
        key: &OwnerKey,
        now: DateTime<Utc>,
    ) -> Result<Vec<Ad>, DbErr> {
        let condition = Condition::any()
            .add(entity::ad::Column::ClientId.eq(key.client_id.as_str()))
            .add_option(key.user_id.map(|id| entity::ad::Column::UserId.eq(id)));

        let entities = entity::prelude::Ad::find()
            .filter(condition)
            .order_by_desc(entity::ad::Column::UpdatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| Ad::from_entity(entity, now))
            .collect())
    }

    /// Finds all ads published under a username, compared case-insensitively.
    ///
    /// # Arguments
    /// - `username` - Already normalized username (no `@`, trimmed)
    /// - `now` - Read instant used to derive statuses
    ///
    /// # Returns
    /// - `Ok(Vec<Ad>)` - The user's ads ordered by last update descending
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_username(
        &self,
        username: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<Ad>, DbErr> {
        let entities = entity::prelude::Ad::find()
            .filter(
                lower_eq((entity::ad::Entity, entity::ad::Column::Username), username),
            )
            .order_by_desc(entity::ad::Column::UpdatedAt)
            .all(self.db)
            .await?;

        Ok(entities
            .into_iter()
            .map(|entity| Ad::from_entity(entity, now))
            .collect())
    }

    /// Finds a single ad by id.
    ///
    /// # Returns
    /// - `Ok(Some(Ad))` - Ad found
    /// - `Ok(None)` - No ad with that id
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_by_id(&self, id: i32, now: DateTime<Utc>) -> Result<Option<Ad>, DbErr> {
        let entity = entity::prelude::Ad::find_by_id(id).one(self.db).await?;

        Ok(entity.map(|entity| Ad::from_entity(entity, now)))
    }

    /// Counts every stored ad.
    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::Ad::find().count(self.db).await
    }

    /// Counts effectively active ads, optionally only premium ones.
    ///
    /// # Arguments
    /// - `premium_only` - Restrict the count to premium ads
    /// - `now` - Read instant used for the expiration check
    pub async fn count_active(&self, premium_only: bool, now: DateTime<Utc>) -> Result<u64, DbErr> {
        let mut query = Self::active_query(&ListAdsFilter::default(), now);
        if premium_only {
            query = query.filter(entity::ad::Column::IsPremium.eq(true));
        }

        query.count(self.db).await
    }

    /// Base selection shared by both listing queries.
    fn active_query(filter: &ListAdsFilter, now: DateTime<Utc>) -> Select<entity::ad::Entity> {
        let mut query = entity::prelude::Ad::find()
            .filter(entity::ad::Column::Status.eq(AdStatus::Active.as_str()))
            .filter(entity::ad::Column::ExpiresAt.gt(now));

        if let Some(category) = &filter.category {
            query = query.filter(entity::ad::Column::Category.eq(category.as_str()));
        }
        if let Some(mode) = &filter.mode {
            query = query.filter(entity::ad::Column::Mode.eq(mode.as_str()));
        }
        if let Some(tag) = &filter.tag {
            query = query.filter(entity::ad::Column::Tag.eq(tag.as_str()));
        }

        query
    }
}
