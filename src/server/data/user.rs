//! User data repository for database operations.
//!
//! This module provides the `UserRepository` for blacklist lookups and user counts.

use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::{
    data::lower_eq,
    model::user::User,
};

/// Repository providing read operations over users and their moderation flag.
pub struct UserRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UserRepository<'a> {
    /// Creates a new UserRepository instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    ///
    /// # Returns
    /// - `UserRepository` - New repository instance
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a flagged user by username, compared case-insensitively.
    ///
    /// # Arguments
    /// - `username` - Already normalized username
    ///
    /// # Returns
    /// - `Ok(Some(User))` - A flagged user with that name exists
    /// - `Ok(None)` - No such user, or the user is not flagged
    /// - `Err(DbErr)` - Database error during query
    pub async fn find_scammer_by_username(&self, username: &str) -> Result<Option<User>, DbErr> {
        let entity = entity::prelude::User::find()
            .filter(entity::user::Column::IsScammer.eq(true))
            .filter(
                lower_eq((entity::user::Entity, entity::user::Column::Username), username),
            )
            .one(self.db)
            .await?;

        Ok(entity.map(User::from_entity))
    }

    /// Gets every flagged user ordered by username ascending.
    ///
    /// # Returns
    /// - `Ok(Vec<User>)` - Flagged users, possibly empty
    /// - `Err(DbErr)` - Database error during query
    pub async fn get_blacklist(&self) -> Result<Vec<User>, DbErr> {
        let entities = entity::prelude::User::find()
            .filter(entity::user::Column::IsScammer.eq(true))
            .order_by_asc(entity::user::Column::Username)
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(User::from_entity).collect())
    }

    /// Counts every stored user.
    pub async fn count_all(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find().count(self.db).await
    }

    /// Counts flagged users.
    pub async fn count_scammers(&self) -> Result<u64, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::IsScammer.eq(true))
            .count(self.db)
            .await
    }
}
