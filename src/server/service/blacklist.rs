use std::time::Instant;

use sea_orm::DatabaseConnection;

use crate::server::{
    data::user::UserRepository,
    error::AppError,
    metrics::Metrics,
    model::user::{ScammerCheck, User},
    util::username::normalize_username,
};

/// Service answering blacklist questions about usernames.
pub struct BlacklistService<'a> {
    db: &'a DatabaseConnection,
    metrics: &'a Metrics,
}

impl<'a> BlacklistService<'a> {
    /// Creates a new BlacklistService instance.
    ///
    /// # Arguments
    /// - `db` - Reference to the database connection
    /// - `metrics` - Metrics receiving query durations
    pub fn new(db: &'a DatabaseConnection, metrics: &'a Metrics) -> Self {
        Self { db, metrics }
    }

    /// Checks whether a username belongs to a flagged user.
    ///
    /// # Arguments
    /// - `raw_username` - Username from the request path, `@` prefix and case ignored
    ///
    /// # Returns
    /// - `Ok(ScammerCheck)` - `Flagged` if a flagged user matches, `Safe` otherwise
    /// - `Err(AppError::BadRequest)` - Username empty after normalization
    /// - `Err(AppError::DbErr)` - Database error during lookup
    pub async fn check(&self, raw_username: &str) -> Result<ScammerCheck, AppError> {
        let Some(username) = normalize_username(raw_username) else {
            return Err(AppError::BadRequest("username is required".to_string()));
        };

        let started = Instant::now();
        let scammer = UserRepository::new(self.db)
            .find_scammer_by_username(&username)
            .await;
        self.metrics.observe_query("select", started.elapsed());

        match scammer? {
            Some(_) => Ok(ScammerCheck::Flagged),
            None => Ok(ScammerCheck::Safe),
        }
    }

    /// Gets every flagged user ordered by username.
    pub async fn get_blacklist(&self) -> Result<Vec<User>, AppError> {
        let started = Instant::now();
        let users = UserRepository::new(self.db).get_blacklist().await;
        self.metrics.observe_query("select", started.elapsed());

        Ok(users?)
    }
}
