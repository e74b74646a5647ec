//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through Axum's
//! state extraction. Every collaborator is injected here explicitly, so tests can swap the
//! counter store, file host and error reporter for fakes.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::{
    metrics::Metrics,
    middleware::auth::InitDataValidator,
    report::ErrorReporter,
    service::{file_host::FileHost, rate_limit::RateLimiter},
};

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone:
/// - `DatabaseConnection` is a connection pool (clones share the pool)
/// - `RateLimiter` holds its counter store behind an `Arc`
/// - Every other collaborator is reference-counted
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool, used read-only by every handler.
    pub db: DatabaseConnection,

    /// Fixed-window limiter in front of the read endpoints.
    pub rate_limiter: RateLimiter,

    /// External file host for ad photos, `None` when no bot token is configured.
    pub file_host: Option<Arc<dyn FileHost>>,

    /// Mini-app init data validator, `None` disables authentication.
    pub auth: Option<Arc<InitDataValidator>>,

    pub metrics: Arc<Metrics>,

    /// Destination of captured 5xx failures.
    pub reporter: Arc<dyn ErrorReporter>,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `rate_limiter` - Limiter over the shared counter store
    /// - `file_host` - File host client for the photo proxy
    /// - `auth` - Init data validator for `/api` routes
    /// - `metrics` - Prometheus metrics registry
    /// - `reporter` - Error reporter for server-side failures
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(
        db: DatabaseConnection,
        rate_limiter: RateLimiter,
        file_host: Option<Arc<dyn FileHost>>,
        auth: Option<Arc<InitDataValidator>>,
        metrics: Arc<Metrics>,
        reporter: Arc<dyn ErrorReporter>,
    ) -> Self {
        Self {
            db,
            rate_limiter,
            file_host,
            auth,
            metrics,
            reporter,
        }
    }
}
