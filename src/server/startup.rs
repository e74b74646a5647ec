use std::{sync::Arc, time::Duration};

use deadpool_redis::{redis::cmd, Pool, Runtime};

use crate::server::{
    config::Config,
    data::counter::RedisCounterStore,
    error::AppError,
    middleware::auth::InitDataValidator,
    report::{ErrorReporter, LogReporter, TelegramReporter},
    service::{
        file_host::{FileHost, TelegramFileHost},
        rate_limit::{CounterStore, RateLimiter},
    },
};

/// Timeout of the startup Redis ping.
const REDIS_PING_TIMEOUT: Duration = Duration::from_secs(5);

/// Timeout of every outbound HTTP call (file host and error notifications).
const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Connects to the database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then runs
/// all pending SeaORM migrations so the schema is up-to-date before any handler runs.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the rate limiter over Redis, if Redis is configured and reachable.
///
/// A missing `REDIS_URL`, an invalid URL or a failed ping all yield a limiter without a
/// store, which admits every request.
///
/// # Arguments
/// - `config` - Application configuration containing the Redis URL and photo toggle
///
/// # Returns
/// - `RateLimiter` - Limiter backed by Redis, or one that admits everything
pub async fn setup_rate_limiter(config: &Config) -> RateLimiter {
    let Some(redis_url) = config.redis_url.as_deref() else {
        tracing::warn!("REDIS_URL not set, rate limiting disabled");
        return RateLimiter::new(None, config.rate_limit_photos);
    };

    let limiter = |store: Option<Arc<dyn CounterStore>>| {
        RateLimiter::new(store, config.rate_limit_photos)
            .with_trusted_proxy_hops(config.trusted_proxy_hops)
    };

    match connect_to_redis(redis_url).await {
        Ok(pool) => {
            tracing::info!("Connected to Redis, rate limiting enabled");
            let store: Arc<dyn CounterStore> = Arc::new(RedisCounterStore::new(pool));
            limiter(Some(store))
        }
        Err(e) => {
            tracing::warn!("Redis unavailable, rate limiting disabled: {}", e);
            limiter(None)
        }
    }
}

async fn connect_to_redis(redis_url: &str) -> Result<Pool, AppError> {
    let pool = deadpool_redis::Config::from_url(redis_url)
        .create_pool(Some(Runtime::Tokio1))
        .map_err(|e| AppError::InternalError(format!("failed to create Redis pool: {}", e)))?;

    let ping = async {
        let mut conn = pool
            .get()
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;
        let pong: String = cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| AppError::InternalError(e.to_string()))?;

        Ok::<_, AppError>(pong)
    };

    match tokio::time::timeout(REDIS_PING_TIMEOUT, ping).await {
        Ok(Ok(_)) => Ok(pool),
        Ok(Err(e)) => Err(e),
        Err(_) => Err(AppError::InternalError(
            "Redis ping timed out".to_string(),
        )),
    }
}

/// Creates the shared HTTP client.
///
/// Redirects are disabled and every call is bounded by a 30 second timeout.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError)` - Client could not be built
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::ClientBuilder::new()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Creates the Telegram file host, if a bot token is configured.
pub fn setup_file_host(config: &Config, http_client: &reqwest::Client) -> Option<Arc<dyn FileHost>> {
    let Some(bot_token) = config.bot_token.clone() else {
        tracing::warn!("BOT_TOKEN not set, ad photos will not be served");
        return None;
    };

    Some(Arc::new(TelegramFileHost::new(
        http_client.clone(),
        config.telegram_api_url.clone(),
        bot_token,
    )))
}

/// Creates the init data validator, if a bot token is configured.
///
/// # Returns
/// - `Ok(Some(validator))` - `/api` routes require signed init data
/// - `Ok(None)` - No bot token, authentication disabled
/// - `Err(AppError)` - Secret derivation failed
pub fn setup_auth(config: &Config) -> Result<Option<Arc<InitDataValidator>>, AppError> {
    let Some(bot_token) = config.bot_token.as_deref() else {
        tracing::warn!("BOT_TOKEN not set, mini-app authentication disabled");
        return Ok(None);
    };

    Ok(Some(Arc::new(InitDataValidator::new(bot_token)?)))
}

/// Creates the error reporter.
///
/// Posts to Telegram when both a bot token and a notification chat are configured, and
/// only logs otherwise.
pub fn setup_reporter(config: &Config, http_client: &reqwest::Client) -> Arc<dyn ErrorReporter> {
    match (config.bot_token.as_deref(), config.notify_chat_id.clone()) {
        (Some(bot_token), Some(chat_id)) => Arc::new(TelegramReporter::new(
            http_client.clone(),
            &config.telegram_api_url,
            bot_token,
            chat_id,
        )),
        _ => {
            tracing::info!("NOTIFY_CHAT_ID not set, errors will only be logged");
            Arc::new(LogReporter)
        }
    }
}
