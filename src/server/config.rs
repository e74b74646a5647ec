use crate::server::error::{config::ConfigError, AppError};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Runtime configuration loaded from the environment.
///
/// Only `DATABASE_URL` is required. Every optional integration (Redis counters, Telegram
/// file host, error notifications) degrades gracefully when its variable is absent.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,

    /// Redis connection string for the rate-limit counters.
    pub redis_url: Option<String>,

    /// Telegram bot token used for the file host, error notifications and init data validation.
    pub bot_token: Option<String>,
    /// Chat receiving error notifications.
    pub notify_chat_id: Option<String>,
    pub telegram_api_url: String,

    /// Whether the photo endpoint counts towards the per-client rate limit.
    pub rate_limit_photos: bool,
    /// Reverse proxies appending to `X-Forwarded-For`; unset uses the first entry.
    pub trusted_proxy_hops: Option<usize>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    ///
    /// # Arguments
    /// - `lookup` - Returns the raw value of a variable by name
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and parseable
    /// - `Err(AppError::ConfigErr)` - A required variable is missing or a value is invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL")
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let port = match var("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidEnvVar("PORT".to_string(), raw))?,
            None => DEFAULT_PORT,
        };

        let rate_limit_photos = match var("RATE_LIMIT_PHOTOS") {
            Some(raw) => parse_bool(&raw)
                .ok_or_else(|| ConfigError::InvalidEnvVar("RATE_LIMIT_PHOTOS".to_string(), raw))?,
            None => true,
        };

        let trusted_proxy_hops = match var("TRUSTED_PROXY_HOPS") {
            Some(raw) => Some(
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidEnvVar("TRUSTED_PROXY_HOPS".to_string(), raw))?,
            ),
            None => None,
        };

        Ok(Self {
            database_url,
            port,
            redis_url: var("REDIS_URL"),
            bot_token: var("BOT_TOKEN"),
            notify_chat_id: var("NOTIFY_CHAT_ID"),
            telegram_api_url: var("TELEGRAM_API_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string()),
            rate_limit_photos,
            trusted_proxy_hops,
        })
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
