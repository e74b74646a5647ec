//! Redis-backed counter store for the rate limiter.

use async_trait::async_trait;
use deadpool_redis::{redis::cmd, Pool};

use crate::server::{error::counter::CounterError, service::rate_limit::CounterStore};

/// Prefix of every rate-limit key, followed by the client identity.
const KEY_PREFIX: &str = "ratelimit:";

/// Counter store issuing `INCR`/`EXPIRE`/`TTL` against a pooled Redis connection.
#[derive(Clone)]
pub struct RedisCounterStore {
    pool: Pool,
}

impl RedisCounterStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    fn key(client: &str) -> String {
        format!("{}{}", KEY_PREFIX, client)
    }
}

#[async_trait]
impl CounterStore for RedisCounterStore {
    async fn incr(&self, client: &str) -> Result<i64, CounterError> {
        let mut conn = self.pool.get().await?;
        let count: i64 = cmd("INCR")
            .arg(Self::key(client))
            .query_async(&mut conn)
            .await?;

        Ok(count)
    }

    async fn expire(&self, client: &str, seconds: u64) -> Result<(), CounterError> {
        let mut conn = self.pool.get().await?;
        let _: i64 = cmd("EXPIRE")
            .arg(Self::key(client))
            .arg(seconds)
            .query_async(&mut conn)
            .await?;

        Ok(())
    }

    async fn ttl(&self, client: &str) -> Result<Option<u64>, CounterError> {
        let mut conn = self.pool.get().await?;
        let ttl: i64 = cmd("TTL")
            .arg(Self::key(client))
            .query_async(&mut conn)
            .await?;

        // -1: no expiry, -2: no key
        Ok(u64::try_from(ttl).ok())
    }
}
