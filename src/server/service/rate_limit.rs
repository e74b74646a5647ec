//! Fixed-window rate limiting keyed by client identity.
//!
//! Each client gets a counter that lives for one window. The increment that creates the
//! counter arms its expiry; every request past the limit within that window is denied.
//! A denied request re-arms a counter left without expiry, so a lost `EXPIRE` never
//! blocks a client for longer than one window past its quota. When the counter store is
//! missing or failing, requests are admitted.

use std::sync::Arc;

use async_trait::async_trait;

use crate::server::error::counter::CounterError;

/// Requests admitted per client per window.
pub const REQUEST_LIMIT: i64 = 60;

/// Window length in seconds, also sent as `Retry-After` on denial.
pub const WINDOW_SECS: u64 = 60;

/// Route of the photo proxy, matched against `/api/ads/{id}/photo`.
const PHOTO_ROUTE_PREFIX: &str = "/api/ads/";
const PHOTO_ROUTE_SUFFIX: &str = "/photo";

/// Exact paths never subject to rate limiting.
const EXEMPT_PATHS: &[&str] = &[
    "/",
    "/health",
    "/metrics",
    "/terms",
    "/privacy",
    "/launch_512x512.svg",
];

/// Path prefixes never subject to rate limiting.
const EXEMPT_PREFIXES: &[&str] = &["/static/", "/assets/"];

/// Atomic per-key counter with expiry, shared by every server instance.
#[async_trait]
pub trait CounterStore: Send + Sync {
    /// Increments the counter of `client` and returns the new value.
    async fn incr(&self, client: &str) -> Result<i64, CounterError>;

    /// Sets the counter of `client` to expire after `seconds`.
    async fn expire(&self, client: &str, seconds: u64) -> Result<(), CounterError>;

    /// Remaining lifetime of the counter of `client`, `None` when no expiry is set.
    async fn ttl(&self, client: &str) -> Result<Option<u64>, CounterError>;
}

/// Outcome of a rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Allowed,
    Denied,
}

/// Fixed-window rate limiter over an optional counter store.
#[derive(Clone)]
pub struct RateLimiter {
    store: Option<Arc<dyn CounterStore>>,
    limit: i64,
    window_secs: u64,
    limit_photos: bool,
    trusted_proxy_hops: Option<usize>,
}

impl RateLimiter {
    /// Creates a limiter with the default limit and window.
    ///
    /// # Arguments
    /// - `store` - Counter store, `None` to admit every request
    /// - `limit_photos` - Whether the photo route counts towards the limit
    pub fn new(store: Option<Arc<dyn CounterStore>>, limit_photos: bool) -> Self {
        Self {
            store,
            limit: REQUEST_LIMIT,
            window_secs: WINDOW_SECS,
            limit_photos,
            trusted_proxy_hops: None,
        }
    }

    /// Sets how many reverse proxies append to `X-Forwarded-For` in front of the server.
    pub fn with_trusted_proxy_hops(mut self, hops: Option<usize>) -> Self {
        self.trusted_proxy_hops = hops;
        self
    }

    pub fn trusted_proxy_hops(&self) -> Option<usize> {
        self.trusted_proxy_hops
    }

    /// Limiter that admits everything.
    pub fn disabled() -> Self {
        Self::new(None, false)
    }

    /// Whether requests to `path` bypass the limiter entirely.
    ///
    /// # Arguments
    /// - `path` - Request path without query string
    ///
    /// # Returns
    /// - `true` - Path is on the allow-list, or is the photo route with photo limiting off
    /// - `false` - Path counts towards the client's quota
    pub fn is_exempt(&self, path: &str) -> bool {
        if EXEMPT_PATHS.contains(&path) {
            return true;
        }
        if EXEMPT_PREFIXES.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }

        !self.limit_photos && is_photo_route(path)
    }

    /// Counts one request of `client` and decides whether to admit it.
    ///
    /// # Arguments
    /// - `client` - Client network identity
    ///
    /// # Returns
    /// - `Admission::Allowed` - Within quota, or the store is unavailable
    /// - `Admission::Denied` - Quota of the current window exhausted
    pub async fn admit(&self, client: &str) -> Admission {
        let Some(store) = &self.store else {
            return Admission::Allowed;
        };

        let count = match store.incr(client).await {
            Ok(count) => count,
            Err(e) => {
                tracing::warn!("Rate limit store unavailable, admitting request: {}", e);
                return Admission::Allowed;
            }
        };

        if count == 1 {
            self.arm_window(store.as_ref(), client).await;
        }

        if count > self.limit {
            self.repair_window(store.as_ref(), client).await;
            Admission::Denied
        } else {
            Admission::Allowed
        }
    }

    async fn arm_window(&self, store: &dyn CounterStore, client: &str) {
        if let Err(e) = store.expire(client, self.window_secs).await {
            tracing::warn!("Failed to arm rate limit window for {}: {}", client, e);
        }
    }

    /// Arms the expiry of a counter whose first `EXPIRE` was lost.
    async fn repair_window(&self, store: &dyn CounterStore, client: &str) {
        match store.ttl(client).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                tracing::warn!("Rate limit window of {} had no expiry, re-arming", client);
                self.arm_window(store, client).await;
            }
            Err(e) => {
                tracing::warn!("Failed to read rate limit window of {}: {}", client, e);
            }
        }
    }
}

fn is_photo_route(path: &str) -> bool {
    path.strip_prefix(PHOTO_ROUTE_PREFIX)
        .and_then(|rest| rest.strip_suffix(PHOTO_ROUTE_SUFFIX))
        .is_some_and(|id| !id.is_empty() && !id.contains('/'))
}

#[cfg(test)]
pub mod testing {
    use std::{
        collections::HashMap,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Mutex,
        },
    };

    use super::*;

    /// In-memory counter store; `expire` records the call and time only moves on
    /// [`MemoryCounterStore::elapse_windows`].
    #[derive(Default)]
    pub struct MemoryCounterStore {
        pub counts: Mutex<HashMap<String, i64>>,
        pub expirations: Mutex<Vec<(String, u64)>>,
    }

    impl MemoryCounterStore {
        /// Drops every counter with an armed expiry, as if its window had passed.
        pub fn elapse_windows(&self) {
            let mut expirations = self.expirations.lock().unwrap();
            let mut counts = self.counts.lock().unwrap();
            for (client, _) in expirations.drain(..) {
                counts.remove(&client);
            }
        }
    }

    #[async_trait]
    impl CounterStore for MemoryCounterStore {
        async fn incr(&self, client: &str) -> Result<i64, CounterError> {
            let mut counts = self.counts.lock().unwrap();
            let count = counts.entry(client.to_string()).or_insert(0);
            *count += 1;
            Ok(*count)
        }

        async fn expire(&self, client: &str, seconds: u64) -> Result<(), CounterError> {
            self.expirations
                .lock()
                .unwrap()
                .push((client.to_string(), seconds));
            Ok(())
        }

        async fn ttl(&self, client: &str) -> Result<Option<u64>, CounterError> {
            let ttl = self
                .expirations
                .lock()
                .unwrap()
                .iter()
                .rev()
                .find(|(key, _)| key == client)
                .map(|(_, seconds)| *seconds);
            Ok(ttl)
        }
    }

    /// Memory store whose first `expire` fails, leaving that counter without expiry.
    #[derive(Default)]
    pub struct LostExpiryCounterStore {
        pub inner: MemoryCounterStore,
        pub expire_calls: AtomicUsize,
    }

    #[async_trait]
    impl CounterStore for LostExpiryCounterStore {
        async fn incr(&self, client: &str) -> Result<i64, CounterError> {
            self.inner.incr(client).await
        }

        async fn expire(&self, client: &str, seconds: u64) -> Result<(), CounterError> {
            if self.expire_calls.fetch_add(1, Ordering::SeqCst) == 0 {
                return Err(CounterError::Pool(deadpool_redis::PoolError::Closed));
            }
            self.inner.expire(client, seconds).await
        }

        async fn ttl(&self, client: &str) -> Result<Option<u64>, CounterError> {
            self.inner.ttl(client).await
        }
    }

    /// Counter store whose every call fails.
    pub struct FailingCounterStore;

    #[async_trait]
    impl CounterStore for FailingCounterStore {
        async fn incr(&self, _client: &str) -> Result<i64, CounterError> {
            Err(CounterError::Pool(deadpool_redis::PoolError::Closed))
        }

        async fn expire(&self, _client: &str, _seconds: u64) -> Result<(), CounterError> {
            Ok(())
        }

        async fn ttl(&self, _client: &str) -> Result<Option<u64>, CounterError> {
            Err(CounterError::Pool(deadpool_redis::PoolError::Closed))
        }
    }
}
