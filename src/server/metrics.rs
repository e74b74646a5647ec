//! Prometheus metrics for request outcomes, failures and business state.
//!
//! | Metric | Type | Labels |
//! |--------|------|--------|
//! | `api_requests_total` | Counter | `endpoint`, `status` |
//! | `api_response_time_seconds` | Histogram | `endpoint`, `status` |
//! | `errors_total` | Counter | `type`, `endpoint` |
//! | `rate_limit_hits_total` | Counter | `ip` |
//! | `database_query_duration_seconds` | Histogram | `operation` |
//! | `ads_total`, `ads_active`, `ads_premium` | Gauge | |
//! | `users_total`, `users_scammers` | Gauge | |
//!
//! The registry is private to the instance, so tests can build as many as they need.

use std::time::Duration;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts, Registry, TextEncoder,
};

use crate::server::error::AppError;

/// Label values longer than this are cut to bound series cardinality.
const MAX_LABEL_VALUE_LEN: usize = 64;

const RESPONSE_TIME_BUCKETS: &[f64] = &[
    0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
];
const QUERY_DURATION_BUCKETS: &[f64] = &[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0];

/// Snapshot of store-wide counts exported as gauges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BusinessSnapshot {
    pub ads_total: u64,
    pub ads_active: u64,
    pub ads_premium: u64,
    pub users_total: u64,
    pub users_scammers: u64,
}

/// All metrics of the service, registered against one registry.
///
/// Every metric uses interior mutability; share the struct behind an `Arc`.
pub struct Metrics {
    registry: Registry,
    api_requests_total: IntCounterVec,
    api_response_time: HistogramVec,
    errors_total: IntCounterVec,
    rate_limit_hits_total: IntCounterVec,
    database_query_duration: HistogramVec,
    ads_total: IntGauge,
    ads_active: IntGauge,
    ads_premium: IntGauge,
    users_total: IntGauge,
    users_scammers: IntGauge,
}

impl Metrics {
    /// Creates all metrics and registers them with a fresh registry.
    ///
    /// # Returns
    /// - `Ok(Metrics)` - Every metric registered
    /// - `Err(AppError::MetricsErr)` - A metric definition was rejected
    pub fn new() -> Result<Self, AppError> {
        let registry = Registry::new();

        let api_requests_total = IntCounterVec::new(
            Opts::new("api_requests_total", "Total API requests by endpoint and status"),
            &["endpoint", "status"],
        )?;
        registry.register(Box::new(api_requests_total.clone()))?;

        let api_response_time = HistogramVec::new(
            HistogramOpts::new("api_response_time_seconds", "API response time in seconds")
                .buckets(RESPONSE_TIME_BUCKETS.to_vec()),
            &["endpoint", "status"],
        )?;
        registry.register(Box::new(api_response_time.clone()))?;

        let errors_total = IntCounterVec::new(
            Opts::new("errors_total", "Total failures by class and endpoint"),
            &["type", "endpoint"],
        )?;
        registry.register(Box::new(errors_total.clone()))?;

        let rate_limit_hits_total = IntCounterVec::new(
            Opts::new("rate_limit_hits_total", "Total rate-limited requests by client"),
            &["ip"],
        )?;
        registry.register(Box::new(rate_limit_hits_total.clone()))?;

        let database_query_duration = HistogramVec::new(
            HistogramOpts::new(
                "database_query_duration_seconds",
                "Database query duration in seconds",
            )
            .buckets(QUERY_DURATION_BUCKETS.to_vec()),
            &["operation"],
        )?;
        registry.register(Box::new(database_query_duration.clone()))?;

        let gauge = |name: &str, help: &str| -> Result<IntGauge, AppError> {
            let gauge = IntGauge::new(name, help)?;
            registry.register(Box::new(gauge.clone()))?;
            Ok(gauge)
        };
        let ads_total = gauge("ads_total", "Stored ads")?;
        let ads_active = gauge("ads_active", "Effectively active ads")?;
        let ads_premium = gauge("ads_premium", "Effectively active premium ads")?;
        let users_total = gauge("users_total", "Stored users")?;
        let users_scammers = gauge("users_scammers", "Users flagged on the blacklist")?;

        Ok(Self {
            registry,
            api_requests_total,
            api_response_time,
            errors_total,
            rate_limit_hits_total,
            database_query_duration,
            ads_total,
            ads_active,
            ads_premium,
            users_total,
            users_scammers,
        })
    }

    /// Records the terminal outcome of a request.
    ///
    /// # Arguments
    /// - `endpoint` - Short endpoint name (`ads`, `myads`, `ad_photo`, ...)
    /// - `status` - HTTP status code sent to the client
    /// - `elapsed` - Time spent handling the request
    pub fn record_request(&self, endpoint: &str, status: u16, elapsed: Duration) {
        let endpoint = truncate_label(endpoint);
        let status = status.to_string();
        self.api_requests_total
            .with_label_values(&[endpoint, status.as_str()])
            .inc();
        self.api_response_time
            .with_label_values(&[endpoint, status.as_str()])
            .observe(elapsed.as_secs_f64());
    }

    /// Counts a failure of the given class on an endpoint.
    pub fn record_error(&self, class: &str, endpoint: &str) {
        self.errors_total
            .with_label_values(&[truncate_label(class), truncate_label(endpoint)])
            .inc();
    }

    /// Counts a request rejected by the rate limiter.
    pub fn record_rate_limit_hit(&self, ip: &str) {
        self.rate_limit_hits_total
            .with_label_values(&[truncate_label(ip)])
            .inc();
    }

    /// Observes the duration of a database round-trip.
    pub fn observe_query(&self, operation: &str, elapsed: Duration) {
        self.database_query_duration
            .with_label_values(&[truncate_label(operation)])
            .observe(elapsed.as_secs_f64());
    }

    /// Replaces every business gauge with the values of `snapshot`.
    pub fn set_business(&self, snapshot: BusinessSnapshot) {
        self.ads_total.set(clamp(snapshot.ads_total));
        self.ads_active.set(clamp(snapshot.ads_active));
        self.ads_premium.set(clamp(snapshot.ads_premium));
        self.users_total.set(clamp(snapshot.users_total));
        self.users_scammers.set(clamp(snapshot.users_scammers));
    }

    /// Renders every metric in the Prometheus text exposition format.
    ///
    /// # Returns
    /// - `Ok(String)` - Encoded metrics
    /// - `Err(AppError)` - Encoding failed
    pub fn encode_text(&self) -> Result<String, AppError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| AppError::InternalError(e.to_string()))
    }
}

fn clamp(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

/// Cuts a label value to `MAX_LABEL_VALUE_LEN` bytes on a character boundary.
fn truncate_label(value: &str) -> &str {
    if value.len() <= MAX_LABEL_VALUE_LEN {
        return value;
    }

    let mut end = MAX_LABEL_VALUE_LEN;
    while end > 0 && !value.is_char_boundary(end) {
        end -= 1;
    }
    &value[..end]
}
