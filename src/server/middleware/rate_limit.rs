use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::server::{
    error::AppError, service::rate_limit::Admission, state::AppState, util::client_ip::client_ip,
};

/// Middleware admitting or rejecting each request against the client's window quota.
///
/// Exempt paths skip the counter entirely. A missing or failing counter store admits the
/// request.
///
/// # Returns
/// - `Ok(Response)` - Response of the inner handler
/// - `Err(AppError::RateLimited)` - Quota exhausted (429 with `Retry-After`)
pub async fn rate_limit(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if state.rate_limiter.is_exempt(req.uri().path()) {
        return Ok(next.run(req).await);
    }

    let ip = client_ip(&req, state.rate_limiter.trusted_proxy_hops());

    match state.rate_limiter.admit(&ip).await {
        Admission::Allowed => Ok(next.run(req).await),
        Admission::Denied => {
            tracing::warn!("Rate limit exceeded for {} on {}", ip, req.uri().path());
            state.metrics.record_rate_limit_hit(&ip);
            Err(AppError::RateLimited)
        }
    }
}
