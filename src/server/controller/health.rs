use axum::{extract::State, http::header, response::IntoResponse, Json};

use crate::{
    model::api::{ErrorDto, HealthDto},
    server::{error::AppError, state::AppState},
};

/// Tag for grouping operational endpoints in OpenAPI documentation
pub static HEALTH_TAG: &str = "health";

/// Content type of the Prometheus text exposition format.
const METRICS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Service is up", body = HealthDto)
    ),
)]
pub async fn health() -> Json<HealthDto> {
    Json(HealthDto {
        status: "ok".to_string(),
    })
}

/// Prometheus scrape endpoint.
///
/// # Returns
/// - `200 OK` - Every registered metric in text format
/// - `500 Internal Server Error` - Encoding failed
#[utoipa::path(
    get,
    path = "/metrics",
    tag = HEALTH_TAG,
    responses(
        (status = 200, description = "Metrics in Prometheus text format", body = String),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn metrics(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let body = state.metrics.encode_text()?;

    Ok(([(header::CONTENT_TYPE, METRICS_CONTENT_TYPE)], body))
}
