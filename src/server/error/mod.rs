//! Error types and HTTP response handling.
//!
//! This module provides the application's error hierarchy and conversion logic for
//! transforming errors into HTTP responses. The `AppError` enum serves as the top-level
//! error type that wraps domain-specific errors and implements `IntoResponse` for
//! automatic error handling in API endpoints.

pub mod config;
pub mod counter;
pub mod file_host;
pub mod photo;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::{
        error::{config::ConfigError, photo::PhotoError},
        service::rate_limit::WINDOW_SECS,
    },
};

/// Top-level application error type.
///
/// Aggregates all possible error types that can occur in the application and provides
/// automatic conversion to HTTP responses. Domain-specific errors like `PhotoError` handle
/// their own response mapping, while generic variants provide standard HTTP status codes.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration error during startup or environment variable loading.
    #[error(transparent)]
    ConfigErr(#[from] ConfigError),

    /// Photo resolution outcome, delegated to `PhotoError::into_response()`.
    #[error(transparent)]
    PhotoErr(#[from] PhotoError),

    /// Database operation error from SeaORM.
    ///
    /// Results in 500 Internal Server Error with error details logged server-side.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),

    /// HTTP client construction or request error from reqwest.
    #[error(transparent)]
    ReqwestErr(#[from] reqwest::Error),

    /// Cron scheduler error.
    #[error(transparent)]
    SchedulerErr(#[from] tokio_cron_scheduler::JobSchedulerError),

    /// Metric registration or encoding error.
    #[error(transparent)]
    MetricsErr(#[from] prometheus::Error),

    /// Socket bind or serve error.
    #[error(transparent)]
    IoErr(#[from] std::io::Error),

    /// Resource not found error.
    ///
    /// Results in 404 Not Found with the provided error message.
    #[error("{0}")]
    NotFound(String),

    /// Invalid request error.
    ///
    /// Results in 400 Bad Request with the provided error message.
    #[error("{0}")]
    BadRequest(String),

    /// Missing or invalid caller identity.
    ///
    /// Results in 401 Unauthorized with the provided error message.
    #[error("{0}")]
    Unauthorized(String),

    /// The client exhausted its request quota for the current window.
    ///
    /// Results in 429 Too Many Requests with a `Retry-After` header.
    #[error("rate limit exceeded")]
    RateLimited,

    /// Internal server error with custom message.
    ///
    /// The provided message is logged but a generic message is returned to the client.
    #[error("{0}")]
    InternalError(String),
}

impl AppError {
    /// HTTP status this error resolves to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::PhotoErr(err) => err.status(),
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Failure class used as the `type` label of `errors_total`.
    ///
    /// # Returns
    /// - `Some(class)` - The error counts as a failure of that class
    /// - `None` - The outcome is an expected absence rather than a failure
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Self::PhotoErr(err) => err.class(),
            Self::ConfigErr(_) => Some("config"),
            Self::DbErr(_) => Some("database"),
            Self::ReqwestErr(_) => Some("external_api"),
            Self::BadRequest(_) => Some("validation"),
            Self::Unauthorized(_) => Some("auth"),
            Self::RateLimited => Some("rate_limit"),
            Self::NotFound(_) => None,
            _ => Some("internal"),
        }
    }

    /// Structured context forwarded with error reports.
    pub fn tags(&self) -> Vec<(String, String)> {
        match self {
            Self::PhotoErr(err) => err.tags(),
            _ => Vec::new(),
        }
    }
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - For `BadRequest` variant
/// - 401 Unauthorized - For `Unauthorized` variant
/// - 404 Not Found - For `NotFound` variant
/// - 429 Too Many Requests - For `RateLimited`, with `Retry-After`
/// - Variable - For `PhotoErr`, delegated to `PhotoError::into_response()`
/// - 500 Internal Server Error - For all other error types
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::PhotoErr(err) => err.into_response(),
            Self::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(ErrorDto { error: msg })).into_response()
            }
            Self::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(ErrorDto { error: msg })).into_response()
            }
            Self::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(ErrorDto { error: msg })).into_response()
            }
            Self::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, WINDOW_SECS.to_string())],
                Json(ErrorDto {
                    error: "rate limit exceeded".to_string(),
                }),
            )
                .into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the
/// client to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
