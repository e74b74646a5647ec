use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Outcomes of photo resolution other than a streamed body.
///
/// Every "photo is legitimately unavailable" case maps to 404 so that only a broken file
/// host surfaces as 502.
#[derive(Error, Debug)]
pub enum PhotoError {
    /// No ad exists with the requested id.
    #[error("Ad {0} not found")]
    AdNotFound(i32),

    /// The ad carries neither a direct path nor a file handle.
    #[error("Ad {0} has no photo reference")]
    NoPhoto(i32),

    /// No file host is configured, so nothing can be fetched.
    #[error("File host is not configured")]
    NotConfigured,

    /// The file handle could not be resolved to a path.
    #[error("Failed to resolve photo handle for ad {ad_id}: {reason}")]
    HandleUnresolved { ad_id: i32, reason: String },

    /// The file host reported the resolved path as missing.
    #[error("File host returned 404 for {path}")]
    UpstreamNotFound { path: String },

    /// The file host failed for any other reason.
    ///
    /// # Fields
    /// - `status` - Upstream HTTP status, `None` for transport-level failures
    /// - `path` - Resolved media path that was requested
    /// - `reason` - Underlying failure description
    #[error("File host request for {path} failed: {reason}")]
    Upstream {
        status: Option<u16>,
        path: String,
        reason: String,
    },
}

impl PhotoError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream { .. } => StatusCode::BAD_GATEWAY,
            _ => StatusCode::NOT_FOUND,
        }
    }

    /// Structured context for error reports: upstream status and media path.
    pub fn tags(&self) -> Vec<(String, String)> {
        match self {
            Self::AdNotFound(ad_id) | Self::NoPhoto(ad_id) => {
                vec![("ad_id".to_string(), ad_id.to_string())]
            }
            Self::HandleUnresolved { ad_id, .. } => {
                vec![("ad_id".to_string(), ad_id.to_string())]
            }
            Self::NotConfigured => Vec::new(),
            Self::UpstreamNotFound { path } => vec![
                ("upstream_status".to_string(), "404".to_string()),
                ("path".to_string(), path.clone()),
            ],
            Self::Upstream { status, path, .. } => vec![
                (
                    "upstream_status".to_string(),
                    status.map_or_else(|| "none".to_string(), |status| status.to_string()),
                ),
                ("path".to_string(), path.clone()),
            ],
        }
    }

    /// Failure class used for the `errors_total` metric, `None` when nothing failed.
    pub fn class(&self) -> Option<&'static str> {
        match self {
            Self::AdNotFound(_) | Self::NoPhoto(_) | Self::HandleUnresolved { .. } => None,
            Self::NotConfigured => Some("config"),
            Self::UpstreamNotFound { .. } | Self::Upstream { .. } => Some("external_api"),
        }
    }
}

/// Converts photo errors into HTTP responses.
///
/// # Returns
/// - 404 Not Found with `{"error"}` body - For `AdNotFound`
/// - 404 Not Found with no body - For missing or deleted photos and an unconfigured host
/// - 502 Bad Gateway with `{"error"}` body - For `Upstream`
impl IntoResponse for PhotoError {
    fn into_response(self) -> Response {
        match self {
            Self::AdNotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(ErrorDto {
                    error: "ad not found".to_string(),
                }),
            )
                .into_response(),
            Self::Upstream { .. } => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorDto {
                    error: "failed to fetch photo".to_string(),
                }),
            )
                .into_response(),
            _ => StatusCode::NOT_FOUND.into_response(),
        }
    }
}
