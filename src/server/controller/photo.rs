use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::Response,
};

use crate::{
    model::api::ErrorDto,
    server::{
        controller::observer::Observation, error::AppError, service::photo::PhotoService,
        state::AppState,
    },
};

/// Tag for grouping photo endpoints in OpenAPI documentation
pub static PHOTO_TAG: &str = "photo";

/// Cache directive attached to every proxied photo.
const PHOTO_CACHE_CONTROL: &str = "public, max-age=3600";

/// Stream the photo of an ad from the file host.
///
/// Uses the ad's direct media path when present, otherwise resolves its file handle first.
/// Only `Content-Type` and `Content-Length` of the upstream response are passed through;
/// the body is streamed unmodified.
///
/// # Arguments
/// - `state` - Application state containing the database connection and file host
/// - `id` - Ad id from the path
///
/// # Returns
/// - `200 OK` - Raw image bytes
/// - `400 Bad Request` - Id is not an integer
/// - `404 Not Found` - Ad missing, no photo, or photo gone upstream
/// - `502 Bad Gateway` - File host failed
#[utoipa::path(
    get,
    path = "/api/ads/{id}/photo",
    tag = PHOTO_TAG,
    params(
        ("id" = i32, Path, description = "Ad id")
    ),
    responses(
        (status = 200, description = "Image bytes with upstream content type"),
        (status = 400, description = "Invalid ad id", body = ErrorDto),
        (status = 404, description = "Ad or photo not found"),
        (status = 502, description = "File host failure", body = ErrorDto)
    ),
)]
pub async fn get_ad_photo(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let observation = Observation::start(&state, "ad_photo");
    let tags = vec![("ad_id".to_string(), id.clone())];
    let result = fetch_photo(&state, &id).await;

    observation.finish_with_tags(result, tags)
}

async fn fetch_photo(state: &AppState, id: &str) -> Result<Response, AppError> {
    let ad_id = id
        .trim()
        .parse::<i32>()
        .map_err(|_| AppError::BadRequest("invalid ad id".to_string()))?;

    let photo = PhotoService::new(&state.db, state.file_host.clone(), &state.metrics)
        .resolve(ad_id)
        .await?;

    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CACHE_CONTROL, PHOTO_CACHE_CONTROL)
        .header(header::ACCESS_CONTROL_ALLOW_ORIGIN, "*")
        .header(header::ACCESS_CONTROL_ALLOW_METHODS, "GET, OPTIONS");
    if let Some(content_type) = photo.content_type {
        builder = builder.header(header::CONTENT_TYPE, content_type);
    }
    if let Some(content_length) = photo.content_length {
        builder = builder.header(header::CONTENT_LENGTH, content_length);
    }

    builder
        .body(photo.body)
        .map_err(|e| AppError::InternalError(format!("failed to build photo response: {}", e)))
}
