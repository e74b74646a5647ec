use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::{
    model::{ad::AdDto, api::ErrorDto},
    server::{
        controller::observer::Observation, error::AppError, model::ad::Ad,
        service::listing::ListingService, state::AppState,
    },
};

/// Tag for grouping profile endpoints in OpenAPI documentation
pub static PROFILE_TAG: &str = "profile";

/// Get every ad published under a username.
///
/// The username is trimmed, stripped of one leading `@` and compared case-insensitively.
/// Ads are ordered active first, then expired, then removed. Stale rows whose expiration
/// passed are reported as expired.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `username` - Username to look up
///
/// # Returns
/// - `200 OK` - The user's ads, possibly empty
/// - `400 Bad Request` - Username empty after normalization
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/profile/{username}",
    tag = PROFILE_TAG,
    params(
        ("username" = String, Path, description = "Username, with or without a leading @")
    ),
    responses(
        (status = 200, description = "User's ads by status bucket", body = Vec<AdDto>),
        (status = 400, description = "Empty username", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_profile(State(state): State<AppState>, Path(username): Path<String>) -> Response {
    let observation = Observation::start(&state, "profile");
    let result = list_profile(&state, &username).await;

    observation.finish(result)
}

async fn list_profile(state: &AppState, username: &str) -> Result<Json<Vec<AdDto>>, AppError> {
    let ads = ListingService::new(&state.db, &state.metrics)
        .list_by_username(username)
        .await?;

    Ok(Json(ads.into_iter().map(Ad::into_dto).collect()))
}
