use axum::{
    extract::{Path, State},
    response::Response,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        blacklist::{BlacklistEntryDto, ScammerCheckDto},
    },
    server::{
        controller::observer::Observation, error::AppError, model::user::User,
        service::blacklist::BlacklistService, state::AppState,
    },
};

/// Tag for grouping blacklist endpoints in OpenAPI documentation
pub static BLACKLIST_TAG: &str = "blacklist";

/// Check a username against the blacklist.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `username` - Username to check, with or without a leading `@`
///
/// # Returns
/// - `200 OK` - `{safe, msg}` classification
/// - `400 Bad Request` - Username empty after normalization
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/scammer/{username}",
    tag = BLACKLIST_TAG,
    params(
        ("username" = String, Path, description = "Username to check")
    ),
    responses(
        (status = 200, description = "Blacklist classification", body = ScammerCheckDto),
        (status = 400, description = "Empty username", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_scammer(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Response {
    let observation = Observation::start(&state, "scammer");
    let result = BlacklistService::new(&state.db, &state.metrics)
        .check(&username)
        .await
        .map(|check| Json(check.into_dto()));

    observation.finish(result)
}

/// Get every blacklisted user ordered by username.
///
/// # Returns
/// - `200 OK` - Blacklist entries, possibly empty
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/blacklist",
    tag = BLACKLIST_TAG,
    responses(
        (status = 200, description = "Blacklisted users", body = Vec<BlacklistEntryDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_blacklist(State(state): State<AppState>) -> Response {
    let observation = Observation::start(&state, "blacklist");
    let result: Result<_, AppError> = BlacklistService::new(&state.db, &state.metrics)
        .get_blacklist()
        .await
        .map(|users| {
            Json(
                users
                    .into_iter()
                    .map(User::into_blacklist_dto)
                    .collect::<Vec<_>>(),
            )
        });

    observation.finish(result)
}
