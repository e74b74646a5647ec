use axum::{
    extract::{Query, State},
    response::Response,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{ad::AdDto, api::ErrorDto},
    server::{
        controller::observer::Observation,
        error::AppError,
        model::ad::{Ad, ListAdsFilter, OwnerKey},
        service::listing::ListingService,
        state::AppState,
    },
};

/// Tag for grouping listing endpoints in OpenAPI documentation
pub static AD_TAG: &str = "ad";

#[derive(Deserialize)]
pub struct ListAdsParams {
    pub cat: Option<String>,
    pub mode: Option<String>,
    pub tag: Option<String>,
}

#[derive(Deserialize)]
pub struct MyAdsParams {
    pub user_id: Option<String>,
}

/// Get the public listing feed.
///
/// Returns every effectively active ad matching the filter. Premium ads come first in
/// recency order, followed by the remaining matches ordered by premium flag and recency.
/// The mode filter is ignored for the `other` category; a tag of `all` disables the tag
/// filter.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `params` - Optional `cat`, `mode` and `tag` filters
///
/// # Returns
/// - `200 OK` - Ordered ads, possibly empty
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/ads",
    tag = AD_TAG,
    params(
        ("cat" = Option<String>, Query, description = "Category filter"),
        ("mode" = Option<String>, Query, description = "Mode filter, ignored for the other category"),
        ("tag" = Option<String>, Query, description = "Tag filter, `all` for any tag")
    ),
    responses(
        (status = 200, description = "Active ads, premium first", body = Vec<AdDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_ads(
    State(state): State<AppState>,
    Query(params): Query<ListAdsParams>,
) -> Response {
    let observation = Observation::start(&state, "ads");
    let result = list_ads(&state, params).await;

    observation.finish(result)
}

async fn list_ads(state: &AppState, params: ListAdsParams) -> Result<Json<Vec<AdDto>>, AppError> {
    let filter = ListAdsFilter::new(
        params.cat.as_deref(),
        params.mode.as_deref(),
        params.tag.as_deref(),
    );

    let ads = ListingService::new(&state.db, &state.metrics)
        .list_active(&filter)
        .await?;

    Ok(Json(ads.into_iter().map(Ad::into_dto).collect()))
}

/// Get the caller's own ads.
///
/// Matches ads whose client identity equals `user_id`, and ads whose numeric owner
/// identity equals it when it parses as an integer. Ordered active first, then expired,
/// then removed, each by last update. Entries carry the owner key.
///
/// # Arguments
/// - `state` - Application state containing the database connection
/// - `params` - Required `user_id`
///
/// # Returns
/// - `200 OK` - The caller's ads, possibly empty
/// - `400 Bad Request` - `user_id` missing
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/myads",
    tag = AD_TAG,
    params(
        ("user_id" = String, Query, description = "Client identity or numeric owner identity")
    ),
    responses(
        (status = 200, description = "Owner's ads by status bucket", body = Vec<AdDto>),
        (status = 400, description = "user_id parameter missing", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_my_ads(
    State(state): State<AppState>,
    Query(params): Query<MyAdsParams>,
) -> Response {
    let observation = Observation::start(&state, "myads");
    let result = list_my_ads(&state, params).await;

    observation.finish(result)
}

async fn list_my_ads(state: &AppState, params: MyAdsParams) -> Result<Json<Vec<AdDto>>, AppError> {
    let Some(owner) = params.user_id.as_deref().and_then(OwnerKey::parse) else {
        return Err(AppError::BadRequest(
            "user_id parameter is required".to_string(),
        ));
    };

    let ads = ListingService::new(&state.db, &state.metrics)
        .list_by_owner(&owner)
        .await?;

    Ok(Json(ads.into_iter().map(Ad::into_owner_dto).collect()))
}
