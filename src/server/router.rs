//! Route table and API documentation.
//!
//! JSON endpoints under `/api` require mini-app init data and carry permissive CORS. The
//! photo route sits outside that group: `<img>` tags cannot send the authorization header,
//! and the handler sets its own CORS headers. Rate limiting wraps every route; its own
//! allow-list decides which paths are counted.

use axum::{middleware::from_fn_with_state, routing::get, Json, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    model::{
        ad::AdDto,
        api::{ErrorDto, HealthDto},
        blacklist::{BlacklistEntryDto, ScammerCheckDto},
    },
    server::{
        controller::{
            ad::{self, get_ads, get_my_ads},
            blacklist::{self, check_scammer, get_blacklist},
            health::{self, health, metrics},
            photo::{self, get_ad_photo},
            profile::{self, get_profile},
        },
        middleware::{auth::require_init_data, rate_limit::rate_limit},
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "marketboard", description = "Classifieds marketplace read API"),
    paths(
        ad::get_ads,
        ad::get_my_ads,
        profile::get_profile,
        blacklist::check_scammer,
        blacklist::get_blacklist,
        photo::get_ad_photo,
        health::health,
        health::metrics,
    ),
    components(schemas(AdDto, ErrorDto, HealthDto, BlacklistEntryDto, ScammerCheckDto))
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Builds the application router.
///
/// # Arguments
/// - `state` - Shared application state, also used by the middleware layers
///
/// # Returns
/// - `Router` - Router with state applied, ready to serve
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/api/ads", get(get_ads))
        .route("/api/myads", get(get_my_ads))
        .route("/api/profile/{username}", get(get_profile))
        .route("/api/scammer/{username}", get(check_scammer))
        .route("/api/blacklist", get(get_blacklist))
        .route_layer(from_fn_with_state(state.clone(), require_init_data))
        .layer(CorsLayer::permissive());

    Router::new()
        .merge(api)
        .route("/api/ads/{id}/photo", get(get_ad_photo))
        .route("/api/openapi.json", get(openapi))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .layer(from_fn_with_state(state.clone(), rate_limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
