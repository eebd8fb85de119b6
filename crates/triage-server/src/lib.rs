//! triage-server
//!
//! HTTP adapter over `TriageService`. The binary owns process startup:
//! configuration, logging, and loading the knowledge base.

use axum::http::HeaderValue;
use axum::middleware as axum_mw;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use config::TriageConfig;
use state::AppState;

/// Build the router with every API route, request logging, and CORS.
pub fn app(state: AppState, config: &TriageConfig) -> Router {
    Router::new()
        .route("/", get(routes::health::index))
        .route("/api/health", get(routes::health::health_check))
        .route(
            "/api/assessment/start",
            post(routes::assessment::start_assessment),
        )
        .route(
            "/api/assessment/start_new",
            post(routes::assessment::start_new_assessment),
        )
        .route("/api/assessment/next", post(routes::assessment::process_input))
        .route("/api/assessment/back", post(routes::assessment::go_back))
        .route(
            "/api/assessment/quick",
            post(routes::assessment::quick_assessment),
        )
        .route(
            "/api/assessment/save",
            post(routes::assessment::save_assessment),
        )
        .route(
            "/api/assessment/saved/{id}",
            get(routes::assessment::get_saved_assessment),
        )
        .route(
            "/api/symptoms/search",
            get(routes::symptoms::search_symptoms),
        )
        .layer(
            ServiceBuilder::new()
                .layer(axum_mw::from_fn(middleware::timing::request_timing))
                .layer(cors(config)),
        )
        .with_state(state)
}

fn cors(config: &TriageConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(origin = %origin, error = %e, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}
