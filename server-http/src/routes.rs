use crate::handlers;
use crate::state::AppState;
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, post},
};
use shared::config::Config;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::trace::TraceLayer;

/// Build and configure the application router
pub fn build_router(state: AppState, config: &Config) -> Router {
    let api = Router::new()
        .route("/participants", get(handlers::list_participants))
        .route("/participants/{id}", get(handlers::get_participant))
        .route("/attendance", post(handlers::mark_attendance))
        .route("/attendance/summary", get(handlers::attendance_summary))
        // SSE Events endpoint
        .route("/events", get(handlers::stream_events));

    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        .nest("/api", api)
        // Middleware
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Router wrapped so trailing slashes are trimmed before routing
pub fn build_app(state: AppState, config: &Config) -> NormalizePath<Router> {
    NormalizePath::trim_trailing_slash(build_router(state, config))
}

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    if config.allows_any_origin() {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse() {
                Ok(value) => Some(value),
                Err(_) => {
                    tracing::warn!("Ignoring invalid allowed origin '{}'", origin);
                    None
                }
            })
            .collect();
        cors.allow_origin(AllowOrigin::list(origins))
    }
}
