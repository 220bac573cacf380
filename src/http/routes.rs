use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Sessions
        .route(
            "/api/sessions",
            post(handlers::create_session).get(handlers::list_sessions),
        )
        .route("/api/sessions/:session_id", get(handlers::get_session))
        .route("/api/sessions/:session_id/audio", post(handlers::upload_audio))
        .route(
            "/api/sessions/:session_id/transcript",
            put(handlers::update_transcript),
        )
        .route(
            "/api/sessions/:session_id/summarize",
            post(handlers::summarize_session),
        )
        .route(
            "/api/sessions/:session_id/unlink",
            post(handlers::unlink_session),
        )
        // Cases
        .route(
            "/api/cases",
            post(handlers::create_case).get(handlers::list_cases),
        )
        .route("/api/cases/:case_id", get(handlers::get_case))
        .route(
            "/api/cases/:case_id/sessions/:session_id",
            post(handlers::link_session),
        )
        // System config
        .route(
            "/api/system/config",
            get(handlers::get_system_config).patch(handlers::patch_system_config),
        )
        .route("/api/system/providers", get(handlers::list_providers))
        .route(
            "/api/system/whisper-models",
            get(handlers::list_whisper_models),
        )
        // Tracing middleware for request logging; the UI is a separate
        // origin, so CORS stays permissive
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
