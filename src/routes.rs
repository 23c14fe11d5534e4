use crate::{
    handlers, // Import handlers module
    handlers::AppState,
};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Creates the Axum router and associates routes with handlers.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/preguntas", get(handlers::preguntas))
        .route("/analizar", post(handlers::analizar))
        .route("/resultado/{id}", get(handlers::get_resultado))
        .route("/imagen/{id}", get(handlers::get_imagen))
        .route("/health", get(handlers::health))
        // Middleware Layers
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        // Answer payloads are tiny; 1 MB is generous
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .with_state(state) // Pass the application state
}
