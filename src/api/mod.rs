//! Axum HTTP surface.

pub mod error;
pub mod handlers;

use crate::app::MadLibsApp;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub type AppState = Arc<MadLibsApp>;

/// All routes, with permissive CORS and request tracing.
pub fn router(app: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/generate-template", post(handlers::generate_template))
        .route("/api/submit-madlib", post(handlers::submit_madlib))
        .route("/api/generate-image", post(handlers::generate_image))
        .route("/api/images/:filename", get(handlers::get_image))
        .route("/api/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(app)
}
