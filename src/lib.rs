//! Enrollment fee service for the JEC English school sign-up wizard.
//!
//! Exposes the fee engine over HTTP/JSON for the review step and builds the
//! webhook payload for the submission step.

pub mod config;
pub mod error;
pub mod pricing;
pub mod submission;

use std::sync::Arc;

use axum::{response::IntoResponse, routing::get, Json, Router};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::pricing::FeeSchedule;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub schedule: Arc<FeeSchedule>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            schedule: Arc::new(FeeSchedule::default()),
        }
    }
}

/// Build the application router.
pub fn app(state: AppState) -> Router {
    let cors = match state.config.cors_origin.clone() {
        Some(origin) => CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
        None => CorsLayer::permissive(),
    };

    Router::new()
        .route("/health", get(health))
        .nest("/api/fees", pricing::router())
        .nest("/api/submissions", submission::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "enrollment-fees"
    }))
}
