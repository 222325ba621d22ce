//! Likhni backend
//!
//! Turns a prompt plus form options into an email or a YouTube script by
//! resolving a system prompt, calling an OpenAI-compatible chat provider with
//! streaming enabled and relaying the generated tokens as Server-Sent Events.

pub mod config;
pub mod handlers;
pub mod middleware;
pub mod services;
pub mod utils;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio_util::sync::CancellationToken;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::services::connectivity::ConnectivityProbe;
use crate::services::llm::ChatProvider;

rust_i18n::i18n!("locales", fallback = "en");

/// Shared, read-only state handed to every handler.
pub struct AppState {
    pub provider: Arc<dyn ChatProvider>,
    pub connectivity: ConnectivityProbe,
    /// Cancelled on graceful shutdown; every relay holds a child token.
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        connectivity: ConnectivityProbe,
        shutdown: CancellationToken,
    ) -> Self {
        Self { provider, connectivity, shutdown }
    }
}

/// Build the HTTP router with all generation endpoints, API docs and layers.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/generate-email", post(handlers::generate::generate_email))
        .route("/generate-youtube", post(handlers::generate::generate_youtube))
        .route("/generate", post(handlers::generate::generate))
        .route("/enhance", post(handlers::enhance::enhance))
        .route("/default-prompt/:content_type", get(handlers::meta::default_prompt))
        .route("/health", get(handlers::meta::health))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", handlers::ApiDoc::openapi()),
        )
        .layer(axum::middleware::from_fn(middleware::locale_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
