//! HTTP endpoints for drop-relay.
//!
//! The relay API plus health and metrics endpoints.

pub mod error;
mod files;
pub mod health;
mod metrics;
mod sessions;

use crate::server::ShareRelay;
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{get, post},
    Extension, Router,
};
use std::sync::Arc;

pub use error::{ApiError, ApiResult};
pub use health::HealthStatus;

/// Build the HTTP router with all endpoints.
pub fn build_router(relay: Arc<ShareRelay>) -> Router {
    // Upload bodies carry base64 (4/3 overhead) plus JSON framing, so the
    // body limit sits well above the file size limit.
    let body_limit = (relay.config().store.max_file_size as usize) * 2;

    Router::new()
        .route(
            "/api/session",
            get(sessions::create_auto).post(sessions::create_with_code),
        )
        .route("/api/session/:code", get(sessions::describe))
        .route("/api/session/:code/upload", post(files::upload))
        .route("/api/session/:code/file/:file_id", get(files::fetch))
        .route("/health", get(health::health_handler))
        .route("/metrics", get(metrics::metrics_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(Extension(relay))
}
