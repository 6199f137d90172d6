//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`   - Health check: storage probe
//! - everything else  - Clinic JSON API, see [`crate::api::routes::clinic_routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the clinic routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::rate_limit::RateLimitLayer;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// `rate_limit` is optional so tests can serve the router without peer
/// address information.
pub fn app_router(state: AppState, rate_limit: Option<RateLimitLayer>) -> NormalizePath<Router> {
    let clinic = match rate_limit {
        Some(limit) => api::routes::clinic_routes().layer(limit),
        None => api::routes::clinic_routes(),
    };

    let router = Router::new()
        .route("/health", get(health_handler))
        .merge(clinic)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
