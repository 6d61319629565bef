//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{shortCode}` - Short link redirect (public)
//! - `GET  /health`      - Service status (public)
//! - `/api/auth/*`       - Register and login (public)
//! - `/api/links*`       - Link management (Bearer token required)
//! - `/static/*`         - Static assets
//! - `/` and anything else unmatched - the single-page front end
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Permissive, the API is meant to be called from browsers
//! - **Authentication** - Bearer JWT on link management
//! - **Path normalization** - Trailing slash handling

use std::path::Path;

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::cors::CorsLayer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Constructs the application router with all routes and middleware.
///
/// `static_dir` holds the front end; its `index.html` is served for `/`
/// and for any path no other route claims.
pub fn app_router(state: AppState, static_dir: impl AsRef<Path>) -> NormalizePath<Router> {
    let static_dir = static_dir.as_ref();
    let index = ServeFile::new(static_dir.join("index.html"));

    let protected = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    let api_router = api::routes::public_routes().merge(protected);

    let router = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .nest_service("/static", ServeDir::new(static_dir))
        .route_service("/", index.clone())
        .fallback_service(index)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
