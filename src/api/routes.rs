//! API route configuration.
//!
//! Account endpoints are public; link management requires a bearer token
//! via [`crate::api::middleware::auth`].

use crate::api::handlers::{
    create_link_handler, delete_link_handler, list_links_handler, login_handler,
    register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Public account routes.
///
/// - `POST /auth/register` - Create an account
/// - `POST /auth/login`    - Exchange credentials for a token
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register_handler))
        .route("/auth/login", post(login_handler))
}

/// Link management routes, to be wrapped in the auth layer.
///
/// - `POST   /links`             - Register a short link
/// - `GET    /links`             - List own links
/// - `DELETE /links/{shortCode}` - Delete an own link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{code}", delete(delete_link_handler))
}
