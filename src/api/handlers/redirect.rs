//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use serde_json::json;
use tracing::{debug, error};

use crate::domain::error::RegistryError;
use crate::error::AppError;
use crate::state::AppState;

const NOT_FOUND_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Link not found</title>
  <link rel="stylesheet" href="/static/style.css">
</head>
<body>
  <main class="not-found">
    <h1>404</h1>
    <p>This short link does not exist or has expired.</p>
    <a href="/">Create a new link</a>
  </main>
</body>
</html>
"#;

/// Redirects a short code to its destination URL.
///
/// # Endpoint
///
/// `GET /{shortCode}`
///
/// # Request Flow
///
/// 1. Resolve the code to a live link (expired links are evicted here)
/// 2. Build the 307 Temporary Redirect
/// 3. Count the click, only if the redirect could be built
///
/// Unknown and expired codes get an HTML 404 page rather than the JSON
/// error envelope, since this route is hit by browsers.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let link = match state.link_service.resolve(&code).await {
        Ok(link) => link,
        Err(RegistryError::NotFound) => {
            debug!(code = %code, "Redirect miss");
            return Ok((StatusCode::NOT_FOUND, Html(NOT_FOUND_PAGE)).into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let response = Redirect::temporary(&link.url).into_response();
    if !response.status().is_redirection() {
        error!(code = %code, "Stored destination is not a valid Location header");
        return Err(AppError::internal("Internal server error", json!({})));
    }

    state.link_service.record_click(&link.code).await;

    Ok(response)
}
