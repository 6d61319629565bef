//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::links::{
    CreateLinkRequest, CreateLinkResponse, CreatedLink, LinkSummary, ListLinksResponse,
    MessageResponse,
};
use crate::api::middleware::auth::AuthUser;
use crate::domain::error::RegistryError;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::request_origin::request_origin;

/// Base used to build `shortUrl`: the configured public URL, or the origin
/// the client used to reach us.
fn base_url(state: &AppState, headers: &HeaderMap) -> Result<String, AppError> {
    match &state.public_base_url {
        Some(base) => Ok(base.clone()),
        None => request_origin(headers),
    }
}

/// Registers a short link owned by the caller.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "customCode": "promo",
///   "expiresInHours": 24
/// }
/// ```
///
/// # Errors
///
/// Returns 400 if the URL, custom code or expiry is invalid.
/// Returns 409 if the custom code is taken by a live link.
/// Returns 503 if no free generated code could be found.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    headers: HeaderMap,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<CreateLinkResponse>), AppError> {
    let base = base_url(&state, &headers)?;

    let link = state
        .link_service
        .register(
            &payload.url,
            payload.custom_code(),
            payload.expires_in_hours,
            &owner,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateLinkResponse {
            message: "Link created successfully".to_string(),
            link: CreatedLink::from_link(link, &base),
        }),
    ))
}

/// Lists the caller's live links, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
    headers: HeaderMap,
) -> Result<Json<ListLinksResponse>, AppError> {
    let base = base_url(&state, &headers)?;

    let links = state
        .link_service
        .list_by_owner(&owner)
        .await
        .into_iter()
        .map(|link| LinkSummary::from_link(link, &base))
        .collect();

    Ok(Json(ListLinksResponse { links }))
}

/// Deletes one of the caller's links.
///
/// # Endpoint
///
/// `DELETE /api/links/{shortCode}`
///
/// # Errors
///
/// Returns 404 if the code is unknown or owned by someone else; the two
/// cases are indistinguishable to the caller.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    Extension(AuthUser(owner)): Extension<AuthUser>,
) -> Result<Json<MessageResponse>, AppError> {
    if !state.link_service.delete_by_owner(&code, &owner).await {
        return Err(RegistryError::NotFoundOrUnauthorized.into());
    }

    Ok(Json(MessageResponse {
        message: "Link deleted successfully".to_string(),
    }))
}
