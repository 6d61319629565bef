//! DTOs for link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;
use crate::utils::request_origin::short_url;

/// Request body for `POST /api/links`.
///
/// Field validation happens in the registry so that every caller gets the
/// same rules.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub url: String,

    /// Optional custom short code.
    pub custom_code: Option<String>,

    /// Optional lifetime in hours; non-positive values mean no expiry.
    pub expires_in_hours: Option<f64>,
}

impl CreateLinkRequest {
    /// Custom code with empty strings treated as absent.
    pub fn custom_code(&self) -> Option<&str> {
        self.custom_code.as_deref().filter(|c| !c.is_empty())
    }
}

/// Link as returned right after creation.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedLink {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub short_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl CreatedLink {
    pub fn from_link(link: Link, base: &str) -> Self {
        Self {
            id: link.id,
            short_url: short_url(base, &link.code),
            url: link.url,
            short_code: link.code,
            expires_at: link.expires_at,
            created_at: link.created_at,
        }
    }
}

/// Response for `POST /api/links`.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub message: String,
    pub link: CreatedLink,
}

/// Link as returned in the owner's listing, with its click counter.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummary {
    pub id: i64,
    pub url: String,
    pub short_code: String,
    pub short_url: String,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub clicks: u64,
}

impl LinkSummary {
    pub fn from_link(link: Link, base: &str) -> Self {
        Self {
            id: link.id,
            short_url: short_url(base, &link.code),
            url: link.url,
            short_code: link.code,
            expires_at: link.expires_at,
            created_at: link.created_at,
            clicks: link.clicks,
        }
    }
}

/// Response for `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct ListLinksResponse {
    pub links: Vec<LinkSummary>,
}

/// Plain acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
