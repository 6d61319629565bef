//! DTOs for account endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

const REQUIRED: &str = "Username and password required";

/// Request body for `POST /api/auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[serde(default)]
    #[validate(length(min = 3, message = "Username must be at least 3 characters and password at least 6 characters"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 6, message = "Username must be at least 3 characters and password at least 6 characters"))]
    pub password: String,
}

impl RegisterRequest {
    /// Distinguishes missing fields from fields that are merely too short.
    pub fn missing_fields(&self) -> Option<&'static str> {
        (self.username.is_empty() || self.password.is_empty()).then_some(REQUIRED)
    }
}

/// Request body for `POST /api/auth/login`.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "Username and password required"))]
    pub password: String,
}

/// Successful register/login response.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub username: String,
}
