//! Account registration, login and bearer token verification.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, warn};

use crate::domain::entities::NewUser;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::infrastructure::security::{JwtKeys, hash_password, verify_password};

/// Issued credentials for an account.
#[derive(Debug, Clone)]
pub struct Session {
    pub username: String,
    pub token: String,
}

/// Service for authenticating users and API requests.
///
/// Passwords are hashed with argon2 on a blocking thread; tokens are HS256
/// JWTs whose subject is the username. The resulting identity is what the
/// link registry uses for ownership.
pub struct AuthService<R: UserRepository> {
    repository: Arc<R>,
    keys: JwtKeys,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(repository: Arc<R>, keys: JwtKeys) -> Self {
        Self { repository, keys }
    }

    /// Creates an account and signs a token for it.
    ///
    /// Length rules on username and password are enforced by the request DTO.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is taken.
    /// Returns [`AppError::Internal`] if hashing or signing fails.
    pub async fn register(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let password_hash = run_blocking_hash(password.to_string()).await?;

        let user = self
            .repository
            .create(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        self.session_for(user.username)
    }

    /// Verifies credentials and signs a token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for unknown users and wrong passwords
    /// alike.
    pub async fn login(&self, username: &str, password: &str) -> Result<Session, AppError> {
        let invalid = || AppError::unauthorized("Invalid credentials", json!({}));

        let Some(user) = self.repository.find_by_username(username).await else {
            warn!(username, "login for unknown user");
            return Err(invalid());
        };

        let plain = password.to_string();
        let hash = user.password_hash.clone();
        let valid = tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
            .await
            .map_err(|e| {
                error!(error = %e, "password verification task failed");
                AppError::internal("Internal server error", json!({}))
            })?
            .map_err(|_| invalid())?;

        if !valid {
            warn!(username, "login with wrong password");
            return Err(invalid());
        }

        self.session_for(user.username)
    }

    /// Verifies a bearer token and returns the identity it carries.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for malformed, forged or expired tokens.
    pub fn authenticate(&self, token: &str) -> Result<String, AppError> {
        self.keys.verify(token).map(|claims| claims.sub).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            AppError::unauthorized(
                "Unauthorized",
                json!({ "reason": "Invalid or expired token" }),
            )
        })
    }

    fn session_for(&self, username: String) -> Result<Session, AppError> {
        let token = self.keys.sign(&username).map_err(|e| {
            error!(error = %e, "failed to sign token");
            AppError::internal("Internal server error", json!({}))
        })?;

        Ok(Session { username, token })
    }
}

async fn run_blocking_hash(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            error!(error = %e, "password hashing task failed");
            AppError::internal("Internal server error", json!({}))
        })?
        .map_err(|_| AppError::internal("Internal server error", json!({})))
}
