//! Errors surfaced by the link registry.

use thiserror::Error;

/// Failure kinds of registry operations.
///
/// A failed operation never leaves a partially created link behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Malformed destination URL, custom code or expiry.
    #[error("{0}")]
    InvalidInput(String),

    /// A live link already holds the requested custom code.
    #[error("Short code '{0}' is already in use")]
    Conflict(String),

    /// The generator could not find a free code within the retry bound.
    #[error("Could not find a free short code after {attempts} attempts")]
    ExhaustedCapacity { attempts: usize },

    /// No live link exists for the code.
    #[error("Short link not found")]
    NotFound,

    /// The link is missing or belongs to someone else.
    ///
    /// Both cases share one variant so callers cannot probe for codes they do not own.
    #[error("Link not found or unauthorized")]
    NotFoundOrUnauthorized,
}

impl RegistryError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}
