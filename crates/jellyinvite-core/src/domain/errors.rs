//! Domain error types
//!
//! [`ServiceError`] is the error taxonomy surfaced to callers of the
//! provisioning and synchronization operations. [`DomainError`] covers
//! construction-time validation of domain newtypes.

use thiserror::Error;

/// Errors raised by media-server operations and the use cases built on them
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// Server URL or API key could not be resolved
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Required caller input was missing or empty
    #[error("Validation failed: {0}")]
    Validation(String),

    /// An expected record or response field was absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// The remote server (or avatar service) answered with a status other than 200
    #[error("Remote API returned {status} status code")]
    RemoteApi {
        /// HTTP status code of the rejected response
        status: u16,
    },

    /// The request never produced a usable response (connect, timeout, body decode)
    #[error("Transport error: {0}")]
    Transport(String),
}

impl ServiceError {
    /// Returns the HTTP status carried by a [`ServiceError::RemoteApi`]
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteApi { status } => Some(*status),
            _ => None,
        }
    }
}

/// Errors that can occur when constructing domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid remote user identifier
    #[error("Invalid user ID: {0}")]
    InvalidUserId(String),

    /// Invalid library identifier
    #[error("Invalid library ID: {0}")]
    InvalidLibraryId(String),
}
