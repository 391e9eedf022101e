//! Public error types for the `todo_sharing` module.
//!
//! These errors are safe to expose to other modules and consumers. A refused
//! access is always [`SharingError::Forbidden`], without naming the rule.

use thiserror::Error;

/// Errors that can be returned by the `TodoSharingClientV1`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharingError {
    /// The caller is not signed in.
    #[error("Authentication required")]
    Unauthenticated,

    /// Resource was not found.
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The operation clashes with existing state (already contacts, request
    /// pending, document already exists, contended transaction).
    #[error("Conflict: {message}")]
    Conflict { message: String },

    /// Validation error with the provided data.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Access denied (authorization failure).
    #[error("Access denied")]
    Forbidden,

    /// An internal error occurred.
    #[error("Internal error")]
    Internal,
}

impl SharingError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    #[must_use]
    pub fn forbidden() -> Self {
        Self::Forbidden
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::Internal
    }
}
