use crate::document::DocumentError;
use crate::path::{DocPath, PathError};

/// Errors returned by a [`DocumentStore`](crate::DocumentStore).
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A write precondition on `path` did not hold; the batch was not applied.
    #[error("precondition failed for '{path}': {reason}")]
    PreconditionFailed { path: DocPath, reason: String },

    /// A document read inside a transaction changed before commit.
    #[error("transaction conflict on '{path}'")]
    Conflict { path: DocPath },

    /// The transaction kept conflicting and was given up.
    #[error("transaction aborted after {attempts} attempts")]
    Contention { attempts: u32 },

    #[error(transparent)]
    Path(#[from] PathError),

    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The backing store is not reachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    #[must_use]
    pub fn precondition(path: &DocPath, reason: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            path: path.clone(),
            reason: reason.into(),
        }
    }

    /// Whether the failure is a commit race that a retry may resolve.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict { .. })
    }
}
