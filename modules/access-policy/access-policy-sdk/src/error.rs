//! Error types for the access policy module.

use thiserror::Error;

/// Errors that can occur when using the access policy API.
///
/// These represent infrastructure failures only.
/// Access denial is expressed via `EvaluationResponse.decision == false`,
/// not as an error variant.
#[derive(Debug, Error)]
pub enum AccessPolicyError {
    /// The policy is not available.
    #[error("service unavailable: {0}")]
    ServiceUnavailable(String),

    /// An internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}
