//! Public API trait for the access policy.

use async_trait::async_trait;

use crate::error::AccessPolicyError;
use crate::models::{EvaluationRequest, EvaluationResponse};

/// Public API trait for the access policy decision point.
///
/// Injected into services acting as PEPs:
///
/// ```ignore
/// let response = policy.evaluate(request).await?;
/// if !response.decision { /* deny */ }
/// ```
#[async_trait]
pub trait AccessPolicyClient: Send + Sync {
    /// Evaluate one access.
    ///
    /// A refusal is a normal response with `decision == false`.
    ///
    /// # Errors
    ///
    /// - `ServiceUnavailable` if the policy cannot be reached
    /// - `Internal` for unexpected errors
    async fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationResponse, AccessPolicyError>;
}
