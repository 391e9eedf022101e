//! Policy Enforcement Point (`PEP`) object.
//!
//! [`PolicyEnforcer`] encapsulates the full PEP flow:
//! build evaluation request → call PDP → permit or deny.
//!
//! Constructed once during service initialisation with the policy client.

use std::sync::Arc;

use docstore::secure::{Access, AccessGate};
use todoshare_security::{SecurityContext, Uid};

use crate::api::AccessPolicyClient;
use crate::error::AccessPolicyError;
use crate::models::{DenyReason, EvaluationRequest};
use crate::pep::gate::CallerGate;

/// Error from the PEP enforcement flow.
#[derive(Debug, thiserror::Error)]
pub enum EnforcerError {
    /// The PDP explicitly denied access.
    #[error("access denied by policy")]
    Denied {
        /// Optional deny reason from the PDP.
        deny_reason: Option<DenyReason>,
    },

    /// The policy evaluation call failed.
    #[error("policy evaluation failed: {0}")]
    EvaluationFailed(#[from] AccessPolicyError),
}

/// Policy Enforcement Point.
///
/// Holds the policy client. Constructed once during service init;
/// cloneable and cheap to pass around (`Arc` inside).
///
/// # Example
///
/// ```ignore
/// let enforcer = PolicyEnforcer::new(policy.clone());
///
/// enforcer.check(&ctx, &Access::get(&path, existing.as_ref())).await?;
///
/// // or, for the store layer:
/// let gate = enforcer.gate(&ctx);
/// ```
#[derive(Clone)]
pub struct PolicyEnforcer {
    policy: Arc<dyn AccessPolicyClient>,
}

impl PolicyEnforcer {
    /// Create a new enforcer.
    pub fn new(policy: Arc<dyn AccessPolicyClient>) -> Self {
        Self { policy }
    }

    /// Build an evaluation request for one access by the caller in `ctx`.
    #[must_use]
    pub fn build_request(&self, ctx: &SecurityContext, access: &Access<'_>) -> EvaluationRequest {
        EvaluationRequest {
            subject: ctx.subject_id().cloned(),
            operation: access.operation,
            path: access.path.clone(),
            collection_group: access.collection_group,
            existing: access.existing.cloned(),
            proposed: access.proposed.cloned(),
        }
    }

    /// Execute the full PEP flow: build request → evaluate → enforce.
    ///
    /// # Errors
    ///
    /// - [`EnforcerError::Denied`] if the PDP refuses the access
    /// - [`EnforcerError::EvaluationFailed`] if the PDP call fails
    pub async fn check(
        &self,
        ctx: &SecurityContext,
        access: &Access<'_>,
    ) -> Result<(), EnforcerError> {
        let request = self.build_request(ctx, access);
        let response = self.policy.evaluate(request).await?;

        if !response.decision {
            tracing::debug!(
                subject = ctx.subject_id().map(Uid::as_str),
                operation = %access.operation,
                path = %access.path,
                deny_code = response.deny_reason.as_ref().map(|r| r.error_code.as_str()),
                "policy denied access"
            );
            return Err(EnforcerError::Denied {
                deny_reason: response.deny_reason,
            });
        }
        Ok(())
    }

    /// Bind this enforcer to one caller, for use as a store access gate.
    #[must_use]
    pub fn gate(&self, ctx: &SecurityContext) -> Arc<dyn AccessGate> {
        Arc::new(CallerGate::new(self.clone(), ctx.clone()))
    }
}

impl std::fmt::Debug for PolicyEnforcer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyEnforcer").finish_non_exhaustive()
    }
}
