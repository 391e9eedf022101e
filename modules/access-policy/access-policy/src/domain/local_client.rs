//! Local (in-process) client for the access policy.

use std::sync::Arc;

use access_policy_sdk::{
    AccessPolicyClient, AccessPolicyError, EvaluationRequest, EvaluationResponse,
};
use async_trait::async_trait;

use super::Service;

/// Local client wrapping the service.
pub struct AccessPolicyLocalClient {
    svc: Arc<Service>,
}

impl AccessPolicyLocalClient {
    #[must_use]
    pub fn new(svc: Arc<Service>) -> Self {
        Self { svc }
    }
}

#[async_trait]
impl AccessPolicyClient for AccessPolicyLocalClient {
    async fn evaluate(
        &self,
        request: EvaluationRequest,
    ) -> Result<EvaluationResponse, AccessPolicyError> {
        Ok(self.svc.evaluate(&request))
    }
}
