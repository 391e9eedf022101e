//! Domain service for the access policy.

use access_policy_sdk::{DenyReason, EvaluationRequest, EvaluationResponse};
use docstore::secure::Access;

use super::rules;
use crate::config::PolicyConfig;

/// Access policy service.
///
/// Stateless apart from its configuration; every decision is a call to
/// [`rules::evaluate`].
#[derive(Debug, Default)]
pub struct Service {
    config: PolicyConfig,
}

impl Service {
    #[must_use]
    pub fn new(config: PolicyConfig) -> Self {
        Self { config }
    }

    /// Evaluate an access request.
    #[must_use]
    pub fn evaluate(&self, request: &EvaluationRequest) -> EvaluationResponse {
        let access = Access {
            operation: request.operation,
            path: &request.path,
            collection_group: request.collection_group,
            existing: request.existing.as_ref(),
            proposed: request.proposed.as_ref(),
        };

        match rules::evaluate(&self.config, request.subject.as_ref(), &access) {
            Ok(()) => EvaluationResponse::allow(),
            Err(code) => {
                tracing::debug!(
                    operation = %request.operation,
                    path = %request.path,
                    collection_group = request.collection_group,
                    deny_code = code.as_str(),
                    "access refused"
                );
                EvaluationResponse::deny(DenyReason::new(code.as_str()))
            }
        }
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use docstore::secure::Operation;
    use docstore::{DocPath, Document};
    use serde_json::json;
    use todoshare_security::Uid;
    use tracing_test::traced_test;

    use super::*;

    fn request(subject: &str, op: Operation, path: &str) -> EvaluationRequest {
        EvaluationRequest {
            subject: Some(Uid::new(subject).unwrap()),
            operation: op,
            path: DocPath::parse(path).unwrap(),
            collection_group: false,
            existing: None,
            proposed: None,
        }
    }

    #[test]
    fn allow_has_no_reason() {
        let svc = Service::default();
        let response = svc.evaluate(&request("A", Operation::Get, "users/A/todos/1"));
        assert_eq!(response, EvaluationResponse::allow());
    }

    #[traced_test]
    #[test]
    fn deny_carries_code_and_logs_it() {
        let svc = Service::default();
        let mut req = request("C", Operation::Get, "users/A/todos/1");
        req.existing = Some(Document::new().with("sharedWith", json!(["B"])));

        let response = svc.evaluate(&req);

        assert!(!response.decision);
        assert_eq!(
            response.deny_reason.map(|r| r.error_code),
            Some("NOT_SHARED".to_owned())
        );
        assert!(logs_contain("access refused"));
        assert!(logs_contain("NOT_SHARED"));
    }

    #[test]
    fn configuration_is_applied() {
        let strict = Service::new(PolicyConfig::strict());
        let lenient = Service::default();
        let req = request("S", Operation::Delete, "users/R/incomingContactRequests/S");

        assert!(!strict.evaluate(&req).decision);
        assert!(lenient.evaluate(&req).decision);
    }
}
