use async_trait::async_trait;
use docstore::secure::{Access, AccessError, AccessGate};
use todoshare_security::SecurityContext;

use crate::pep::enforcer::{EnforcerError, PolicyEnforcer};

/// A [`PolicyEnforcer`] bound to one caller.
///
/// Created by [`PolicyEnforcer::gate`] and handed to
/// [`SecureStore`](docstore::secure::SecureStore), which calls it before
/// every read and write it performs on the caller's behalf.
pub struct CallerGate {
    enforcer: PolicyEnforcer,
    ctx: SecurityContext,
}

impl CallerGate {
    #[must_use]
    pub fn new(enforcer: PolicyEnforcer, ctx: SecurityContext) -> Self {
        Self { enforcer, ctx }
    }
}

#[async_trait]
impl AccessGate for CallerGate {
    async fn check(&self, access: &Access<'_>) -> Result<(), AccessError> {
        self.enforcer
            .check(&self.ctx, access)
            .await
            .map_err(|e| match e {
                EnforcerError::Denied { .. } => AccessError::Denied,
                EnforcerError::EvaluationFailed(err) => AccessError::Unavailable(err.to_string()),
            })
    }
}
