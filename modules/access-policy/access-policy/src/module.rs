//! Access policy module.

use std::sync::{Arc, OnceLock};

use access_policy_sdk::{AccessPolicyClient, PolicyEnforcer};
use tracing::info;

use crate::config::PolicyConfig;
use crate::domain::{AccessPolicyLocalClient, Service};

/// Access policy module.
///
/// Holds the policy service once initialised and hands out the
/// [`AccessPolicyClient`] that PEPs are built from.
#[derive(Default)]
pub struct AccessPolicyModule {
    service: OnceLock<Arc<Service>>,
}

impl AccessPolicyModule {
    pub const MODULE_NAME: &'static str = "access-policy";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialise the module with its configuration and return the client.
    ///
    /// # Errors
    ///
    /// Fails if the module was already initialised.
    #[tracing::instrument(skip_all)]
    pub fn init(&self, cfg: PolicyConfig) -> anyhow::Result<Arc<dyn AccessPolicyClient>> {
        info!(
            sender_may_retract_incoming = cfg.sender_may_retract_incoming,
            max_shared_with = ?cfg.max_shared_with,
            "Initializing {} module",
            Self::MODULE_NAME
        );

        let svc = Arc::new(Service::new(cfg));
        self.service
            .set(svc.clone())
            .map_err(|_| anyhow::anyhow!("{} module already initialized", Self::MODULE_NAME))?;

        let api: Arc<dyn AccessPolicyClient> = Arc::new(AccessPolicyLocalClient::new(svc));
        info!("{} module initialized successfully", Self::MODULE_NAME);
        Ok(api)
    }

    /// Client for an initialised module, `None` before [`init`](Self::init).
    #[must_use]
    pub fn client(&self) -> Option<Arc<dyn AccessPolicyClient>> {
        self.service.get().map(|svc| {
            let api: Arc<dyn AccessPolicyClient> =
                Arc::new(AccessPolicyLocalClient::new(Arc::clone(svc)));
            api
        })
    }

    /// Shorthand: a [`PolicyEnforcer`] over a freshly initialised policy.
    ///
    /// # Errors
    ///
    /// See [`init`](Self::init).
    pub fn enforcer(cfg: PolicyConfig) -> anyhow::Result<PolicyEnforcer> {
        Ok(PolicyEnforcer::new(Self::new().init(cfg)?))
    }
}
