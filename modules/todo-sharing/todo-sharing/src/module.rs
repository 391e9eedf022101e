//! Todo sharing module.

use std::sync::{Arc, OnceLock};

use access_policy_sdk::{AccessPolicyClient, PolicyEnforcer};
use docstore::DocumentStore;
use todo_sharing_sdk::TodoSharingClientV1;
use tracing::info;

use crate::config::TodoSharingConfig;
use crate::domain::{AppServices, TodoSharingLocalClient};

/// Todo sharing module.
///
/// Wires the services to a document store and an access policy client,
/// both injected by the host.
#[derive(Default)]
pub struct TodoSharingModule {
    services: OnceLock<AppServices>,
}

impl TodoSharingModule {
    pub const MODULE_NAME: &'static str = "todo-sharing";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialise the module and return its client.
    ///
    /// # Errors
    ///
    /// Fails if the module was already initialised.
    #[tracing::instrument(skip_all)]
    pub fn init(
        &self,
        store: Arc<dyn DocumentStore>,
        policy: Arc<dyn AccessPolicyClient>,
        cfg: &TodoSharingConfig,
    ) -> anyhow::Result<Arc<dyn TodoSharingClientV1>> {
        info!(
            max_content_length = cfg.service.max_content_length,
            max_attempts = cfg.tx.max_attempts,
            "Initializing {} module",
            Self::MODULE_NAME
        );

        let services = AppServices::new(store, PolicyEnforcer::new(policy), cfg);
        self.services
            .set(services.clone())
            .map_err(|_| anyhow::anyhow!("{} module already initialized", Self::MODULE_NAME))?;

        let api: Arc<dyn TodoSharingClientV1> = Arc::new(TodoSharingLocalClient::new(services));
        info!("{} module initialized successfully", Self::MODULE_NAME);
        Ok(api)
    }

    /// Client for an initialised module, `None` before [`init`](Self::init).
    #[must_use]
    pub fn client(&self) -> Option<Arc<dyn TodoSharingClientV1>> {
        self.services.get().map(|services| {
            let api: Arc<dyn TodoSharingClientV1> =
                Arc::new(TodoSharingLocalClient::new(services.clone()));
            api
        })
    }
}
