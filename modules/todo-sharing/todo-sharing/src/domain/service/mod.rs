//! Domain services: profiles, todos and contacts.
//!
//! Services never touch the raw store. Each call builds a
//! [`SecureStore`] bound to the caller, so every document access goes
//! through the access policy.

use std::sync::Arc;

use access_policy_sdk::PolicyEnforcer;
use docstore::secure::SecureStore;
use docstore::{DocumentStore, TxConfig};
use todoshare_security::{SecurityContext, Uid};

use super::error::DomainError;
use crate::config::TodoSharingConfig;

mod contacts;
mod profiles;
mod todos;

pub use contacts::ContactService;
pub use profiles::ProfileService;
pub use todos::TodoService;

#[cfg(test)]
mod test_support;
#[cfg(test)]
mod tests_contacts;
#[cfg(test)]
mod tests_profiles;
#[cfg(test)]
mod tests_todos;

/// Store and policy shared by the services.
#[derive(Clone)]
pub struct Storage {
    store: Arc<dyn DocumentStore>,
    enforcer: PolicyEnforcer,
    tx: TxConfig,
}

impl Storage {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, enforcer: PolicyEnforcer, tx: TxConfig) -> Self {
        Self {
            store,
            enforcer,
            tx,
        }
    }

    /// Store handle whose every access is checked for the caller in `ctx`.
    pub(crate) fn for_caller(&self, ctx: &SecurityContext) -> SecureStore {
        SecureStore::new(Arc::clone(&self.store), self.enforcer.gate(ctx))
            .with_tx_config(self.tx.clone())
    }
}

/// The authenticated caller, or [`DomainError::Unauthenticated`].
pub(crate) fn caller(ctx: &SecurityContext) -> Result<&Uid, DomainError> {
    ctx.subject_id().ok_or(DomainError::Unauthenticated)
}

/// Trim and lowercase an email address; emails are matched
/// case-insensitively.
pub(crate) fn normalize_email(raw: &str) -> Result<String, DomainError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() => Ok(email),
        _ => Err(DomainError::validation("email", "not a valid email address")),
    }
}

/// All services of the module, wired to one store and one policy.
#[derive(Clone)]
pub struct AppServices {
    pub profiles: Arc<ProfileService>,
    pub todos: Arc<TodoService>,
    pub contacts: Arc<ContactService>,
}

impl AppServices {
    #[must_use]
    pub fn new(
        store: Arc<dyn DocumentStore>,
        enforcer: PolicyEnforcer,
        config: &TodoSharingConfig,
    ) -> Self {
        let storage = Storage::new(store, enforcer, config.tx.clone());
        let profiles = Arc::new(ProfileService::new(storage.clone(), config.service.clone()));
        let todos = Arc::new(TodoService::new(storage.clone(), config.service.clone()));
        let contacts = Arc::new(ContactService::new(storage, Arc::clone(&profiles)));
        Self {
            profiles,
            todos,
            contacts,
        }
    }
}
