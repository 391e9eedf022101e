//! Shared fixtures for the service tests: an in-memory store behind the
//! real access policy.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use access_policy::{AccessPolicyModule, PolicyConfig};
use docstore::{DocPath, MemoryStore};
use todoshare_security::{SecurityContext, Uid};

use super::AppServices;
use crate::config::TodoSharingConfig;

pub(super) fn uid(s: &str) -> Uid {
    Uid::new(s).unwrap()
}

pub(super) fn ctx(id: &str, email: &str) -> SecurityContext {
    SecurityContext::builder()
        .subject_id(uid(id))
        .email(email)
        .build()
}

pub(super) struct Harness {
    pub store: Arc<MemoryStore>,
    pub services: AppServices,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_policy(PolicyConfig::default(), TodoSharingConfig::default())
    }

    pub fn with_policy(policy: PolicyConfig, cfg: TodoSharingConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        let enforcer = AccessPolicyModule::enforcer(policy).unwrap();
        let services = AppServices::new(store.clone(), enforcer, &cfg);
        Self { store, services }
    }

    /// A signed-in user with a profile.
    pub async fn user(&self, id: &str, email: &str) -> SecurityContext {
        let ctx = ctx(id, email);
        self.services
            .profiles
            .ensure_profile(&ctx, None)
            .await
            .unwrap();
        ctx
    }

    /// Two users who are already contacts.
    pub async fn contacts(&self) -> (SecurityContext, SecurityContext) {
        let a = self.user("A", "a@x.com").await;
        let b = self.user("B", "b@x.com").await;
        self.services
            .contacts
            .send_contact_request(&a, "b@x.com")
            .await
            .unwrap();
        self.services
            .contacts
            .accept_contact_request(&b, &uid("A"))
            .await
            .unwrap();
        (a, b)
    }

    pub fn exists(&self, path: &str) -> bool {
        self.store.contains(&DocPath::parse(path).unwrap())
    }
}
