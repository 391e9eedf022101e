//! Domain layer for the access policy.

pub mod local_client;
pub mod rules;
pub mod service;

pub use local_client::AccessPolicyLocalClient;
pub use service::Service;
