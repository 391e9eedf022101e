//! Access Policy Module
//!
//! The policy decision point for the `users/{uid}/...` document tree: a pure
//! rule table ([`domain::rules`]) behind the
//! [`AccessPolicyClient`](access_policy_sdk::AccessPolicyClient) API.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod config;
pub mod domain;
pub mod module;

pub use config::PolicyConfig;
pub use domain::rules::{DenyCode, permit};
pub use module::AccessPolicyModule;
