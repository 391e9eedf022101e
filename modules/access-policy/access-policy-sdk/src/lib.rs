#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Access Policy SDK
//!
//! This crate provides the public API for the `access_policy` module:
//!
//! - [`AccessPolicyClient`] - Public API trait for consumers
//! - [`EvaluationRequest`], [`EvaluationResponse`] - Evaluation models
//! - [`Resource`] - Classification of document paths into protected resources
//! - [`layout`] - Collection and field names of the `users/{uid}/...` tree
//! - [`AccessPolicyError`] - Error types
//! - [`pep`] - PEP helpers ([`PolicyEnforcer`] and its per-caller store gate)
//!
//! ## Usage
//!
//! ```ignore
//! use access_policy_sdk::PolicyEnforcer;
//! use docstore::secure::SecureStore;
//!
//! // Create an enforcer (once, during init)
//! let enforcer = PolicyEnforcer::new(policy_client);
//!
//! // Bind it to the caller and hand the gate to the secure store layer
//! let store = SecureStore::new(raw_store, enforcer.gate(&ctx));
//! let todo = store.get(&path).await?;
//! ```

pub mod api;
pub mod error;
pub mod layout;
pub mod models;
pub mod pep;

// Re-export main types at crate root
pub use api::AccessPolicyClient;
pub use error::AccessPolicyError;
pub use models::{DenyReason, EvaluationRequest, EvaluationResponse, Resource};
pub use pep::{EnforcerError, PolicyEnforcer};
