#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Todo sharing module.
//!
//! Implements [`TodoSharingClientV1`](todo_sharing_sdk::TodoSharingClientV1)
//! on top of a [`DocumentStore`](docstore::DocumentStore). Every document
//! access is checked by the access policy on behalf of the caller, and the
//! multi-document contact workflows commit as single transactions.

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::{ServiceConfig, TodoSharingConfig};
pub use module::TodoSharingModule;
