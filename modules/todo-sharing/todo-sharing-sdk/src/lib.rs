#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Todo Sharing SDK
//!
//! Public contract of the `todo_sharing` module:
//!
//! - [`TodoSharingClientV1`] - API trait for consumers
//! - [`models`] - Profiles, todos, contacts and contact requests
//! - [`SharingError`] - Errors safe to expose to callers
//!
//! Every call takes the caller's
//! [`SecurityContext`](todoshare_security::SecurityContext); the module
//! authorizes each document access against it.

pub mod api;
pub mod errors;
pub mod models;

pub use api::TodoSharingClientV1;
pub use errors::SharingError;
pub use models::{
    Contact, ContactRequest, NewTodo, ProfilePatch, Theme, Todo, TodoPatch, UserProfile,
};
