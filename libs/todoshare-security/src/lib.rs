#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Caller identity for the todo sharing core.
//!
//! - [`Uid`] - opaque identifier assigned by the identity provider
//! - [`SecurityContext`] - the authenticated caller of one request
pub mod context;
pub mod uid;

pub use context::{SecurityContext, SecurityContextBuilder};
pub use uid::{InvalidUid, Uid};
