//! Hierarchical document store.
//!
//! Documents live at paths like `users/A/todos/42` and hold a JSON object
//! body. The crate provides:
//!
//! - [`DocumentStore`]: get, collection and collection-group queries, and
//!   atomic write batches with per-write preconditions
//! - [`MemoryStore`]: the in-process implementation
//! - [`Transaction`]: one attempt of an optimistic read-write transaction
//! - [`secure`]: the same operations with every access checked by an
//!   [`AccessGate`](secure::AccessGate)

pub mod document;
pub mod error;
pub mod memory;
pub mod path;
pub mod query;
pub mod secure;
pub mod store;
pub mod transaction;
pub mod write;

pub use document::{Document, DocumentError, Snapshot};
pub use error::StoreError;
pub use memory::MemoryStore;
pub use path::{CollectionPath, DocPath, PathError};
pub use query::{FieldFilter, Query, QueryTarget};
pub use store::DocumentStore;
pub use transaction::{Transaction, TxConfig};
pub use write::{Precondition, Write, WriteKind};
