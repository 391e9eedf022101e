//! The store contract.

use async_trait::async_trait;

use crate::document::Snapshot;
use crate::error::StoreError;
use crate::path::DocPath;
use crate::query::Query;
use crate::write::Write;

/// A hierarchical document store.
///
/// Implementations must apply a [`commit`](Self::commit) batch atomically:
/// every precondition is checked against the state before any write is
/// applied, and either all writes become visible or none do.
///
/// This trait performs no authorization. Services reach it through
/// [`SecureStore`](crate::secure::SecureStore), which checks every access
/// with an [`AccessGate`](crate::secure::AccessGate) first.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn get(&self, path: &DocPath) -> Result<Option<Snapshot>, StoreError>;

    /// Run a collection or collection-group query. Results are ordered by path.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Unavailable`] if the store cannot be reached.
    async fn query(&self, query: &Query) -> Result<Vec<Snapshot>, StoreError>;

    /// Apply a batch of writes atomically.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`] if a `Verify` write or a `Version`
    ///   precondition fails (a concurrent commit got there first)
    /// - [`StoreError::PreconditionFailed`] for any other failed precondition
    async fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError>;
}
