//! Optimistic read-write transactions.
//!
//! Reads go straight to the store and remember the version they saw. Writes
//! are staged locally. On commit, every read becomes a `Verify` write pinned
//! to the version it observed, followed by the staged writes, all in one
//! atomic batch. If another commit touched a read document in between, the
//! batch fails with [`StoreError::Conflict`] and
//! [`SecureStore::transaction`](crate::secure::SecureStore::transaction)
//! runs the body again from scratch.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Deserialize;

use crate::document::{Document, Snapshot};
use crate::error::StoreError;
use crate::path::DocPath;
use crate::store::DocumentStore;
use crate::write::{Precondition, Write};

/// Transaction retry settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TxConfig {
    /// Attempts before giving up on a contended transaction.
    pub max_attempts: u32,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self { max_attempts: 5 }
    }
}

/// A single transaction attempt.
pub struct Transaction {
    store: Arc<dyn DocumentStore>,
    reads: BTreeMap<DocPath, Option<Snapshot>>,
    writes: Vec<Write>,
}

impl Transaction {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            reads: BTreeMap::new(),
            writes: Vec::new(),
        }
    }

    /// Read a document, including the effect of writes already staged in
    /// this transaction.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub async fn get(&mut self, path: &DocPath) -> Result<Option<Document>, StoreError> {
        let base = if let Some(seen) = self.reads.get(path) {
            seen.clone()
        } else {
            let snap = self.store.get(path).await?;
            self.reads.insert(path.clone(), snap.clone());
            snap
        };
        let stored = base.map(|s| s.data);

        Ok(self
            .writes
            .iter()
            .filter(|w| &w.path == path)
            .fold(stored, |current, w| w.apply_to(current.as_ref())))
    }

    pub fn create(&mut self, path: DocPath, data: Document) {
        self.writes.push(Write::create(path, data));
    }

    pub fn set(&mut self, path: DocPath, data: Document) {
        self.writes.push(Write::set(path, data));
    }

    pub fn update(&mut self, path: DocPath, fields: Document) {
        self.writes.push(Write::update(path, fields));
    }

    pub fn delete(&mut self, path: DocPath) {
        self.writes.push(Write::delete(path));
    }

    /// Commit the staged writes, pinned to the versions read.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`] if a read document changed since it was read
    /// - [`StoreError::PreconditionFailed`] if a staged write's own
    ///   precondition fails
    pub async fn commit(self) -> Result<(), StoreError> {
        if self.writes.is_empty() {
            return Ok(());
        }

        let mut batch: Vec<Write> = self
            .reads
            .into_iter()
            .map(|(path, seen)| {
                let pin = match seen {
                    Some(s) => Precondition::Version(s.version),
                    None => Precondition::Missing,
                };
                Write::verify(path, pin)
            })
            .collect();
        batch.extend(self.writes);

        self.store.commit(batch).await
    }
}
