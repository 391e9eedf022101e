//! In-process [`DocumentStore`] backed by an ordered map.

use std::collections::BTreeMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::document::{Document, Snapshot};
use crate::error::StoreError;
use crate::path::DocPath;
use crate::query::Query;
use crate::store::DocumentStore;
use crate::write::{Precondition, Write, WriteKind};

#[derive(Clone, Debug)]
struct Stored {
    data: Document,
    version: u64,
}

#[derive(Default)]
struct State {
    docs: BTreeMap<DocPath, Stored>,
    /// Version assigned to the last commit.
    clock: u64,
}

/// Thread-safe in-memory document store.
///
/// Commits are serialised by a write lock; every commit gets the next value
/// of a monotonic clock, which becomes the version of each document it wrote.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.read().docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All stored paths, ordered.
    #[must_use]
    pub fn paths(&self) -> Vec<DocPath> {
        self.state.read().docs.keys().cloned().collect()
    }

    #[must_use]
    pub fn contains(&self, path: &DocPath) -> bool {
        self.state.read().docs.contains_key(path)
    }
}

fn check(write: &Write, current: Option<&Stored>) -> Result<(), StoreError> {
    let ok = match write.precondition {
        Precondition::None => true,
        Precondition::Exists => current.is_some(),
        Precondition::Missing => current.is_none(),
        Precondition::Version(v) => current.is_some_and(|c| c.version == v),
    };
    if ok {
        return Ok(());
    }
    let raced = matches!(write.kind, WriteKind::Verify)
        || matches!(write.precondition, Precondition::Version(_));
    if raced {
        return Err(StoreError::Conflict {
            path: write.path.clone(),
        });
    }
    let reason = match write.precondition {
        Precondition::Missing => "document already exists",
        _ => "document does not exist",
    };
    Err(StoreError::precondition(&write.path, reason))
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &DocPath) -> Result<Option<Snapshot>, StoreError> {
        let state = self.state.read();
        Ok(state.docs.get(path).map(|s| Snapshot {
            path: path.clone(),
            data: s.data.clone(),
            version: s.version,
        }))
    }

    async fn query(&self, query: &Query) -> Result<Vec<Snapshot>, StoreError> {
        let state = self.state.read();
        Ok(state
            .docs
            .iter()
            .map(|(path, s)| Snapshot {
                path: path.clone(),
                data: s.data.clone(),
                version: s.version,
            })
            .filter(|snap| query.matches(snap))
            .collect())
    }

    async fn commit(&self, writes: Vec<Write>) -> Result<(), StoreError> {
        let mut state = self.state.write();

        // Stage against an overlay so a failed precondition leaves no trace.
        let mut overlay: BTreeMap<DocPath, Option<Stored>> = BTreeMap::new();
        for write in &writes {
            let current = match overlay.get(&write.path) {
                Some(staged) => staged.clone(),
                None => state.docs.get(&write.path).cloned(),
            };
            check(write, current.as_ref())?;
            if matches!(write.kind, WriteKind::Verify) {
                continue;
            }
            if matches!(write.kind, WriteKind::Update(_)) && current.is_none() {
                return Err(StoreError::precondition(
                    &write.path,
                    "document does not exist",
                ));
            }
            let next = write
                .apply_to(current.as_ref().map(|c| &c.data))
                .map(|data| Stored { data, version: 0 });
            overlay.insert(write.path.clone(), next);
        }

        state.clock += 1;
        let version = state.clock;
        for (path, staged) in overlay {
            match staged {
                Some(mut stored) => {
                    stored.version = version;
                    state.docs.insert(path, stored);
                }
                None => {
                    state.docs.remove(&path);
                }
            }
        }
        tracing::trace!(version, writes = writes.len(), "batch committed");
        Ok(())
    }
}
