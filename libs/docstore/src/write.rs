//! Atomic write batches.

use crate::document::Document;
use crate::path::DocPath;

/// Condition that must hold on the current state of a document for its
/// write to be applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Precondition {
    /// Always applies.
    None,
    /// The document must exist.
    Exists,
    /// The document must not exist.
    Missing,
    /// The document must still be at this commit version.
    Version(u64),
}

#[derive(Clone, Debug, PartialEq)]
pub enum WriteKind {
    /// Create a new document; fails if it exists.
    Create(Document),
    /// Replace the document, creating it if needed.
    Set(Document),
    /// Merge fields into an existing document; fails if it is missing.
    Update(Document),
    /// Remove the document. Deleting a missing document is a no-op.
    Delete,
    /// Check the precondition only.
    Verify,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Write {
    pub path: DocPath,
    pub kind: WriteKind,
    pub precondition: Precondition,
}

impl Write {
    #[must_use]
    pub fn create(path: DocPath, data: Document) -> Self {
        Self {
            path,
            kind: WriteKind::Create(data),
            precondition: Precondition::Missing,
        }
    }

    #[must_use]
    pub fn set(path: DocPath, data: Document) -> Self {
        Self {
            path,
            kind: WriteKind::Set(data),
            precondition: Precondition::None,
        }
    }

    #[must_use]
    pub fn update(path: DocPath, fields: Document) -> Self {
        Self {
            path,
            kind: WriteKind::Update(fields),
            precondition: Precondition::Exists,
        }
    }

    #[must_use]
    pub fn delete(path: DocPath) -> Self {
        Self {
            path,
            kind: WriteKind::Delete,
            precondition: Precondition::None,
        }
    }

    #[must_use]
    pub fn verify(path: DocPath, precondition: Precondition) -> Self {
        Self {
            path,
            kind: WriteKind::Verify,
            precondition,
        }
    }

    /// Tighten the precondition of this write.
    #[must_use]
    pub fn with_precondition(mut self, precondition: Precondition) -> Self {
        self.precondition = precondition;
        self
    }

    /// State of the document after this write, given its state before.
    #[must_use]
    pub fn apply_to(&self, current: Option<&Document>) -> Option<Document> {
        match &self.kind {
            WriteKind::Create(doc) | WriteKind::Set(doc) => Some(doc.clone()),
            WriteKind::Update(fields) => current.map(|c| {
                let mut merged = c.clone();
                merged.merge(fields);
                merged
            }),
            WriteKind::Delete => None,
            WriteKind::Verify => current.cloned(),
        }
    }
}
