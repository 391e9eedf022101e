use std::sync::Arc;

use crate::document::Document;
use crate::path::DocPath;
use crate::secure::gate::{Access, AccessGate};
use crate::secure::secure_store::SecureStoreError;
use crate::transaction::Transaction;

/// A transaction attempt whose every read and write passes the gate.
///
/// Writes read the current document first so the gate sees the existing
/// state, and so the commit is pinned to the version that was authorized.
pub struct SecureTx {
    tx: Transaction,
    gate: Arc<dyn AccessGate>,
}

impl SecureTx {
    pub(crate) fn new(tx: Transaction, gate: Arc<dyn AccessGate>) -> Self {
        Self { tx, gate }
    }

    pub(crate) fn into_inner(self) -> Transaction {
        self.tx
    }

    /// Read a document.
    ///
    /// # Errors
    ///
    /// - [`SecureStoreError::Denied`] if the caller may not read it
    /// - [`SecureStoreError::Store`] on store failure
    pub async fn get(&mut self, path: &DocPath) -> Result<Option<Document>, SecureStoreError> {
        let existing = self.tx.get(path).await?;
        let access = Access::get(path, existing.as_ref());
        self.gate
            .check(&access)
            .await
            .map_err(|e| SecureStoreError::from_gate(e, &access))?;
        Ok(existing)
    }

    /// Stage creation of a document that must not exist yet.
    ///
    /// The gate is asked first, so a refused caller learns nothing about
    /// whether the document exists.
    ///
    /// # Errors
    ///
    /// - [`SecureStoreError::Denied`] if the caller may not create it
    /// - [`SecureStoreError::AlreadyExists`] if the document exists
    pub async fn create(&mut self, path: DocPath, data: Document) -> Result<(), SecureStoreError> {
        let access = Access::create(&path, &data);
        self.gate
            .check(&access)
            .await
            .map_err(|e| SecureStoreError::from_gate(e, &access))?;
        if self.tx.get(&path).await?.is_some() {
            return Err(SecureStoreError::AlreadyExists { path });
        }
        self.tx.create(path, data);
        Ok(())
    }

    /// Stage a full replace; checked as a create when the document is
    /// missing and as an update otherwise.
    ///
    /// # Errors
    ///
    /// - [`SecureStoreError::Denied`] if the caller may not write it
    pub async fn set(&mut self, path: DocPath, data: Document) -> Result<(), SecureStoreError> {
        let existing = self.tx.get(&path).await?;
        let access = match existing.as_ref() {
            Some(current) => Access::update(&path, current, &data),
            None => Access::create(&path, &data),
        };
        self.gate
            .check(&access)
            .await
            .map_err(|e| SecureStoreError::from_gate(e, &access))?;
        self.tx.set(path, data);
        Ok(())
    }

    /// Stage a field merge into an existing document.
    ///
    /// # Errors
    ///
    /// - [`SecureStoreError::Denied`] if the caller may not update it, or
    ///   may not read it when it is missing
    /// - [`SecureStoreError::NotFound`] if the document is missing
    pub async fn update(
        &mut self,
        path: DocPath,
        fields: Document,
    ) -> Result<Document, SecureStoreError> {
        let Some(existing) = self.tx.get(&path).await? else {
            let access = Access::get(&path, None);
            self.gate
                .check(&access)
                .await
                .map_err(|e| SecureStoreError::from_gate(e, &access))?;
            return Err(SecureStoreError::NotFound { path });
        };
        let mut proposed = existing.clone();
        proposed.merge(&fields);
        let access = Access::update(&path, &existing, &proposed);
        self.gate
            .check(&access)
            .await
            .map_err(|e| SecureStoreError::from_gate(e, &access))?;
        self.tx.update(path, fields);
        Ok(proposed)
    }

    /// Stage deletion of a document; deleting a missing one is allowed if
    /// the gate allows it.
    ///
    /// # Errors
    ///
    /// - [`SecureStoreError::Denied`] if the caller may not delete it
    pub async fn delete(&mut self, path: DocPath) -> Result<(), SecureStoreError> {
        let existing = self.tx.get(&path).await?;
        let access = Access::delete(&path, existing.as_ref());
        self.gate
            .check(&access)
            .await
            .map_err(|e| SecureStoreError::from_gate(e, &access))?;
        self.tx.delete(path);
        Ok(())
    }
}
