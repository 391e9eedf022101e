use std::sync::Arc;

use futures::future::BoxFuture;

use crate::document::{Document, Snapshot};
use crate::error::StoreError;
use crate::path::DocPath;
use crate::query::Query;
use crate::secure::gate::{Access, AccessError, AccessGate, Operation};
use crate::secure::secure_tx::SecureTx;
use crate::store::DocumentStore;
use crate::transaction::{Transaction, TxConfig};

/// Errors from the secure store layer.
///
/// `Denied` displays no detail beyond "permission denied"; the operation and
/// path are kept for server-side logging only.
#[derive(Debug, thiserror::Error)]
pub enum SecureStoreError {
    #[error("permission denied")]
    Denied { operation: Operation, path: DocPath },

    #[error("document '{path}' not found")]
    NotFound { path: DocPath },

    #[error("document '{path}' already exists")]
    AlreadyExists { path: DocPath },

    #[error("access check unavailable: {0}")]
    GateUnavailable(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SecureStoreError {
    pub(crate) fn from_gate(err: AccessError, access: &Access<'_>) -> Self {
        match err {
            AccessError::Denied => {
                tracing::debug!(
                    operation = %access.operation,
                    path = %access.path,
                    collection_group = access.collection_group,
                    "access denied"
                );
                Self::Denied {
                    operation: access.operation,
                    path: access.path.clone(),
                }
            }
            AccessError::Unavailable(reason) => Self::GateUnavailable(reason),
        }
    }

    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }
}

/// Store handle that checks every access through a caller-bound gate.
///
/// Build one per caller: `SecureStore::new(store, enforcer.gate(ctx))`.
/// Nothing reachable from here touches the inner store without a check.
#[derive(Clone)]
pub struct SecureStore {
    store: Arc<dyn DocumentStore>,
    gate: Arc<dyn AccessGate>,
    tx_config: TxConfig,
}

impl SecureStore {
    pub fn new(store: Arc<dyn DocumentStore>, gate: Arc<dyn AccessGate>) -> Self {
        Self {
            store,
            gate,
            tx_config: TxConfig::default(),
        }
    }

    #[must_use]
    pub fn with_tx_config(mut self, tx_config: TxConfig) -> Self {
        self.tx_config = tx_config;
        self
    }

    /// Read one document.
    ///
    /// The gate sees the stored document, or `None` when it is missing.
    ///
    /// # Errors
    ///
    /// - [`SecureStoreError::Denied`] if the caller may not read it
    /// - [`SecureStoreError::Store`] on store failure
    pub async fn get(&self, path: &DocPath) -> Result<Option<Snapshot>, SecureStoreError> {
        let snap = self.store.get(path).await?;
        let access = Access::get(path, snap.as_ref().map(|s| &s.data));
        self.gate
            .check(&access)
            .await
            .map_err(|e| SecureStoreError::from_gate(e, &access))?;
        Ok(snap)
    }

    /// Run a query. Fails closed: if any matched document is not readable by
    /// the caller, the whole query is denied and nothing is returned.
    ///
    /// # Errors
    ///
    /// - [`SecureStoreError::Denied`] if any result is not readable
    /// - [`SecureStoreError::Store`] on store failure
    pub async fn query(&self, query: &Query) -> Result<Vec<Snapshot>, SecureStoreError> {
        let results = self.store.query(query).await?;
        let group = query.is_collection_group();
        for snap in &results {
            let access = Access::list(&snap.path, &snap.data, group);
            self.gate
                .check(&access)
                .await
                .map_err(|e| SecureStoreError::from_gate(e, &access))?;
        }
        Ok(results)
    }

    /// Create a document that must not exist yet.
    ///
    /// # Errors
    ///
    /// See [`SecureTx::create`].
    pub async fn create(&self, path: DocPath, data: Document) -> Result<(), SecureStoreError> {
        self.transaction(move |tx| {
            let (path, data) = (path.clone(), data.clone());
            Box::pin(async move { tx.create(path, data).await })
        })
        .await
    }

    /// Replace a document.
    ///
    /// # Errors
    ///
    /// See [`SecureTx::set`].
    pub async fn set(&self, path: DocPath, data: Document) -> Result<(), SecureStoreError> {
        self.transaction(move |tx| {
            let (path, data) = (path.clone(), data.clone());
            Box::pin(async move { tx.set(path, data).await })
        })
        .await
    }

    /// Merge fields into an existing document; returns the merged document.
    ///
    /// # Errors
    ///
    /// See [`SecureTx::update`].
    pub async fn update(
        &self,
        path: DocPath,
        fields: Document,
    ) -> Result<Document, SecureStoreError> {
        self.transaction(move |tx| {
            let (path, fields) = (path.clone(), fields.clone());
            Box::pin(async move { tx.update(path, fields).await })
        })
        .await
    }

    /// Delete a document.
    ///
    /// # Errors
    ///
    /// See [`SecureTx::delete`].
    pub async fn delete(&self, path: DocPath) -> Result<(), SecureStoreError> {
        self.transaction(move |tx| {
            let path = path.clone();
            Box::pin(async move { tx.delete(path).await })
        })
        .await
    }

    /// Run `body` atomically with every access gated.
    ///
    /// The body may run more than once on commit conflicts; an error from
    /// the body aborts with nothing written.
    ///
    /// # Errors
    ///
    /// - whatever `body` returns
    /// - [`StoreError::Contention`] (converted into `E`) when retries run out
    pub async fn transaction<T, E, F>(&self, mut body: F) -> Result<T, E>
    where
        T: Send,
        E: From<SecureStoreError> + Send,
        F: for<'a> FnMut(&'a mut SecureTx) -> BoxFuture<'a, Result<T, E>> + Send,
    {
        let attempts = self.tx_config.max_attempts.max(1);
        for attempt in 1..=attempts {
            let mut tx = SecureTx::new(
                Transaction::new(Arc::clone(&self.store)),
                Arc::clone(&self.gate),
            );
            let value = body(&mut tx).await?;
            match tx.into_inner().commit().await {
                Ok(()) => return Ok(value),
                Err(e) if e.is_conflict() => {
                    tracing::warn!(attempt, error = %e, "secure transaction conflict, retrying");
                }
                Err(e) => return Err(SecureStoreError::from(e).into()),
            }
        }
        let exhausted = SecureStoreError::from(StoreError::Contention { attempts });
        Err(exhausted.into())
    }
}
