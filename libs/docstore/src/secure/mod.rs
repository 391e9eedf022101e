//! Authorization-checked access to a [`DocumentStore`](crate::DocumentStore).

mod gate;
mod secure_store;
mod secure_tx;

pub use gate::{Access, AccessError, AccessGate, Operation, UnknownOperation};
pub use secure_store::{SecureStore, SecureStoreError};
pub use secure_tx::SecureTx;
