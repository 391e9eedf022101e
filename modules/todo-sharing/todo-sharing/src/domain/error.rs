use docstore::secure::SecureStoreError;
use docstore::{DocumentError, PathError, StoreError};
use todo_sharing_sdk::SharingError;

/// Errors of the todo sharing domain services.
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Authentication required")]
    Unauthenticated,

    #[error("Profile not found")]
    ProfileNotFound,

    #[error("Todo not found")]
    TodoNotFound,

    #[error("No user with email '{email}'")]
    UserNotFound { email: String },

    #[error("Contact request not found")]
    RequestNotFound,

    #[error("Contact not found")]
    ContactNotFound,

    #[error("Cannot send a contact request to yourself")]
    SelfRequest,

    #[error("Already contacts")]
    AlreadyContacts,

    #[error("A contact request between these users is already pending")]
    RequestPending,

    #[error("User is not one of your contacts")]
    NotAContact,

    #[error("Validation error on field '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Access forbidden")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

impl From<SecureStoreError> for DomainError {
    fn from(e: SecureStoreError) -> Self {
        match e {
            SecureStoreError::Denied { .. } => Self::Forbidden,
            SecureStoreError::NotFound { .. } | SecureStoreError::AlreadyExists { .. } => {
                Self::Conflict(e.to_string())
            }
            SecureStoreError::GateUnavailable(_) => {
                tracing::error!(error = %e, "access check failed");
                Self::Internal(e.to_string())
            }
            SecureStoreError::Store(store) => store.into(),
        }
    }
}

impl From<StoreError> for DomainError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Conflict { .. }
            | StoreError::Contention { .. }
            | StoreError::PreconditionFailed { .. } => Self::Conflict(e.to_string()),
            StoreError::Path(path) => path.into(),
            StoreError::Document(doc) => doc.into(),
            StoreError::Unavailable(_) => {
                tracing::error!(error = %e, "document store failure");
                Self::Internal(e.to_string())
            }
        }
    }
}

impl From<PathError> for DomainError {
    fn from(e: PathError) -> Self {
        Self::validation("id", e.to_string())
    }
}

impl From<DocumentError> for DomainError {
    fn from(e: DocumentError) -> Self {
        tracing::error!(error = %e, "stored document does not match its record");
        Self::Internal(e.to_string())
    }
}

impl From<DomainError> for SharingError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Unauthenticated => Self::Unauthenticated,
            DomainError::ProfileNotFound => Self::not_found("Profile"),
            DomainError::TodoNotFound => Self::not_found("Todo"),
            DomainError::UserNotFound { .. } => Self::not_found("User"),
            DomainError::RequestNotFound => Self::not_found("Contact request"),
            DomainError::ContactNotFound => Self::not_found("Contact"),
            DomainError::SelfRequest | DomainError::NotAContact => {
                Self::validation(e.to_string())
            }
            DomainError::AlreadyContacts | DomainError::RequestPending => {
                Self::conflict(e.to_string())
            }
            DomainError::Validation { field, message } => {
                Self::validation(format!("{field}: {message}"))
            }
            DomainError::Forbidden => Self::forbidden(),
            DomainError::Conflict(message) => Self::conflict(message),
            DomainError::Internal(_) => Self::internal(),
        }
    }
}
