use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::path::DocPath;

/// Kind of access to a single document.
///
/// `Get` and `List` are reads; `Create`, `Update` and `Delete` are writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Get,
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    #[must_use]
    pub fn is_read(self) -> bool {
        matches!(self, Self::Get | Self::List)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::List => "list",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown operation name.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown operation '{0}' (expected get, list, create, update or delete)")]
pub struct UnknownOperation(String);

impl FromStr for Operation {
    type Err = UnknownOperation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "get" => Ok(Self::Get),
            "list" => Ok(Self::List),
            "create" => Ok(Self::Create),
            "update" => Ok(Self::Update),
            "delete" => Ok(Self::Delete),
            other => Err(UnknownOperation(other.to_owned())),
        }
    }
}

/// One attempted access, as seen by an [`AccessGate`].
///
/// `existing` is the stored document (`None` if missing); `proposed` is the
/// document as it would be after a write (`None` for reads and deletes).
#[derive(Clone, Copy, Debug)]
pub struct Access<'a> {
    pub operation: Operation,
    pub path: &'a DocPath,
    /// Reached through a collection-group query rather than its own path.
    pub collection_group: bool,
    pub existing: Option<&'a Document>,
    pub proposed: Option<&'a Document>,
}

impl<'a> Access<'a> {
    #[must_use]
    pub fn get(path: &'a DocPath, existing: Option<&'a Document>) -> Self {
        Self {
            operation: Operation::Get,
            path,
            collection_group: false,
            existing,
            proposed: None,
        }
    }

    #[must_use]
    pub fn list(path: &'a DocPath, existing: &'a Document, collection_group: bool) -> Self {
        Self {
            operation: Operation::List,
            path,
            collection_group,
            existing: Some(existing),
            proposed: None,
        }
    }

    #[must_use]
    pub fn create(path: &'a DocPath, proposed: &'a Document) -> Self {
        Self {
            operation: Operation::Create,
            path,
            collection_group: false,
            existing: None,
            proposed: Some(proposed),
        }
    }

    #[must_use]
    pub fn update(path: &'a DocPath, existing: &'a Document, proposed: &'a Document) -> Self {
        Self {
            operation: Operation::Update,
            path,
            collection_group: false,
            existing: Some(existing),
            proposed: Some(proposed),
        }
    }

    #[must_use]
    pub fn delete(path: &'a DocPath, existing: Option<&'a Document>) -> Self {
        Self {
            operation: Operation::Delete,
            path,
            collection_group: false,
            existing,
            proposed: None,
        }
    }
}

/// Outcome of a refused access check.
#[derive(Debug, Clone, thiserror::Error)]
pub enum AccessError {
    /// The policy refused. Carries no detail on which rule failed.
    #[error("permission denied")]
    Denied,

    /// The policy could not be evaluated.
    #[error("access check failed: {0}")]
    Unavailable(String),
}

/// Authorization hook called before every secure store operation.
///
/// A gate is bound to one caller; the store layer only describes the access.
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// Permit or refuse one access.
    ///
    /// # Errors
    ///
    /// - [`AccessError::Denied`] if the access is not permitted
    /// - [`AccessError::Unavailable`] if no decision could be made
    async fn check(&self, access: &Access<'_>) -> Result<(), AccessError>;
}
