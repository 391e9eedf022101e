//! Domain models for the access policy module.

use docstore::secure::Operation;
use docstore::{DocPath, Document};
use serde::{Deserialize, Serialize};
use todoshare_security::Uid;

use crate::layout;

/// A protected document, identified by its position in the `users/` tree.
///
/// Ids are borrowed from the path they were classified from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource<'a> {
    /// `users/{user_id}`
    UserProfile { user_id: &'a str },
    /// `users/{owner_id}/todos/{todo_id}`
    Todo { owner_id: &'a str, todo_id: &'a str },
    /// `users/{user_id}/contacts/{contact_id}`
    Contact { user_id: &'a str, contact_id: &'a str },
    /// `users/{sender_id}/outgoingContactRequests/{receiver_id}`
    OutgoingRequest {
        sender_id: &'a str,
        receiver_id: &'a str,
    },
    /// `users/{receiver_id}/incomingContactRequests/{sender_id}`
    IncomingRequest {
        receiver_id: &'a str,
        sender_id: &'a str,
    },
}

impl<'a> Resource<'a> {
    /// Classify a document path. Returns `None` for anything outside the
    /// known layout.
    #[must_use]
    pub fn classify(path: &'a DocPath) -> Option<Self> {
        match path.segments() {
            [users, user_id] if users == layout::USERS => Some(Self::UserProfile { user_id }),
            [users, owner, collection, id] if users == layout::USERS => {
                match collection.as_str() {
                    layout::TODOS => Some(Self::Todo {
                        owner_id: owner,
                        todo_id: id,
                    }),
                    layout::CONTACTS => Some(Self::Contact {
                        user_id: owner,
                        contact_id: id,
                    }),
                    layout::OUTGOING_REQUESTS => Some(Self::OutgoingRequest {
                        sender_id: owner,
                        receiver_id: id,
                    }),
                    layout::INCOMING_REQUESTS => Some(Self::IncomingRequest {
                        receiver_id: owner,
                        sender_id: id,
                    }),
                    _ => None,
                }
            }
            _ => None,
        }
    }

    /// Resource kind name, for logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserProfile { .. } => "user_profile",
            Self::Todo { .. } => "todo",
            Self::Contact { .. } => "contact",
            Self::OutgoingRequest { .. } => "outgoing_request",
            Self::IncomingRequest { .. } => "incoming_request",
        }
    }
}

/// Reason for an explicit deny.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DenyReason {
    /// Machine-readable error code.
    pub error_code: String,
    /// Human-readable details (optional).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl DenyReason {
    #[must_use]
    pub fn new(error_code: &str) -> Self {
        Self {
            error_code: error_code.to_owned(),
            details: None,
        }
    }
}

/// Access evaluation request: who, what operation, which document, and the
/// document state before and after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    /// Authenticated caller; `None` for anonymous callers.
    #[serde(default)]
    pub subject: Option<Uid>,
    pub operation: Operation,
    pub path: DocPath,
    /// Whether the read arrives through a collection-group query.
    #[serde(default)]
    pub collection_group: bool,
    /// Stored document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing: Option<Document>,
    /// Document as it would be after a create or update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposed: Option<Document>,
}

/// Access evaluation response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResponse {
    /// Whether access is granted.
    pub decision: bool,
    /// Reason for denial (present when `decision` is `false`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deny_reason: Option<DenyReason>,
}

impl EvaluationResponse {
    #[must_use]
    pub fn allow() -> Self {
        Self {
            decision: true,
            deny_reason: None,
        }
    }

    #[must_use]
    pub fn deny(reason: DenyReason) -> Self {
        Self {
            decision: false,
            deny_reason: Some(reason),
        }
    }
}
