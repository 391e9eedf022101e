//! Stored document bodies and their mapping to the SDK models.
//!
//! A record holds the document fields only; ids come from the path.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todo_sharing_sdk::{Contact, ContactRequest, Theme, Todo, UserProfile};
use todoshare_security::Uid;

/// Body of `users/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

impl ProfileRecord {
    #[must_use]
    pub fn into_model(self, id: Uid) -> UserProfile {
        UserProfile {
            id,
            email: self.email,
            display_name: self.display_name,
            avatar_url: self.avatar_url,
            theme: self.theme,
        }
    }
}

/// Body of `users/{owner}/todos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRecord {
    pub owner_id: Uid,
    pub content: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub shared_with: BTreeSet<Uid>,
    #[serde(default)]
    pub mentioned_users: BTreeSet<Uid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TodoRecord {
    #[must_use]
    pub fn into_model(self, id: String) -> Todo {
        Todo {
            id,
            owner_id: self.owner_id,
            content: self.content,
            completed: self.completed,
            image_ref: self.image_ref,
            shared_with: self.shared_with,
            mentioned_users: self.mentioned_users,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// Body of `users/{owner}/contacts/{uid}`: the other party as seen by
/// `owner`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRecord {
    pub email: String,
    pub display_name: String,
    pub since: DateTime<Utc>,
}

impl ContactRecord {
    #[must_use]
    pub fn into_model(self, uid: Uid) -> Contact {
        Contact {
            uid,
            email: self.email,
            display_name: self.display_name,
            since: self.since,
        }
    }
}

/// Body of both halves of a contact request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestRecord {
    pub sender_id: Uid,
    pub receiver_id: Uid,
    pub sender_email: String,
    pub receiver_email: String,
    pub created_at: DateTime<Utc>,
}

impl From<RequestRecord> for ContactRequest {
    fn from(r: RequestRecord) -> Self {
        Self {
            sender_id: r.sender_id,
            receiver_id: r.receiver_id,
            sender_email: r.sender_email,
            receiver_email: r.receiver_email,
            created_at: r.created_at,
        }
    }
}
