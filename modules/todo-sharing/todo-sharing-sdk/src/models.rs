//! Public models of the `todo_sharing` module.
//!
//! Field names serialize in camelCase, matching the stored documents.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use todoshare_security::Uid;

/// Colour scheme preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

/// A user's public profile, stored at `users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uid,
    pub email: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub theme: Theme,
}

/// Partial profile update. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub avatar_url: Option<String>,
    pub theme: Option<Theme>,
}

/// A todo, stored at `users/{owner_id}/todos/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub owner_id: Uid,
    /// Rich text, opaque to the module.
    pub content: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_ref: Option<String>,
    /// Users who may read and update the todo.
    pub shared_with: BTreeSet<Uid>,
    /// Users mentioned in the content. They can find the todo through the
    /// mentions listing but cannot open or update it by path.
    pub mentioned_users: BTreeSet<Uid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Whether `uid` may open this todo directly.
    #[must_use]
    pub fn is_visible_to(&self, uid: &Uid) -> bool {
        &self.owner_id == uid || self.shared_with.contains(uid)
    }
}

/// Data for a new todo owned by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodo {
    pub content: String,
    #[serde(default)]
    pub image_ref: Option<String>,
    #[serde(default)]
    pub mentioned_users: BTreeSet<Uid>,
}

impl NewTodo {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn mentioning(mut self, uid: Uid) -> Self {
        self.mentioned_users.insert(uid);
        self
    }
}

/// Partial todo update. `None` leaves a field unchanged.
///
/// Sharing is changed through `share_todo` / `unshare_todo` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoPatch {
    pub content: Option<String>,
    pub completed: Option<bool>,
    pub image_ref: Option<String>,
    pub mentioned_users: Option<BTreeSet<Uid>>,
}

impl TodoPatch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_none()
            && self.completed.is_none()
            && self.image_ref.is_none()
            && self.mentioned_users.is_none()
    }
}

/// An accepted contact, stored at `users/{owner}/contacts/{uid}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub uid: Uid,
    pub email: String,
    pub display_name: String,
    pub since: DateTime<Utc>,
}

/// One half of a pending contact request. Both halves carry the same data:
/// the outgoing half lives under the sender, the incoming half under the
/// receiver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub sender_id: Uid,
    pub receiver_id: Uid,
    pub sender_email: String,
    pub receiver_email: String,
    pub created_at: DateTime<Utc>,
}
