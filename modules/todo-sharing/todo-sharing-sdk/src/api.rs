//! Public API trait for the `todo_sharing` module.

use async_trait::async_trait;
use todoshare_security::{SecurityContext, Uid};

use crate::errors::SharingError;
use crate::models::{Contact, ContactRequest, NewTodo, ProfilePatch, Todo, TodoPatch, UserProfile};

/// Public API of the `todo_sharing` module, version 1.
///
/// Every method acts on behalf of the caller in `ctx`. Access refused by the
/// sharing policy surfaces as [`SharingError::Forbidden`].
#[async_trait]
pub trait TodoSharingClientV1: Send + Sync {
    // ── profiles ──────────────────────────────────────────────────────

    /// Create the caller's profile on first sign-in, or return the existing
    /// one. The email comes from the context.
    async fn ensure_profile(
        &self,
        ctx: &SecurityContext,
        display_name: Option<String>,
    ) -> Result<UserProfile, SharingError>;

    async fn get_profile(&self, ctx: &SecurityContext, uid: &Uid)
    -> Result<UserProfile, SharingError>;

    async fn update_profile(
        &self,
        ctx: &SecurityContext,
        patch: ProfilePatch,
    ) -> Result<UserProfile, SharingError>;

    /// Look up a profile by email (case-insensitive).
    async fn find_user_by_email(
        &self,
        ctx: &SecurityContext,
        email: &str,
    ) -> Result<Option<UserProfile>, SharingError>;

    // ── todos ─────────────────────────────────────────────────────────

    async fn create_todo(&self, ctx: &SecurityContext, new_todo: NewTodo)
    -> Result<Todo, SharingError>;

    async fn get_todo(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
    ) -> Result<Todo, SharingError>;

    /// The caller's own todos, newest first.
    async fn list_own_todos(&self, ctx: &SecurityContext) -> Result<Vec<Todo>, SharingError>;

    /// Todos of other users shared with the caller, newest first.
    async fn list_shared_with_me(&self, ctx: &SecurityContext)
    -> Result<Vec<Todo>, SharingError>;

    /// Todos that mention the caller, newest first.
    async fn list_mentioning_me(&self, ctx: &SecurityContext)
    -> Result<Vec<Todo>, SharingError>;

    async fn update_todo(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
        patch: TodoPatch,
    ) -> Result<Todo, SharingError>;

    async fn set_completed(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
        completed: bool,
    ) -> Result<Todo, SharingError>;

    async fn delete_todo(&self, ctx: &SecurityContext, todo_id: &str) -> Result<(), SharingError>;

    /// Share one of the caller's todos with one of the caller's contacts.
    async fn share_todo(
        &self,
        ctx: &SecurityContext,
        todo_id: &str,
        contact: &Uid,
    ) -> Result<Todo, SharingError>;

    async fn unshare_todo(
        &self,
        ctx: &SecurityContext,
        todo_id: &str,
        contact: &Uid,
    ) -> Result<Todo, SharingError>;

    // ── contacts ──────────────────────────────────────────────────────

    /// Ask the user with `receiver_email` to become a contact.
    async fn send_contact_request(
        &self,
        ctx: &SecurityContext,
        receiver_email: &str,
    ) -> Result<ContactRequest, SharingError>;

    async fn list_incoming_requests(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ContactRequest>, SharingError>;

    async fn list_outgoing_requests(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ContactRequest>, SharingError>;

    async fn list_contacts(&self, ctx: &SecurityContext) -> Result<Vec<Contact>, SharingError>;

    /// Accept the request from `sender`; returns the caller's new contact.
    async fn accept_contact_request(
        &self,
        ctx: &SecurityContext,
        sender: &Uid,
    ) -> Result<Contact, SharingError>;

    async fn reject_contact_request(
        &self,
        ctx: &SecurityContext,
        sender: &Uid,
    ) -> Result<(), SharingError>;

    async fn cancel_contact_request(
        &self,
        ctx: &SecurityContext,
        receiver: &Uid,
    ) -> Result<(), SharingError>;

    /// Remove `contact` from the caller's own contact list.
    async fn remove_contact(&self, ctx: &SecurityContext, contact: &Uid)
    -> Result<(), SharingError>;
}
