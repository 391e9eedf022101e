//! Local (in-process) client for the todo sharing module.

use async_trait::async_trait;
use todo_sharing_sdk::{
    Contact, ContactRequest, NewTodo, ProfilePatch, SharingError, Todo, TodoPatch,
    TodoSharingClientV1, UserProfile,
};
use todoshare_security::{SecurityContext, Uid};

use super::{AppServices, DomainError};

/// Local client wrapping the services.
///
/// Handed out by the module during `init()`.
pub struct TodoSharingLocalClient {
    services: AppServices,
}

impl TodoSharingLocalClient {
    #[must_use]
    pub fn new(services: AppServices) -> Self {
        Self { services }
    }
}

fn log_and_convert(op: &str, e: DomainError) -> SharingError {
    if matches!(e, DomainError::Internal(_)) {
        tracing::error!(operation = op, error = ?e, "todo_sharing call failed");
    } else {
        tracing::debug!(operation = op, error = %e, "todo_sharing call refused");
    }
    e.into()
}

#[async_trait]
impl TodoSharingClientV1 for TodoSharingLocalClient {
    async fn ensure_profile(
        &self,
        ctx: &SecurityContext,
        display_name: Option<String>,
    ) -> Result<UserProfile, SharingError> {
        self.services
            .profiles
            .ensure_profile(ctx, display_name)
            .await
            .map_err(|e| log_and_convert("ensure_profile", e))
    }

    async fn get_profile(
        &self,
        ctx: &SecurityContext,
        uid: &Uid,
    ) -> Result<UserProfile, SharingError> {
        self.services
            .profiles
            .get_profile(ctx, uid)
            .await
            .map_err(|e| log_and_convert("get_profile", e))
    }

    async fn update_profile(
        &self,
        ctx: &SecurityContext,
        patch: ProfilePatch,
    ) -> Result<UserProfile, SharingError> {
        self.services
            .profiles
            .update_profile(ctx, patch)
            .await
            .map_err(|e| log_and_convert("update_profile", e))
    }

    async fn find_user_by_email(
        &self,
        ctx: &SecurityContext,
        email: &str,
    ) -> Result<Option<UserProfile>, SharingError> {
        self.services
            .profiles
            .find_user_by_email(ctx, email)
            .await
            .map_err(|e| log_and_convert("find_user_by_email", e))
    }

    async fn create_todo(
        &self,
        ctx: &SecurityContext,
        new_todo: NewTodo,
    ) -> Result<Todo, SharingError> {
        self.services
            .todos
            .create_todo(ctx, new_todo)
            .await
            .map_err(|e| log_and_convert("create_todo", e))
    }

    async fn get_todo(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
    ) -> Result<Todo, SharingError> {
        self.services
            .todos
            .get_todo(ctx, owner, todo_id)
            .await
            .map_err(|e| log_and_convert("get_todo", e))
    }

    async fn list_own_todos(&self, ctx: &SecurityContext) -> Result<Vec<Todo>, SharingError> {
        self.services
            .todos
            .list_own_todos(ctx)
            .await
            .map_err(|e| log_and_convert("list_own_todos", e))
    }

    async fn list_shared_with_me(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<Todo>, SharingError> {
        self.services
            .todos
            .list_shared_with_me(ctx)
            .await
            .map_err(|e| log_and_convert("list_shared_with_me", e))
    }

    async fn list_mentioning_me(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<Todo>, SharingError> {
        self.services
            .todos
            .list_mentioning_me(ctx)
            .await
            .map_err(|e| log_and_convert("list_mentioning_me", e))
    }

    async fn update_todo(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
        patch: TodoPatch,
    ) -> Result<Todo, SharingError> {
        self.services
            .todos
            .update_todo(ctx, owner, todo_id, patch)
            .await
            .map_err(|e| log_and_convert("update_todo", e))
    }

    async fn set_completed(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
        completed: bool,
    ) -> Result<Todo, SharingError> {
        self.services
            .todos
            .set_completed(ctx, owner, todo_id, completed)
            .await
            .map_err(|e| log_and_convert("set_completed", e))
    }

    async fn delete_todo(&self, ctx: &SecurityContext, todo_id: &str) -> Result<(), SharingError> {
        self.services
            .todos
            .delete_todo(ctx, todo_id)
            .await
            .map_err(|e| log_and_convert("delete_todo", e))
    }

    async fn share_todo(
        &self,
        ctx: &SecurityContext,
        todo_id: &str,
        contact: &Uid,
    ) -> Result<Todo, SharingError> {
        self.services
            .todos
            .share_todo(ctx, todo_id, contact)
            .await
            .map_err(|e| log_and_convert("share_todo", e))
    }

    async fn unshare_todo(
        &self,
        ctx: &SecurityContext,
        todo_id: &str,
        contact: &Uid,
    ) -> Result<Todo, SharingError> {
        self.services
            .todos
            .unshare_todo(ctx, todo_id, contact)
            .await
            .map_err(|e| log_and_convert("unshare_todo", e))
    }

    async fn send_contact_request(
        &self,
        ctx: &SecurityContext,
        receiver_email: &str,
    ) -> Result<ContactRequest, SharingError> {
        self.services
            .contacts
            .send_contact_request(ctx, receiver_email)
            .await
            .map_err(|e| log_and_convert("send_contact_request", e))
    }

    async fn list_incoming_requests(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ContactRequest>, SharingError> {
        self.services
            .contacts
            .list_incoming_requests(ctx)
            .await
            .map_err(|e| log_and_convert("list_incoming_requests", e))
    }

    async fn list_outgoing_requests(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ContactRequest>, SharingError> {
        self.services
            .contacts
            .list_outgoing_requests(ctx)
            .await
            .map_err(|e| log_and_convert("list_outgoing_requests", e))
    }

    async fn list_contacts(&self, ctx: &SecurityContext) -> Result<Vec<Contact>, SharingError> {
        self.services
            .contacts
            .list_contacts(ctx)
            .await
            .map_err(|e| log_and_convert("list_contacts", e))
    }

    async fn accept_contact_request(
        &self,
        ctx: &SecurityContext,
        sender: &Uid,
    ) -> Result<Contact, SharingError> {
        self.services
            .contacts
            .accept_contact_request(ctx, sender)
            .await
            .map_err(|e| log_and_convert("accept_contact_request", e))
    }

    async fn reject_contact_request(
        &self,
        ctx: &SecurityContext,
        sender: &Uid,
    ) -> Result<(), SharingError> {
        self.services
            .contacts
            .reject_contact_request(ctx, sender)
            .await
            .map_err(|e| log_and_convert("reject_contact_request", e))
    }

    async fn cancel_contact_request(
        &self,
        ctx: &SecurityContext,
        receiver: &Uid,
    ) -> Result<(), SharingError> {
        self.services
            .contacts
            .cancel_contact_request(ctx, receiver)
            .await
            .map_err(|e| log_and_convert("cancel_contact_request", e))
    }

    async fn remove_contact(
        &self,
        ctx: &SecurityContext,
        contact: &Uid,
    ) -> Result<(), SharingError> {
        self.services
            .contacts
            .remove_contact(ctx, contact)
            .await
            .map_err(|e| log_and_convert("remove_contact", e))
    }
}
