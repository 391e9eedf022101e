use std::collections::BTreeSet;

use access_policy_sdk::layout::{MENTIONED_USERS, SHARED_WITH, TODOS};
use chrono::Utc;
use docstore::secure::SecureStoreError;
use docstore::{Document, Query, Snapshot};
use serde_json::json;
use todo_sharing_sdk::{NewTodo, Todo, TodoPatch};
use todoshare_security::{SecurityContext, Uid};
use tracing::info;
use uuid::Uuid;

use super::{Storage, caller};
use crate::config::ServiceConfig;
use crate::domain::error::DomainError;
use crate::infra::storage::paths;
use crate::infra::storage::records::TodoRecord;

/// Todos at `users/{owner}/todos/{id}`, with sharing and mentions.
pub struct TodoService {
    storage: Storage,
    config: ServiceConfig,
}

impl TodoService {
    #[must_use]
    pub fn new(storage: Storage, config: ServiceConfig) -> Self {
        Self { storage, config }
    }

    /// # Errors
    ///
    /// - [`DomainError::Validation`] for empty or oversized content
    #[tracing::instrument(skip(self, ctx, new_todo))]
    pub async fn create_todo(
        &self,
        ctx: &SecurityContext,
        new_todo: NewTodo,
    ) -> Result<Todo, DomainError> {
        let owner = caller(ctx)?.clone();
        self.validate_content(&new_todo.content)?;

        let now = Utc::now();
        let id = Uuid::new_v4().to_string();
        let record = TodoRecord {
            owner_id: owner.clone(),
            content: new_todo.content,
            completed: false,
            image_ref: new_todo.image_ref,
            shared_with: BTreeSet::new(),
            mentioned_users: without(new_todo.mentioned_users, &owner),
            created_at: now,
            updated_at: now,
        };

        self.storage
            .for_caller(ctx)
            .create(paths::todo(&owner, &id)?, Document::from_record(&record)?)
            .await?;

        info!(owner = %owner, todo_id = %id, "todo created");
        Ok(record.into_model(id))
    }

    /// # Errors
    ///
    /// - [`DomainError::TodoNotFound`] if the todo does not exist
    /// - [`DomainError::Forbidden`] if the caller is neither the owner nor
    ///   shared on it
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get_todo(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
    ) -> Result<Todo, DomainError> {
        caller(ctx)?;
        let snap = self
            .storage
            .for_caller(ctx)
            .get(&paths::todo(owner, todo_id)?)
            .await?
            .ok_or(DomainError::TodoNotFound)?;
        todo_from(&snap)
    }

    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for anonymous callers
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_own_todos(&self, ctx: &SecurityContext) -> Result<Vec<Todo>, DomainError> {
        let owner = caller(ctx)?;
        self.list(ctx, Query::collection(paths::todos(owner)?))
            .await
    }

    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for anonymous callers
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_shared_with_me(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<Todo>, DomainError> {
        let me = caller(ctx)?;
        let query = Query::group(TODOS).where_array_contains(SHARED_WITH, me.as_str());
        self.list(ctx, query).await
    }

    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for anonymous callers
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_mentioning_me(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<Todo>, DomainError> {
        let me = caller(ctx)?;
        let query = Query::group(TODOS).where_array_contains(MENTIONED_USERS, me.as_str());
        self.list(ctx, query).await
    }

    /// Apply `patch`; allowed for the owner and for users the todo is
    /// shared with.
    ///
    /// # Errors
    ///
    /// - [`DomainError::TodoNotFound`] if the todo does not exist
    /// - [`DomainError::Forbidden`] if the caller may not update it
    /// - [`DomainError::Validation`] for empty or oversized content
    #[tracing::instrument(skip(self, ctx, patch))]
    pub async fn update_todo(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
        patch: TodoPatch,
    ) -> Result<Todo, DomainError> {
        caller(ctx)?;
        if patch.is_empty() {
            return self.get_todo(ctx, owner, todo_id).await;
        }
        if let Some(content) = &patch.content {
            self.validate_content(content)?;
        }

        let mut fields = Document::new().with("updatedAt", json!(Utc::now()));
        if let Some(content) = patch.content {
            fields.insert("content", json!(content));
        }
        if let Some(completed) = patch.completed {
            fields.insert("completed", json!(completed));
        }
        if let Some(image_ref) = patch.image_ref {
            fields.insert("imageRef", json!(image_ref));
        }
        if let Some(mentioned) = patch.mentioned_users {
            fields.insert("mentionedUsers", json!(without(mentioned, owner)));
        }

        let todo_path = paths::todo(owner, todo_id)?;
        let merged = self
            .storage
            .for_caller(ctx)
            .update(todo_path, fields)
            .await
            .map_err(|e| match e {
                SecureStoreError::NotFound { .. } => DomainError::TodoNotFound,
                other => other.into(),
            })?;
        let record: TodoRecord = merged.to_record()?;
        Ok(record.into_model(todo_id.to_owned()))
    }

    /// # Errors
    ///
    /// See [`update_todo`](Self::update_todo).
    pub async fn set_completed(
        &self,
        ctx: &SecurityContext,
        owner: &Uid,
        todo_id: &str,
        completed: bool,
    ) -> Result<Todo, DomainError> {
        let patch = TodoPatch {
            completed: Some(completed),
            ..TodoPatch::default()
        };
        self.update_todo(ctx, owner, todo_id, patch).await
    }

    /// Delete one of the caller's own todos.
    ///
    /// # Errors
    ///
    /// - [`DomainError::TodoNotFound`] if the todo does not exist
    #[tracing::instrument(skip(self, ctx))]
    pub async fn delete_todo(
        &self,
        ctx: &SecurityContext,
        todo_id: &str,
    ) -> Result<(), DomainError> {
        let owner = caller(ctx)?;
        let path = paths::todo(owner, todo_id)?;
        self.storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let path = path.clone();
                Box::pin(async move {
                    if tx.get(&path).await?.is_none() {
                        return Err(DomainError::TodoNotFound);
                    }
                    tx.delete(path).await?;
                    Ok(())
                })
            })
            .await?;
        info!(owner = %owner, todo_id, "todo deleted");
        Ok(())
    }

    /// Share one of the caller's todos with one of the caller's contacts.
    ///
    /// # Errors
    ///
    /// - [`DomainError::NotAContact`] if `contact` is not in the caller's
    ///   contact list
    /// - [`DomainError::TodoNotFound`] if the todo does not exist
    #[tracing::instrument(skip(self, ctx))]
    pub async fn share_todo(
        &self,
        ctx: &SecurityContext,
        todo_id: &str,
        contact: &Uid,
    ) -> Result<Todo, DomainError> {
        let owner = caller(ctx)?;
        if owner == contact {
            return Err(DomainError::validation("contact", "cannot share a todo with its owner"));
        }
        let todo_path = paths::todo(owner, todo_id)?;
        let contact_path = paths::contact(owner, contact)?;
        let contact = contact.clone();

        let record = self
            .storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let (todo_path, contact_path, contact) =
                    (todo_path.clone(), contact_path.clone(), contact.clone());
                Box::pin(async move {
                    if tx.get(&contact_path).await?.is_none() {
                        return Err(DomainError::NotAContact);
                    }
                    let mut record: TodoRecord = tx
                        .get(&todo_path)
                        .await?
                        .ok_or(DomainError::TodoNotFound)?
                        .to_record()?;
                    if record.shared_with.insert(contact) {
                        record.updated_at = Utc::now();
                        tx.update(todo_path, sharing_fields(&record)).await?;
                    }
                    Ok(record)
                })
            })
            .await?;
        Ok(record.into_model(todo_id.to_owned()))
    }

    /// Stop sharing one of the caller's todos with `contact`. Works whether
    /// or not `contact` is still a contact.
    ///
    /// # Errors
    ///
    /// - [`DomainError::TodoNotFound`] if the todo does not exist
    #[tracing::instrument(skip(self, ctx))]
    pub async fn unshare_todo(
        &self,
        ctx: &SecurityContext,
        todo_id: &str,
        contact: &Uid,
    ) -> Result<Todo, DomainError> {
        let owner = caller(ctx)?;
        let todo_path = paths::todo(owner, todo_id)?;
        let contact = contact.clone();

        let record = self
            .storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let (todo_path, contact) = (todo_path.clone(), contact.clone());
                Box::pin(async move {
                    let mut record: TodoRecord = tx
                        .get(&todo_path)
                        .await?
                        .ok_or(DomainError::TodoNotFound)?
                        .to_record()?;
                    if record.shared_with.remove(&contact) {
                        record.updated_at = Utc::now();
                        tx.update(todo_path, sharing_fields(&record)).await?;
                    }
                    Ok(record)
                })
            })
            .await?;
        Ok(record.into_model(todo_id.to_owned()))
    }

    async fn list(&self, ctx: &SecurityContext, query: Query) -> Result<Vec<Todo>, DomainError> {
        let snaps = self.storage.for_caller(ctx).query(&query).await?;
        let mut todos = snaps.iter().map(todo_from).collect::<Result<Vec<_>, _>>()?;
        todos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(todos)
    }

    fn validate_content(&self, content: &str) -> Result<(), DomainError> {
        if content.trim().is_empty() {
            return Err(DomainError::validation("content", "must not be empty"));
        }
        if content.chars().count() > self.config.max_content_length {
            return Err(DomainError::validation(
                "content",
                format!(
                    "exceeds maximum length of {}",
                    self.config.max_content_length
                ),
            ));
        }
        Ok(())
    }
}

fn todo_from(snap: &Snapshot) -> Result<Todo, DomainError> {
    let record: TodoRecord = snap.to_record()?;
    Ok(record.into_model(snap.path.id().to_owned()))
}

fn without(mut users: BTreeSet<Uid>, owner: &Uid) -> BTreeSet<Uid> {
    users.remove(owner);
    users
}

fn sharing_fields(record: &TodoRecord) -> Document {
    Document::new()
        .with(SHARED_WITH, json!(record.shared_with))
        .with("updatedAt", json!(record.updated_at))
}
