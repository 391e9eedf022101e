use docstore::secure::SecureStoreError;
use docstore::{Document, Query};
use serde_json::json;
use todo_sharing_sdk::{ProfilePatch, UserProfile};
use todoshare_security::{SecurityContext, Uid};
use tracing::info;

use super::{Storage, caller, normalize_email};
use crate::config::ServiceConfig;
use crate::domain::error::DomainError;
use crate::infra::storage::paths;
use crate::infra::storage::records::ProfileRecord;

/// User profiles at `users/{uid}`.
pub struct ProfileService {
    storage: Storage,
    config: ServiceConfig,
}

impl ProfileService {
    #[must_use]
    pub fn new(storage: Storage, config: ServiceConfig) -> Self {
        Self { storage, config }
    }

    /// Create the caller's profile on first sign-in, or return the existing
    /// one unchanged.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for anonymous callers
    /// - [`DomainError::Validation`] if the sign-in carries no usable email
    ///   or the display name is invalid
    #[tracing::instrument(skip(self, ctx, display_name))]
    pub async fn ensure_profile(
        &self,
        ctx: &SecurityContext,
        display_name: Option<String>,
    ) -> Result<UserProfile, DomainError> {
        let uid = caller(ctx)?.clone();
        let email = ctx
            .email()
            .ok_or_else(|| DomainError::validation("email", "sign-in carries no email"))
            .and_then(normalize_email)?;
        let display_name = match display_name {
            Some(name) => self.validate_display_name(&name)?,
            None => default_display_name(&email),
        };
        let record = ProfileRecord {
            email,
            display_name,
            avatar_url: None,
            theme: todo_sharing_sdk::Theme::default(),
        };

        let path = paths::user(&uid)?;
        let fresh = Document::from_record(&record)?;
        let (stored, created) = self
            .storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let (path, fresh) = (path.clone(), fresh.clone());
                Box::pin(async move {
                    if let Some(existing) = tx.get(&path).await? {
                        return Ok((existing, false));
                    }
                    tx.create(path, fresh.clone()).await?;
                    Ok((fresh, true))
                })
            })
            .await?;

        if created {
            info!(uid = %uid, "profile created");
        }
        Ok(stored.to_record::<ProfileRecord>()?.into_model(uid))
    }

    /// # Errors
    ///
    /// - [`DomainError::ProfileNotFound`] if `uid` has no profile
    #[tracing::instrument(skip(self, ctx))]
    pub async fn get_profile(
        &self,
        ctx: &SecurityContext,
        uid: &Uid,
    ) -> Result<UserProfile, DomainError> {
        caller(ctx)?;
        let snap = self
            .storage
            .for_caller(ctx)
            .get(&paths::user(uid)?)
            .await?
            .ok_or(DomainError::ProfileNotFound)?;
        Ok(snap.to_record::<ProfileRecord>()?.into_model(uid.clone()))
    }

    /// Apply `patch` to the caller's own profile.
    ///
    /// # Errors
    ///
    /// - [`DomainError::ProfileNotFound`] before the first `ensure_profile`
    /// - [`DomainError::Validation`] for an invalid display name
    #[tracing::instrument(skip(self, ctx, patch))]
    pub async fn update_profile(
        &self,
        ctx: &SecurityContext,
        patch: ProfilePatch,
    ) -> Result<UserProfile, DomainError> {
        let uid = caller(ctx)?.clone();
        let mut fields = Document::new();
        if let Some(name) = &patch.display_name {
            fields.insert("displayName", json!(self.validate_display_name(name)?));
        }
        if let Some(url) = patch.avatar_url {
            fields.insert("avatarUrl", json!(url));
        }
        if let Some(theme) = patch.theme {
            fields.insert("theme", json!(theme));
        }
        if fields.fields().is_empty() {
            return self.get_profile(ctx, &uid).await;
        }

        let merged = self
            .storage
            .for_caller(ctx)
            .update(paths::user(&uid)?, fields)
            .await
            .map_err(|e| match e {
                SecureStoreError::NotFound { .. } => DomainError::ProfileNotFound,
                other => other.into(),
            })?;
        Ok(merged.to_record::<ProfileRecord>()?.into_model(uid))
    }

    /// Find a profile by email, case-insensitively.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Validation`] if `email` is not an email address
    #[tracing::instrument(skip(self, ctx, email))]
    pub async fn find_user_by_email(
        &self,
        ctx: &SecurityContext,
        email: &str,
    ) -> Result<Option<UserProfile>, DomainError> {
        caller(ctx)?;
        let email = normalize_email(email)?;
        let query = Query::collection(paths::users()?).where_eq("email", email);
        let found = self.storage.for_caller(ctx).query(&query).await?;

        found
            .into_iter()
            .next()
            .map(|snap| -> Result<UserProfile, DomainError> {
                let uid = Uid::new(snap.path.id())
                    .map_err(|e| DomainError::internal(format!("stored profile id: {e}")))?;
                Ok(snap.to_record::<ProfileRecord>()?.into_model(uid))
            })
            .transpose()
    }

    fn validate_display_name(&self, name: &str) -> Result<String, DomainError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(DomainError::validation("displayName", "must not be empty"));
        }
        if name.chars().count() > self.config.max_display_name_length {
            return Err(DomainError::validation(
                "displayName",
                format!(
                    "exceeds maximum length of {}",
                    self.config.max_display_name_length
                ),
            ));
        }
        Ok(name.to_owned())
    }
}

/// The local part of the email, used until the user picks a name.
fn default_display_name(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_owned()
}
