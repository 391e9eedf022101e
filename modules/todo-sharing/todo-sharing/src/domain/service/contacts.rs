//! The contact request handshake and contact lists.
//!
//! A request is two documents: the outgoing half under the sender and the
//! incoming half under the receiver. Send, accept, reject and cancel each
//! commit as one transaction, so the halves and the two contact entries
//! never get out of step.

use std::sync::Arc;

use chrono::Utc;
use docstore::secure::SecureStoreError;
use docstore::{CollectionPath, DocPath, Document, Query, Snapshot};
use todo_sharing_sdk::{Contact, ContactRequest};
use todoshare_security::{SecurityContext, Uid};
use tracing::info;

use super::{ProfileService, Storage, caller, normalize_email};
use crate::domain::error::DomainError;
use crate::infra::storage::paths;
use crate::infra::storage::records::{ContactRecord, ProfileRecord, RequestRecord};

pub struct ContactService {
    storage: Storage,
    profiles: Arc<ProfileService>,
}

impl ContactService {
    #[must_use]
    pub fn new(storage: Storage, profiles: Arc<ProfileService>) -> Self {
        Self { storage, profiles }
    }

    /// Ask the user registered under `receiver_email` to become a contact.
    ///
    /// # Errors
    ///
    /// - [`DomainError::ProfileNotFound`] if the caller has no profile yet
    /// - [`DomainError::UserNotFound`] if no user has that email
    /// - [`DomainError::SelfRequest`] if the email is the caller's own
    /// - [`DomainError::AlreadyContacts`] if the two are already contacts
    /// - [`DomainError::RequestPending`] if a request exists in either
    ///   direction
    #[tracing::instrument(skip(self, ctx, receiver_email))]
    pub async fn send_contact_request(
        &self,
        ctx: &SecurityContext,
        receiver_email: &str,
    ) -> Result<ContactRequest, DomainError> {
        let sender = caller(ctx)?.clone();
        let receiver_email = normalize_email(receiver_email)?;
        let me = self.profiles.get_profile(ctx, &sender).await?;
        if me.email == receiver_email {
            return Err(DomainError::SelfRequest);
        }
        let receiver = self
            .profiles
            .find_user_by_email(ctx, &receiver_email)
            .await?
            .ok_or_else(|| DomainError::UserNotFound {
                email: receiver_email.clone(),
            })?;
        if receiver.id == sender {
            return Err(DomainError::SelfRequest);
        }

        let record = RequestRecord {
            sender_id: sender.clone(),
            receiver_id: receiver.id.clone(),
            sender_email: me.email,
            receiver_email: receiver.email,
            created_at: Utc::now(),
        };
        let contact_path = paths::contact(&sender, &receiver.id)?;
        let outgoing = paths::outgoing_request(&sender, &receiver.id)?;
        let incoming = paths::incoming_request(&receiver.id, &sender)?;
        // The reverse request, if the receiver already asked us.
        let reverse = paths::incoming_request(&sender, &receiver.id)?;
        let body = Document::from_record(&record)?;

        self.storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let (contact_path, outgoing, incoming, reverse, body) = (
                    contact_path.clone(),
                    outgoing.clone(),
                    incoming.clone(),
                    reverse.clone(),
                    body.clone(),
                );
                Box::pin(async move {
                    if tx.get(&contact_path).await?.is_some() {
                        return Err(DomainError::AlreadyContacts);
                    }
                    if tx.get(&outgoing).await?.is_some() || tx.get(&reverse).await?.is_some() {
                        return Err(DomainError::RequestPending);
                    }
                    tx.create(outgoing, body.clone()).await?;
                    tx.create(incoming, body).await?;
                    Ok(())
                })
            })
            .await?;

        info!(sender = %record.sender_id, receiver = %record.receiver_id, "contact request sent");
        Ok(record.into())
    }

    /// Requests other users sent to the caller, newest first.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for anonymous callers
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_incoming_requests(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ContactRequest>, DomainError> {
        let me = caller(ctx)?;
        self.list_requests(ctx, paths::incoming_requests(me)?).await
    }

    /// Requests the caller sent that are still pending, newest first.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for anonymous callers
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_outgoing_requests(
        &self,
        ctx: &SecurityContext,
    ) -> Result<Vec<ContactRequest>, DomainError> {
        let me = caller(ctx)?;
        self.list_requests(ctx, paths::outgoing_requests(me)?).await
    }

    /// The caller's contacts, ordered by display name.
    ///
    /// # Errors
    ///
    /// - [`DomainError::Unauthenticated`] for anonymous callers
    #[tracing::instrument(skip(self, ctx))]
    pub async fn list_contacts(&self, ctx: &SecurityContext) -> Result<Vec<Contact>, DomainError> {
        let me = caller(ctx)?;
        let snaps = self
            .storage
            .for_caller(ctx)
            .query(&Query::collection(paths::contacts(me)?))
            .await?;
        let mut contacts = snaps
            .into_iter()
            .map(|snap| -> Result<Contact, DomainError> {
                let uid = uid_of(&snap)?;
                Ok(snap.to_record::<ContactRecord>()?.into_model(uid))
            })
            .collect::<Result<Vec<_>, _>>()?;
        contacts.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
                .then_with(|| a.uid.cmp(&b.uid))
        });
        Ok(contacts)
    }

    /// Accept the pending request from `sender`: both request halves are
    /// deleted and both users gain a contact entry, in one commit.
    ///
    /// # Errors
    ///
    /// - [`DomainError::RequestNotFound`] if no request from `sender` is
    ///   pending
    #[tracing::instrument(skip(self, ctx))]
    pub async fn accept_contact_request(
        &self,
        ctx: &SecurityContext,
        sender: &Uid,
    ) -> Result<Contact, DomainError> {
        let receiver = caller(ctx)?.clone();
        let incoming = paths::incoming_request(&receiver, sender)?;
        let outgoing = paths::outgoing_request(sender, &receiver)?;
        let sender_profile = paths::user(sender)?;
        let receiver_profile = paths::user(&receiver)?;
        let receiver_entry = paths::contact(&receiver, sender)?;
        let sender_entry = paths::contact(sender, &receiver)?;

        let entry = self
            .storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let (incoming, outgoing, sender_profile, receiver_profile) = (
                    incoming.clone(),
                    outgoing.clone(),
                    sender_profile.clone(),
                    receiver_profile.clone(),
                );
                let (receiver_entry, sender_entry) = (receiver_entry.clone(), sender_entry.clone());
                Box::pin(async move {
                    let request: RequestRecord = tx
                        .get(&incoming)
                        .await?
                        .ok_or(DomainError::RequestNotFound)?
                        .to_record()?;
                    let since = Utc::now();
                    let sender_card = party_card(
                        tx.get(&sender_profile).await?.as_ref(),
                        &request.sender_email,
                        since,
                    )?;
                    let receiver_card = party_card(
                        tx.get(&receiver_profile).await?.as_ref(),
                        &request.receiver_email,
                        since,
                    )?;

                    tx.delete(incoming).await?;
                    tx.delete(outgoing).await?;
                    tx.set(receiver_entry, Document::from_record(&sender_card)?)
                        .await?;
                    match tx
                        .create(sender_entry, Document::from_record(&receiver_card)?)
                        .await
                    {
                        // Left over from an earlier contact; it already names us.
                        Ok(()) | Err(SecureStoreError::AlreadyExists { .. }) => {}
                        Err(e) => return Err(e.into()),
                    }
                    Ok(sender_card)
                })
            })
            .await?;

        info!(sender = %sender, receiver = %receiver, "contact request accepted");
        Ok(entry.into_model(sender.clone()))
    }

    /// Decline the pending request from `sender`; both halves are deleted.
    ///
    /// # Errors
    ///
    /// - [`DomainError::RequestNotFound`] if no request from `sender` is
    ///   pending
    #[tracing::instrument(skip(self, ctx))]
    pub async fn reject_contact_request(
        &self,
        ctx: &SecurityContext,
        sender: &Uid,
    ) -> Result<(), DomainError> {
        let receiver = caller(ctx)?;
        let incoming = paths::incoming_request(receiver, sender)?;
        let outgoing = paths::outgoing_request(sender, receiver)?;
        self.drop_request(ctx, incoming, outgoing).await?;
        info!(sender = %sender, receiver = %receiver, "contact request rejected");
        Ok(())
    }

    /// Withdraw the caller's pending request to `receiver`; both halves are
    /// deleted.
    ///
    /// # Errors
    ///
    /// - [`DomainError::RequestNotFound`] if no request to `receiver` is
    ///   pending
    /// - [`DomainError::Forbidden`] if the policy does not let senders
    ///   delete the incoming half
    #[tracing::instrument(skip(self, ctx))]
    pub async fn cancel_contact_request(
        &self,
        ctx: &SecurityContext,
        receiver: &Uid,
    ) -> Result<(), DomainError> {
        let sender = caller(ctx)?;
        let outgoing = paths::outgoing_request(sender, receiver)?;
        let incoming = paths::incoming_request(receiver, sender)?;
        self.drop_request(ctx, outgoing, incoming).await?;
        info!(sender = %sender, receiver = %receiver, "contact request cancelled");
        Ok(())
    }

    /// Remove `contact` from the caller's own list. The other user's list
    /// is theirs to change.
    ///
    /// # Errors
    ///
    /// - [`DomainError::ContactNotFound`] if `contact` is not in the list
    #[tracing::instrument(skip(self, ctx))]
    pub async fn remove_contact(
        &self,
        ctx: &SecurityContext,
        contact: &Uid,
    ) -> Result<(), DomainError> {
        let me = caller(ctx)?;
        let entry = paths::contact(me, contact)?;
        self.storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let entry = entry.clone();
                Box::pin(async move {
                    if tx.get(&entry).await?.is_none() {
                        return Err(DomainError::ContactNotFound);
                    }
                    tx.delete(entry).await?;
                    Ok(())
                })
            })
            .await?;
        info!(owner = %me, contact = %contact, "contact removed");
        Ok(())
    }

    /// Delete both halves of a request. `own` is the half the caller may
    /// read; its absence means there is no request.
    async fn drop_request(
        &self,
        ctx: &SecurityContext,
        own: DocPath,
        other: DocPath,
    ) -> Result<(), DomainError> {
        self.storage
            .for_caller(ctx)
            .transaction::<_, DomainError, _>(move |tx| {
                let (own, other) = (own.clone(), other.clone());
                Box::pin(async move {
                    if tx.get(&own).await?.is_none() {
                        return Err(DomainError::RequestNotFound);
                    }
                    tx.delete(own).await?;
                    tx.delete(other).await?;
                    Ok(())
                })
            })
            .await
    }

    async fn list_requests(
        &self,
        ctx: &SecurityContext,
        collection: CollectionPath,
    ) -> Result<Vec<ContactRequest>, DomainError> {
        let snaps = self
            .storage
            .for_caller(ctx)
            .query(&Query::collection(collection))
            .await?;
        let mut requests = snaps
            .iter()
            .map(|snap| -> Result<ContactRequest, DomainError> {
                Ok(snap.to_record::<RequestRecord>()?.into())
            })
            .collect::<Result<Vec<_>, _>>()?;
        requests.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(requests)
    }
}

fn uid_of(snap: &Snapshot) -> Result<Uid, DomainError> {
    Uid::new(snap.path.id()).map_err(|e| DomainError::internal(format!("stored uid: {e}")))
}

/// Contact entry describing one party of a request, from their profile if
/// they have one and from the request otherwise.
fn party_card(
    profile: Option<&Document>,
    request_email: &str,
    since: chrono::DateTime<Utc>,
) -> Result<ContactRecord, DomainError> {
    let (email, display_name) = match profile {
        Some(doc) => {
            let profile: ProfileRecord = doc.to_record()?;
            (profile.email, profile.display_name)
        }
        None => (request_email.to_owned(), request_email.to_owned()),
    };
    Ok(ContactRecord {
        email,
        display_name,
        since,
    })
}
