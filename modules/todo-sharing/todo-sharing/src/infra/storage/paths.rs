//! Paths of every document the module reads or writes.
//!
//! Uids are valid path segments by construction; caller-supplied ids such as
//! a todo id are checked by [`DocPath::child`]. Every function fails with
//! [`PathError`] only for an id that is not a valid path segment.

use access_policy_sdk::layout::{CONTACTS, INCOMING_REQUESTS, OUTGOING_REQUESTS, TODOS, USERS};
use docstore::{CollectionPath, DocPath, PathError};
use todoshare_security::Uid;

/// `users`
///
/// # Errors
///
/// Never in practice; the collection name is a constant.
pub fn users() -> Result<CollectionPath, PathError> {
    CollectionPath::parse(USERS)
}

/// `users/{uid}`
///
/// # Errors
///
/// [`PathError`] if `uid` is not a valid segment.
pub fn user(uid: &Uid) -> Result<DocPath, PathError> {
    DocPath::root(USERS, uid.as_str())
}

/// `users/{owner}/todos/{todo_id}`
///
/// # Errors
///
/// [`PathError`] if `todo_id` is empty or contains a separator.
pub fn todo(owner: &Uid, todo_id: &str) -> Result<DocPath, PathError> {
    user(owner)?.child(TODOS, todo_id)
}

/// `users/{owner}/todos`
///
/// # Errors
///
/// [`PathError`] if `owner` is not a valid segment.
pub fn todos(owner: &Uid) -> Result<CollectionPath, PathError> {
    user(owner)?.collection(TODOS)
}

/// `users/{owner}/contacts/{contact}`
///
/// # Errors
///
/// [`PathError`] if either uid is not a valid segment.
pub fn contact(owner: &Uid, contact: &Uid) -> Result<DocPath, PathError> {
    user(owner)?.child(CONTACTS, contact.as_str())
}

/// `users/{owner}/contacts`
///
/// # Errors
///
/// [`PathError`] if `owner` is not a valid segment.
pub fn contacts(owner: &Uid) -> Result<CollectionPath, PathError> {
    user(owner)?.collection(CONTACTS)
}

/// `users/{sender}/outgoingContactRequests/{receiver}`
///
/// # Errors
///
/// [`PathError`] if either uid is not a valid segment.
pub fn outgoing_request(sender: &Uid, receiver: &Uid) -> Result<DocPath, PathError> {
    user(sender)?.child(OUTGOING_REQUESTS, receiver.as_str())
}

/// `users/{sender}/outgoingContactRequests`
///
/// # Errors
///
/// [`PathError`] if `sender` is not a valid segment.
pub fn outgoing_requests(sender: &Uid) -> Result<CollectionPath, PathError> {
    user(sender)?.collection(OUTGOING_REQUESTS)
}

/// `users/{receiver}/incomingContactRequests/{sender}`
///
/// # Errors
///
/// [`PathError`] if either uid is not a valid segment.
pub fn incoming_request(receiver: &Uid, sender: &Uid) -> Result<DocPath, PathError> {
    user(receiver)?.child(INCOMING_REQUESTS, sender.as_str())
}

/// `users/{receiver}/incomingContactRequests`
///
/// # Errors
///
/// [`PathError`] if `receiver` is not a valid segment.
pub fn incoming_requests(receiver: &Uid) -> Result<CollectionPath, PathError> {
    user(receiver)?.collection(INCOMING_REQUESTS)
}
