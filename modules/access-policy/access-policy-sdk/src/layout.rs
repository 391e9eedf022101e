//! Names of the collections and fields the policy inspects.
//!
//! ```text
//! users/{uid}
//! users/{uid}/todos/{todoId}
//! users/{uid}/contacts/{contactUid}
//! users/{senderId}/outgoingContactRequests/{receiverId}
//! users/{receiverId}/incomingContactRequests/{senderId}
//! ```

pub const USERS: &str = "users";
pub const TODOS: &str = "todos";
pub const CONTACTS: &str = "contacts";
pub const OUTGOING_REQUESTS: &str = "outgoingContactRequests";
pub const INCOMING_REQUESTS: &str = "incomingContactRequests";

/// Todo field: uids the owner shared the todo with.
pub const SHARED_WITH: &str = "sharedWith";
/// Todo field: uids mentioned in the todo content.
pub const MENTIONED_USERS: &str = "mentionedUsers";
