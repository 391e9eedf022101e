//! The sharing rule table.
//!
//! Deny by default. Every rule is a pure predicate over the caller, the
//! document path, the collection-group flag and the existing and proposed
//! document state. Field predicates (`sharedWith`, `mentionedUsers`) read the
//! **existing** document, so a read of a missing todo only passes the owner
//! predicate.
//!
//! | Resource | Operation | Permit condition |
//! |---|---|---|
//! | `users/{u}` | get, list | authenticated |
//! | `users/{u}` | create, update, delete | caller == `u` |
//! | `users/{u}/todos/{t}` | get, list, update | caller == `u` or caller in `sharedWith` |
//! | `users/{u}/todos/{t}` | create, delete | caller == `u` |
//! | group `todos` | get, list | caller == `u`, in `sharedWith` or in `mentionedUsers` |
//! | `users/{u}/contacts/{c}` | any | caller == `u` |
//! | `users/{u}/contacts/{c}` | create | caller == `c` |
//! | `users/{s}/outgoingContactRequests/{r}` | any | caller == `s` |
//! | `users/{s}/outgoingContactRequests/{r}` | delete | caller == `r` |
//! | `users/{r}/incomingContactRequests/{s}` | get, list, delete | caller == `r` |
//! | `users/{r}/incomingContactRequests/{s}` | create | caller == `s` |

use std::fmt;

use access_policy_sdk::Resource;
use access_policy_sdk::layout::{MENTIONED_USERS, SHARED_WITH};
use docstore::Document;
use docstore::secure::{Access, Operation};
use todoshare_security::Uid;

use crate::config::PolicyConfig;

/// Why an access was refused. Logged, never shown to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenyCode {
    Unauthenticated,
    UnknownResource,
    GroupNotQueryable,
    NotOwner,
    NotShared,
    NotContactParty,
    NotSender,
    NotReceiver,
    TooManyShares,
}

impl DenyCode {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::UnknownResource => "UNKNOWN_RESOURCE",
            Self::GroupNotQueryable => "GROUP_NOT_QUERYABLE",
            Self::NotOwner => "NOT_OWNER",
            Self::NotShared => "NOT_SHARED",
            Self::NotContactParty => "NOT_CONTACT_PARTY",
            Self::NotSender => "NOT_SENDER",
            Self::NotReceiver => "NOT_RECEIVER",
            Self::TooManyShares => "TOO_MANY_SHARES",
        }
    }
}

impl fmt::Display for DenyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule table exactly as documented above, with no configured
/// extensions.
#[must_use]
pub fn permit(caller: Option<&Uid>, access: &Access<'_>) -> bool {
    evaluate(&PolicyConfig::strict(), caller, access).is_ok()
}

fn allow_if(cond: bool, code: DenyCode) -> Result<(), DenyCode> {
    if cond { Ok(()) } else { Err(code) }
}

fn in_set(doc: Option<&Document>, field: &str, caller: &str) -> bool {
    doc.is_some_and(|d| d.set_contains(field, caller))
}

/// Evaluate one access under `config`.
///
/// # Errors
///
/// Returns the [`DenyCode`] of the first rule that refused.
pub fn evaluate(
    config: &PolicyConfig,
    caller: Option<&Uid>,
    access: &Access<'_>,
) -> Result<(), DenyCode> {
    let Some(caller) = caller.map(Uid::as_str) else {
        return Err(DenyCode::Unauthenticated);
    };
    let resource = Resource::classify(access.path).ok_or(DenyCode::UnknownResource)?;
    let op = access.operation;

    if access.collection_group {
        return match resource {
            Resource::Todo { owner_id, .. } if op.is_read() => allow_if(
                caller == owner_id
                    || in_set(access.existing, SHARED_WITH, caller)
                    || in_set(access.existing, MENTIONED_USERS, caller),
                DenyCode::NotShared,
            ),
            _ => Err(DenyCode::GroupNotQueryable),
        };
    }

    match resource {
        Resource::UserProfile { user_id } => {
            if op.is_read() {
                Ok(())
            } else {
                allow_if(caller == user_id, DenyCode::NotOwner)
            }
        }

        Resource::Todo { owner_id, .. } => match op {
            Operation::Create => {
                allow_if(caller == owner_id, DenyCode::NotOwner)?;
                check_share_bound(config, access.proposed)
            }
            Operation::Delete => allow_if(caller == owner_id, DenyCode::NotOwner),
            Operation::Get | Operation::List | Operation::Update => {
                allow_if(
                    caller == owner_id || in_set(access.existing, SHARED_WITH, caller),
                    DenyCode::NotShared,
                )?;
                if op == Operation::Update {
                    check_share_bound(config, access.proposed)?;
                }
                Ok(())
            }
        },

        Resource::Contact {
            user_id,
            contact_id,
        } => {
            let party = caller == user_id || (op == Operation::Create && caller == contact_id);
            allow_if(party, DenyCode::NotContactParty)
        }

        Resource::OutgoingRequest {
            sender_id,
            receiver_id,
        } => {
            let allowed = caller == sender_id || (op == Operation::Delete && caller == receiver_id);
            allow_if(allowed, DenyCode::NotSender)
        }

        Resource::IncomingRequest {
            receiver_id,
            sender_id,
        } => match op {
            Operation::Create => allow_if(caller == sender_id, DenyCode::NotSender),
            Operation::Get | Operation::List => {
                allow_if(caller == receiver_id, DenyCode::NotReceiver)
            }
            Operation::Delete => allow_if(
                caller == receiver_id
                    || (config.sender_may_retract_incoming && caller == sender_id),
                DenyCode::NotReceiver,
            ),
            Operation::Update => Err(DenyCode::NotReceiver),
        },
    }
}

fn check_share_bound(config: &PolicyConfig, proposed: Option<&Document>) -> Result<(), DenyCode> {
    match (config.max_shared_with, proposed) {
        (Some(max), Some(doc)) => allow_if(
            doc.string_set(SHARED_WITH).len() <= max,
            DenyCode::TooManyShares,
        ),
        _ => Ok(()),
    }
}
