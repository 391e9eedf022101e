#![allow(clippy::unwrap_used, clippy::expect_used)]

use access_policy::PolicyConfig;

use super::test_support::{Harness, ctx, uid};
use crate::config::TodoSharingConfig;
use crate::domain::error::DomainError;

const OUT_AB: &str = "users/A/outgoingContactRequests/B";
const IN_AB: &str = "users/B/incomingContactRequests/A";

#[tokio::test]
async fn send_creates_both_halves_and_no_entries() {
    let h = Harness::new();
    let a = h.user("A", "u1@x.com").await;
    let b = h.user("B", "u2@x.com").await;

    let request = h
        .services
        .contacts
        .send_contact_request(&a, "U2@x.com")
        .await
        .unwrap();
    assert_eq!(request.sender_id, uid("A"));
    assert_eq!(request.receiver_id, uid("B"));
    assert_eq!(request.receiver_email, "u2@x.com");

    assert!(h.exists(OUT_AB));
    assert!(h.exists(IN_AB));
    assert!(!h.exists("users/A/contacts/B"));
    assert!(!h.exists("users/B/contacts/A"));

    let outgoing = h
        .services
        .contacts
        .list_outgoing_requests(&a)
        .await
        .unwrap();
    let incoming = h
        .services
        .contacts
        .list_incoming_requests(&b)
        .await
        .unwrap();
    assert_eq!(outgoing, vec![request.clone()]);
    assert_eq!(incoming, vec![request]);
    let to_sender = h.services.contacts.list_incoming_requests(&a).await;
    assert!(to_sender.unwrap().is_empty());
}

#[tokio::test]
async fn send_is_refused_for_bad_targets() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;

    let err = h
        .services
        .contacts
        .send_contact_request(&a, "A@X.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::SelfRequest));

    let err = h
        .services
        .contacts
        .send_contact_request(&a, "ghost@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::UserNotFound { ref email } if email == "ghost@x.com"));
    assert!(h.store.paths().iter().all(|p| p.depth() == 1));
}

#[tokio::test]
async fn sender_needs_a_profile() {
    let h = Harness::new();
    h.user("B", "b@x.com").await;
    let err = h
        .services
        .contacts
        .send_contact_request(&ctx("A", "a@x.com"), "b@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProfileNotFound));
}

#[tokio::test]
async fn pending_request_blocks_both_directions() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    let b = h.user("B", "b@x.com").await;
    h.services
        .contacts
        .send_contact_request(&a, "b@x.com")
        .await
        .unwrap();

    let again = h
        .services
        .contacts
        .send_contact_request(&a, "b@x.com")
        .await
        .unwrap_err();
    assert!(matches!(again, DomainError::RequestPending));

    let reverse = h
        .services
        .contacts
        .send_contact_request(&b, "a@x.com")
        .await
        .unwrap_err();
    assert!(matches!(reverse, DomainError::RequestPending));
    assert!(!h.exists("users/B/outgoingContactRequests/A"));
}

#[tokio::test]
async fn accept_swaps_requests_for_entries() {
    let h = Harness::new();
    let a = h.user("A", "u1@x.com").await;
    let b = h.user("B", "u2@x.com").await;
    h.services
        .contacts
        .send_contact_request(&a, "u2@x.com")
        .await
        .unwrap();

    let contact = h
        .services
        .contacts
        .accept_contact_request(&b, &uid("A"))
        .await
        .unwrap();
    assert_eq!(contact.uid, uid("A"));
    assert_eq!(contact.email, "u1@x.com");

    assert!(!h.exists(OUT_AB));
    assert!(!h.exists(IN_AB));
    assert!(h.exists("users/A/contacts/B"));
    assert!(h.exists("users/B/contacts/A"));

    let a_contacts = h.services.contacts.list_contacts(&a).await.unwrap();
    assert_eq!(a_contacts.len(), 1);
    assert_eq!(a_contacts[0].uid, uid("B"));
    assert_eq!(a_contacts[0].display_name, "u2");
    assert_eq!(a_contacts[0].since, contact.since);

    let err = h
        .services
        .contacts
        .accept_contact_request(&b, &uid("A"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RequestNotFound));

    let err = h
        .services
        .contacts
        .send_contact_request(&a, "u2@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AlreadyContacts));
}

#[tokio::test]
async fn only_the_receiver_can_accept() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    h.user("B", "b@x.com").await;
    let c = h.user("C", "c@x.com").await;
    h.services
        .contacts
        .send_contact_request(&a, "b@x.com")
        .await
        .unwrap();

    let err = h
        .services
        .contacts
        .accept_contact_request(&c, &uid("A"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RequestNotFound));

    // The sender cannot accept on the receiver's behalf either.
    let err = h
        .services
        .contacts
        .accept_contact_request(&a, &uid("B"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RequestNotFound));
    assert!(h.exists(OUT_AB) && h.exists(IN_AB));
}

#[tokio::test]
async fn reject_removes_both_halves() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    let b = h.user("B", "b@x.com").await;
    h.services
        .contacts
        .send_contact_request(&a, "b@x.com")
        .await
        .unwrap();

    h.services
        .contacts
        .reject_contact_request(&b, &uid("A"))
        .await
        .unwrap();
    assert!(!h.exists(OUT_AB));
    assert!(!h.exists(IN_AB));
    assert!(!h.exists("users/A/contacts/B"));
    assert!(!h.exists("users/B/contacts/A"));

    let err = h
        .services
        .contacts
        .reject_contact_request(&b, &uid("A"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::RequestNotFound));
}

#[tokio::test]
async fn cancel_removes_both_halves() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    h.user("B", "b@x.com").await;
    h.services
        .contacts
        .send_contact_request(&a, "b@x.com")
        .await
        .unwrap();

    h.services
        .contacts
        .cancel_contact_request(&a, &uid("B"))
        .await
        .unwrap();
    assert!(!h.exists(OUT_AB));
    assert!(!h.exists(IN_AB));
}

#[tokio::test]
async fn cancel_under_strict_policy_changes_nothing() {
    let h = Harness::with_policy(PolicyConfig::strict(), TodoSharingConfig::default());
    let a = h.user("A", "a@x.com").await;
    h.user("B", "b@x.com").await;
    h.services
        .contacts
        .send_contact_request(&a, "b@x.com")
        .await
        .unwrap();

    let err = h
        .services
        .contacts
        .cancel_contact_request(&a, &uid("B"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
    assert!(h.exists(OUT_AB));
    assert!(h.exists(IN_AB));
}

#[tokio::test]
async fn remove_contact_only_touches_own_list() {
    let h = Harness::new();
    let (a, _b) = h.contacts().await;

    h.services
        .contacts
        .remove_contact(&a, &uid("B"))
        .await
        .unwrap();
    assert!(!h.exists("users/A/contacts/B"));
    assert!(h.exists("users/B/contacts/A"));

    let err = h
        .services
        .contacts
        .remove_contact(&a, &uid("B"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ContactNotFound));
}

#[tokio::test]
async fn re_adding_after_one_sided_removal_keeps_the_other_entry() {
    let h = Harness::new();
    let (a, b) = h.contacts().await;
    h.services
        .contacts
        .remove_contact(&b, &uid("A"))
        .await
        .unwrap();

    // A still lists B, so A cannot ask again; B can.
    let err = h
        .services
        .contacts
        .send_contact_request(&a, "b@x.com")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::AlreadyContacts));

    h.services
        .contacts
        .send_contact_request(&b, "a@x.com")
        .await
        .unwrap();
    h.services
        .contacts
        .accept_contact_request(&a, &uid("B"))
        .await
        .unwrap();
    assert!(h.exists("users/A/contacts/B"));
    assert!(h.exists("users/B/contacts/A"));
}

#[tokio::test]
async fn anonymous_callers_get_nothing() {
    let h = Harness::new();
    let anon = todoshare_security::SecurityContext::anonymous();
    let err = h.services.contacts.list_contacts(&anon).await.unwrap_err();
    assert!(matches!(err, DomainError::Unauthenticated));
}
