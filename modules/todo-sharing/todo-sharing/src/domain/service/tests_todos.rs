#![allow(clippy::unwrap_used, clippy::expect_used)]

use access_policy::PolicyConfig;
use todo_sharing_sdk::{NewTodo, TodoPatch};

use super::test_support::{Harness, uid};
use crate::config::{ServiceConfig, TodoSharingConfig};
use crate::domain::error::DomainError;

#[tokio::test]
async fn owner_creates_reads_and_lists() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;

    let first = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("one"))
        .await
        .unwrap();
    let second = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("two"))
        .await
        .unwrap();
    assert_eq!(first.owner_id, uid("A"));
    assert!(!first.completed);
    assert!(h.exists(&format!("users/A/todos/{}", first.id)));

    let read = h
        .services
        .todos
        .get_todo(&a, &uid("A"), &first.id)
        .await
        .unwrap();
    assert_eq!(read, first);

    let ids: Vec<_> = h
        .services
        .todos
        .list_own_todos(&a)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&first.id) && ids.contains(&second.id));
}

#[tokio::test]
async fn content_is_validated() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;

    let err = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "content"));

    let huge = "x".repeat(10_001);
    let err = h
        .services
        .todos
        .create_todo(&a, NewTodo::new(huge))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn content_limit_counts_characters() {
    let cfg = TodoSharingConfig {
        service: ServiceConfig {
            max_content_length: 5,
            ..ServiceConfig::default()
        },
        ..TodoSharingConfig::default()
    };
    let h = Harness::with_policy(PolicyConfig::default(), cfg);
    let a = h.user("A", "a@x.com").await;

    // Five characters, six bytes.
    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("h\u{e9}llo"))
        .await
        .unwrap();
    assert_eq!(todo.content.chars().count(), 5);

    let err = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("h\u{e9}llo!"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "content"));
}

#[tokio::test]
async fn stranger_cannot_read_unshared_todo() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    let c = h.user("C", "c@x.com").await;
    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("private"))
        .await
        .unwrap();

    let err = h
        .services
        .todos
        .get_todo(&c, &uid("A"), &todo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));

    // A missing todo of someone else looks the same as a forbidden one.
    let err = h
        .services
        .todos
        .get_todo(&c, &uid("A"), "nope")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
}

#[tokio::test]
async fn sharing_grants_read_and_update_but_not_delete() {
    let h = Harness::new();
    let (a, b) = h.contacts().await;
    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("shared"))
        .await
        .unwrap();

    let shared = h
        .services
        .todos
        .share_todo(&a, &todo.id, &uid("B"))
        .await
        .unwrap();
    assert!(shared.shared_with.contains(&uid("B")));
    assert!(shared.updated_at >= todo.updated_at);

    let seen = h
        .services
        .todos
        .get_todo(&b, &uid("A"), &todo.id)
        .await
        .unwrap();
    assert_eq!(seen.content, "shared");

    let done = h
        .services
        .todos
        .set_completed(&b, &uid("A"), &todo.id, true)
        .await
        .unwrap();
    assert!(done.completed);
    assert!(done.shared_with.contains(&uid("B")));

    let listed = h.services.todos.list_shared_with_me(&b).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, todo.id);

    // B cannot delete: delete_todo always targets the caller's own todos,
    // and B has no such todo.
    let err = h
        .services
        .todos
        .delete_todo(&b, &todo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TodoNotFound));
    assert!(h.exists(&format!("users/A/todos/{}", todo.id)));
}

#[tokio::test]
async fn sharing_requires_a_contact() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    h.user("C", "c@x.com").await;
    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("mine"))
        .await
        .unwrap();

    let err = h
        .services
        .todos
        .share_todo(&a, &todo.id, &uid("C"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::NotAContact));

    let err = h
        .services
        .todos
        .share_todo(&a, &todo.id, &uid("A"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}

#[tokio::test]
async fn unshare_revokes_access() {
    let h = Harness::new();
    let (a, b) = h.contacts().await;
    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("shared"))
        .await
        .unwrap();
    h.services
        .todos
        .share_todo(&a, &todo.id, &uid("B"))
        .await
        .unwrap();

    let unshared = h
        .services
        .todos
        .unshare_todo(&a, &todo.id, &uid("B"))
        .await
        .unwrap();
    assert!(unshared.shared_with.is_empty());

    let err = h
        .services
        .todos
        .get_todo(&b, &uid("A"), &todo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
    let shared = h.services.todos.list_shared_with_me(&b).await.unwrap();
    assert!(shared.is_empty());
}

#[tokio::test]
async fn mentioned_user_finds_todo_but_cannot_open_it() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    let m = h.user("M", "m@x.com").await;
    let todo = h
        .services
        .todos
        .create_todo(
            &a,
            NewTodo::new("ping @m")
                .mentioning(uid("M"))
                .mentioning(uid("A")),
        )
        .await
        .unwrap();
    assert_eq!(todo.mentioned_users.len(), 1);

    let mentions = h.services.todos.list_mentioning_me(&m).await.unwrap();
    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].id, todo.id);

    let err = h
        .services
        .todos
        .get_todo(&m, &uid("A"), &todo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
}

#[tokio::test]
async fn update_patch_applies_and_empty_patch_is_a_read() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("draft"))
        .await
        .unwrap();

    let same = h
        .services
        .todos
        .update_todo(&a, &uid("A"), &todo.id, TodoPatch::default())
        .await
        .unwrap();
    assert_eq!(same, todo);

    let edited = h
        .services
        .todos
        .update_todo(
            &a,
            &uid("A"),
            &todo.id,
            TodoPatch {
                content: Some("final".to_owned()),
                image_ref: Some("img/1".to_owned()),
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(edited.content, "final");
    assert_eq!(edited.image_ref.as_deref(), Some("img/1"));
    assert_eq!(edited.created_at, todo.created_at);

    let err = h
        .services
        .todos
        .update_todo(
            &a,
            &uid("A"),
            "missing",
            TodoPatch {
                completed: Some(true),
                ..TodoPatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TodoNotFound));
}

#[tokio::test]
async fn owner_deletes() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("bye"))
        .await
        .unwrap();

    h.services.todos.delete_todo(&a, &todo.id).await.unwrap();
    assert!(!h.exists(&format!("users/A/todos/{}", todo.id)));

    let err = h
        .services
        .todos
        .delete_todo(&a, &todo.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::TodoNotFound));
}

#[tokio::test]
async fn share_bound_from_policy_config() {
    let policy = PolicyConfig {
        max_shared_with: Some(1),
        ..PolicyConfig::default()
    };
    let h = Harness::with_policy(policy, TodoSharingConfig::default());
    let (a, _b) = h.contacts().await;
    let c = h.user("C", "c@x.com").await;
    h.services
        .contacts
        .send_contact_request(&a, "c@x.com")
        .await
        .unwrap();
    h.services
        .contacts
        .accept_contact_request(&c, &uid("A"))
        .await
        .unwrap();

    let todo = h
        .services
        .todos
        .create_todo(&a, NewTodo::new("busy"))
        .await
        .unwrap();
    h.services
        .todos
        .share_todo(&a, &todo.id, &uid("B"))
        .await
        .unwrap();
    let err = h
        .services
        .todos
        .share_todo(&a, &todo.id, &uid("C"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden));
}

#[tokio::test]
async fn todo_id_with_separator_is_rejected() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;
    let err = h
        .services
        .todos
        .get_todo(&a, &uid("A"), "x/contacts/B")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}
