#![allow(clippy::unwrap_used, clippy::expect_used)]

//! The policy plugged into the secure store layer through the PEP.

use std::sync::Arc;

use access_policy::{AccessPolicyModule, PolicyConfig};
use access_policy_sdk::PolicyEnforcer;
use docstore::secure::{SecureStore, SecureStoreError};
use docstore::{DocPath, Document, DocumentStore, MemoryStore, Query, Write};
use serde_json::json;
use todoshare_security::{SecurityContext, Uid};

fn ctx(uid: &str) -> SecurityContext {
    SecurityContext::for_subject(Uid::new(uid).unwrap())
}

fn p(raw: &str) -> DocPath {
    DocPath::parse(raw).unwrap()
}

struct World {
    raw: Arc<MemoryStore>,
    enforcer: PolicyEnforcer,
}

impl World {
    async fn new() -> Self {
        let raw = Arc::new(MemoryStore::new());
        raw.commit(vec![
            Write::set(
                p("users/A/todos/t1"),
                Document::new()
                    .with("ownerId", json!("A"))
                    .with("content", json!("buy milk"))
                    .with("sharedWith", json!(["B"]))
                    .with("mentionedUsers", json!(["M"])),
            ),
            Write::set(
                p("users/C/todos/t2"),
                Document::new()
                    .with("ownerId", json!("C"))
                    .with("sharedWith", json!([]))
                    .with("mentionedUsers", json!([])),
            ),
        ])
        .await
        .unwrap();
        Self {
            raw,
            enforcer: AccessPolicyModule::enforcer(PolicyConfig::default()).unwrap(),
        }
    }

    fn as_user(&self, uid: &str) -> SecureStore {
        SecureStore::new(self.raw.clone(), self.enforcer.gate(&ctx(uid)))
    }
}

#[tokio::test]
async fn stranger_cannot_read_shared_todo() {
    let world = World::new().await;

    let err = world
        .as_user("C")
        .get(&p("users/A/todos/t1"))
        .await
        .unwrap_err();
    assert!(matches!(err, SecureStoreError::Denied { .. }));
    assert_eq!(err.to_string(), "permission denied");

    let shared = world.as_user("B").get(&p("users/A/todos/t1")).await;
    assert!(shared.unwrap().is_some());
}

#[tokio::test]
async fn mentioned_user_reads_through_collection_group() {
    let world = World::new().await;
    let store = world.as_user("M");

    let mentions = Query::group("todos").where_array_contains("mentionedUsers", "M");
    let rows = store.query(&mentions).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].path, p("users/A/todos/t1"));

    // The same document by path is not readable for a mention.
    assert!(store.get(&p("users/A/todos/t1")).await.is_err());
}

#[tokio::test]
async fn unfiltered_group_query_fails_closed() {
    let world = World::new().await;
    let err = world
        .as_user("B")
        .query(&Query::group("todos"))
        .await
        .unwrap_err();
    assert!(err.is_denied());
}

#[tokio::test]
async fn shared_user_cannot_delete() {
    let world = World::new().await;
    let err = world
        .as_user("B")
        .delete(p("users/A/todos/t1"))
        .await
        .unwrap_err();
    assert!(err.is_denied());
    assert!(world.raw.contains(&p("users/A/todos/t1")));
}

#[tokio::test]
async fn only_the_named_contact_may_insert_itself() {
    let world = World::new().await;
    let entry = Document::new().with("email", json!("c@x.com"));

    let err = world
        .as_user("C")
        .create(p("users/A/contacts/B"), entry.clone())
        .await
        .unwrap_err();
    assert!(err.is_denied());

    world
        .as_user("B")
        .create(p("users/A/contacts/B"), entry)
        .await
        .unwrap();
    assert!(world.raw.contains(&p("users/A/contacts/B")));
}
