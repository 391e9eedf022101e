//! `demo`: the two-user handshake, sharing and a refused third party,
//! against an in-memory store.

use std::sync::Arc;

use access_policy::AccessPolicyModule;
use anyhow::Context;
use docstore::{DocumentStore, MemoryStore};
use todo_sharing::TodoSharingModule;
use todo_sharing_sdk::{NewTodo, SharingError};
use todoshare_security::{SecurityContext, Uid};

use crate::config::AppConfig;

fn user(id: &str, email: &str) -> anyhow::Result<SecurityContext> {
    Ok(SecurityContext::builder()
        .subject_id(Uid::new(id)?)
        .email(email)
        .build())
}

fn show_store(store: &MemoryStore) {
    for path in store.paths() {
        println!("    {path}");
    }
}

/// Run the scenario, printing each step and the documents it leaves.
///
/// # Errors
///
/// Fails if any step does not behave as the sharing rules require.
pub async fn run(cfg: &AppConfig) -> anyhow::Result<()> {
    let store = Arc::new(MemoryStore::new());
    let policy = AccessPolicyModule::new().init(cfg.policy.clone())?;
    let raw: Arc<dyn DocumentStore> = store.clone();
    let client = TodoSharingModule::new().init(raw, policy, &cfg.todo_sharing)?;

    let u1 = user("U1", "u1@x.com")?;
    let u2 = user("U2", "u2@x.com")?;
    let u3 = user("U3", "u3@x.com")?;
    for ctx in [&u1, &u2, &u3] {
        client.ensure_profile(ctx, None).await?;
    }
    let (u1_id, u2_id, u3_id) = (Uid::new("U1")?, Uid::new("U2")?, Uid::new("U3")?);

    println!("1. U1 sends a contact request to u2@x.com");
    client.send_contact_request(&u1, "u2@x.com").await?;
    show_store(&store);

    println!("2. U2 accepts");
    let contact = client.accept_contact_request(&u2, &u1_id).await?;
    println!(
        "   U2 now lists {} ({})",
        contact.display_name, contact.email
    );
    show_store(&store);

    println!("3. U1 creates a todo and shares it with U2");
    let todo = client
        .create_todo(&u1, NewTodo::new("<p>book flights</p>"))
        .await?;
    client.share_todo(&u1, &todo.id, &u2_id).await?;
    let seen = client.get_todo(&u2, &u1_id, &todo.id).await?;
    println!("   U2 reads: {}", seen.content);

    println!("4. U3 tries to read it");
    match client.get_todo(&u3, &u1_id, &todo.id).await {
        Err(SharingError::Forbidden) => println!("   refused: {}", SharingError::Forbidden),
        other => anyhow::bail!("U3 should have been refused, got {other:?}"),
    }

    println!("5. U1 mentions U3 in another todo");
    client
        .create_todo(&u1, NewTodo::new("<p>ask @u3</p>").mentioning(u3_id))
        .await?;
    let mentions = client
        .list_mentioning_me(&u3)
        .await
        .context("mentions listing")?;
    println!("   U3 finds {} mention(s)", mentions.len());

    tracing::info!(documents = store.len(), "demo finished");
    Ok(())
}
