#![allow(clippy::unwrap_used, clippy::expect_used)]

use todo_sharing_sdk::{ProfilePatch, Theme};
use todoshare_security::SecurityContext;

use super::test_support::{Harness, ctx, uid};
use crate::config::{ServiceConfig, TodoSharingConfig};
use crate::domain::error::DomainError;

#[tokio::test]
async fn ensure_profile_creates_once() {
    let h = Harness::new();
    let a = ctx("A", "Alice@X.com");

    let first = h
        .services
        .profiles
        .ensure_profile(&a, Some("Alice".to_owned()))
        .await
        .unwrap();
    assert_eq!(first.email, "alice@x.com");
    assert_eq!(first.display_name, "Alice");
    assert_eq!(first.theme, Theme::System);

    let again = h
        .services
        .profiles
        .ensure_profile(&a, Some("Someone else".to_owned()))
        .await
        .unwrap();
    assert_eq!(again, first);
    assert!(h.exists("users/A"));
}

#[tokio::test]
async fn display_name_defaults_to_email_local_part() {
    let h = Harness::new();
    let profile = h
        .services
        .profiles
        .ensure_profile(&ctx("A", "u1@x.com"), None)
        .await
        .unwrap();
    assert_eq!(profile.display_name, "u1");
}

#[tokio::test]
async fn anonymous_caller_is_unauthenticated() {
    let h = Harness::new();
    let err = h
        .services
        .profiles
        .ensure_profile(&SecurityContext::anonymous(), None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Unauthenticated));
}

#[tokio::test]
async fn sign_in_without_email_is_rejected() {
    let h = Harness::new();
    let no_email = SecurityContext::for_subject(uid("A"));
    let err = h
        .services
        .profiles
        .ensure_profile(&no_email, None)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { ref field, .. } if field == "email"));
}

#[tokio::test]
async fn any_signed_in_user_reads_profiles() {
    let h = Harness::new();
    h.user("A", "a@x.com").await;
    let b = h.user("B", "b@x.com").await;

    let profile = h
        .services
        .profiles
        .get_profile(&b, &uid("A"))
        .await
        .unwrap();
    assert_eq!(profile.email, "a@x.com");

    let err = h
        .services
        .profiles
        .get_profile(&b, &uid("Z"))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProfileNotFound));
}

#[tokio::test]
async fn update_profile_merges_patch() {
    let h = Harness::new();
    let a = h.user("A", "a@x.com").await;

    let updated = h
        .services
        .profiles
        .update_profile(
            &a,
            ProfilePatch {
                theme: Some(Theme::Dark),
                avatar_url: Some("https://img/a.png".to_owned()),
                ..ProfilePatch::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.theme, Theme::Dark);
    assert_eq!(updated.display_name, "a");
    assert_eq!(updated.avatar_url.as_deref(), Some("https://img/a.png"));
}

#[tokio::test]
async fn update_profile_before_sign_in_is_not_found() {
    let h = Harness::new();
    let err = h
        .services
        .profiles
        .update_profile(
            &ctx("A", "a@x.com"),
            ProfilePatch {
                display_name: Some("A".to_owned()),
                ..ProfilePatch::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ProfileNotFound));
}

#[tokio::test]
async fn display_name_limits_apply() {
    let cfg = TodoSharingConfig {
        service: ServiceConfig {
            max_display_name_length: 5,
            ..ServiceConfig::default()
        },
        ..TodoSharingConfig::default()
    };
    let h = Harness::with_policy(access_policy::PolicyConfig::default(), cfg);
    let a = h.user("A", "a@x.com").await;

    for bad in ["   ", "far too long"] {
        let err = h
            .services
            .profiles
            .update_profile(
                &a,
                ProfilePatch {
                    display_name: Some(bad.to_owned()),
                    ..ProfilePatch::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation { .. }), "{bad:?}");
    }
}

#[tokio::test]
async fn find_by_email_ignores_case() {
    let h = Harness::new();
    h.user("A", "u1@x.com").await;
    let b = h.user("B", "u2@x.com").await;

    let found = h
        .services
        .profiles
        .find_user_by_email(&b, "  U1@X.COM ")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, uid("A"));

    let missing = h
        .services
        .profiles
        .find_user_by_email(&b, "nobody@x.com")
        .await
        .unwrap();
    assert!(missing.is_none());

    let err = h
        .services
        .profiles
        .find_user_by_email(&b, "not-an-email")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation { .. }));
}
