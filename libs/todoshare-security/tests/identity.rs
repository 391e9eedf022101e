#![allow(clippy::unwrap_used, clippy::expect_used)]

use todoshare_security::{SecurityContext, Uid};

#[test]
fn anonymous_context_has_no_subject() {
    let ctx = SecurityContext::anonymous();
    assert!(!ctx.is_authenticated());
    assert!(ctx.subject_id().is_none());
}

#[test]
fn uid_parses_from_str() {
    let uid: Uid = "A".parse().unwrap();
    let ctx = SecurityContext::for_subject(uid.clone());
    assert_eq!(ctx.subject_id(), Some(&uid));
}

#[test]
fn uids_order_lexicographically() {
    let mut uids: Vec<Uid> = ["C", "A", "B"].iter().map(|s| s.parse().unwrap()).collect();
    uids.sort();
    let ordered: Vec<&str> = uids.iter().map(Uid::as_str).collect();
    assert_eq!(ordered, ["A", "B", "C"]);
}
