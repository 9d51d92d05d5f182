// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn short_truncates_long_ids() {
    let id = ComputeId::new("a-very-long-compute-identifier");
    assert_eq!(id.short(8), "a-very-l");
}

#[test]
fn short_leaves_short_ids_alone() {
    let id = ComputeId::new("abc");
    assert_eq!(id.short(8), "abc");
}

#[test]
fn reserved_ids_are_recognized() {
    assert!(ComputeId::new("local").is_reserved());
    assert!(ComputeId::new("vm").is_reserved());
    assert!(!ComputeId::new("my-server").is_reserved());
}

#[test]
fn display_matches_inner_string() {
    let id = ProjectId::new("abc-123");
    assert_eq!(id.to_string(), "abc-123");
}

#[test]
fn uuid_v3_is_deterministic() {
    let a = uuid_v3(&TEMPLATE_NAMESPACE, "/opt/templates/qemu-router.gns3a");
    let b = uuid_v3(&TEMPLATE_NAMESPACE, "/opt/templates/qemu-router.gns3a");
    assert_eq!(a, b);
    let c = uuid_v3(&TEMPLATE_NAMESPACE, "/opt/templates/other.gns3a");
    assert_ne!(a, c);
}

#[test]
fn uuid_id_gen_produces_unique_values() {
    let gen = UuidIdGen;
    assert_ne!(gen.next(), gen.next());
}
