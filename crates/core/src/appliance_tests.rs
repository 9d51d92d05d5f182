// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn builtin_appliances_returns_seven_fixed_entries() {
    let builtins = builtin_appliances();
    assert_eq!(builtins.len(), 7);
    assert!(builtins.iter().all(|a| a.builtin));
    let names: Vec<&str> = builtins.iter().map(|a| a.name.as_str()).collect();
    assert!(names.contains(&"Cloud"));
    assert!(names.contains(&"VPCS"));
}

#[test]
fn builtin_ids_are_stable_across_calls() {
    let first = builtin_appliances();
    let second = builtin_appliances();
    for (a, b) in first.iter().zip(second.iter()) {
        assert_eq!(a.appliance_id, b.appliance_id);
    }
}

#[test]
fn user_appliance_is_not_builtin() {
    let a = Appliance::new(ApplianceId::new("a1"), ApplianceType::Qemu, "My Router");
    assert!(!a.builtin);
}
