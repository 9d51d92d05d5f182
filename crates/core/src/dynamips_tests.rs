// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde_json::json;

use super::*;

#[test]
fn minimal_valid_request_passes() {
    let req = json!({"name": "R1"});
    assert!(validate_vm_create(&req).is_ok());
}

#[test]
fn missing_name_is_rejected() {
    let req = json!({"platform": "c7200"});
    assert_eq!(validate_vm_create(&req), Err(ValidationError::MissingField("name")));
}

#[test]
fn valid_platform_and_chassis_pass() {
    let req = json!({"name": "R1", "platform": "c3600", "chassis": "3640"});
    assert!(validate_vm_create(&req).is_ok());

    let req = json!({"name": "R1", "platform": "c3600", "chassis": "3660XM"});
    assert!(validate_vm_create(&req).is_ok());
}

#[test]
fn bad_platform_is_rejected() {
    let req = json!({"name": "R1", "platform": "router"});
    assert!(matches!(validate_vm_create(&req), Err(ValidationError::PatternMismatch { field: "platform", .. })));
}

#[test]
fn mac_addr_must_be_dotted_triples() {
    let req = json!({"name": "R1", "mac_addr": "0001.0002.0003"});
    assert!(validate_vm_create(&req).is_ok());

    let req = json!({"name": "R1", "mac_addr": "00:01:02:03:04:05"});
    assert!(matches!(validate_vm_create(&req), Err(ValidationError::PatternMismatch { field: "mac_addr", .. })));
}

#[test]
fn confreg_must_be_four_hex_digits() {
    let req = json!({"name": "R1", "confreg": "0x2102"});
    assert!(validate_vm_create(&req).is_ok());

    let req = json!({"name": "R1", "confreg": "0x21"});
    assert!(matches!(validate_vm_create(&req), Err(ValidationError::PatternMismatch { field: "confreg", .. })));
}

#[test]
fn iomem_is_clamped_to_0_100() {
    let req = json!({"name": "R1", "iomem": 50});
    assert!(validate_vm_create(&req).is_ok());

    let req = json!({"name": "R1", "iomem": 150});
    assert!(matches!(validate_vm_create(&req), Err(ValidationError::OutOfRange { field: "iomem", .. })));
}

#[test]
fn npe_and_midplane_are_enumerated() {
    let req = json!({"name": "R1", "npe": "npe-400"});
    assert!(validate_vm_create(&req).is_ok());
    let req = json!({"name": "R1", "npe": "npe-unknown"});
    assert!(validate_vm_create(&req).is_err());

    let req = json!({"name": "R1", "midplane": "vxr"});
    assert!(validate_vm_create(&req).is_ok());
    let req = json!({"name": "R1", "midplane": "bogus"});
    assert!(validate_vm_create(&req).is_err());
}

#[test]
fn ports_must_be_in_range() {
    assert!(validate_port(1).is_ok());
    assert!(validate_port(65535).is_ok());
    assert!(validate_port(0).is_err());
    assert!(validate_port(70000).is_err());
}

#[test]
fn vm_id_accepts_uuid_or_legacy_integer() {
    let req = json!({"name": "R1", "vm_id": "550e8400-e29b-41d4-a716-446655440000"});
    assert!(validate_vm_create(&req).is_ok());

    let req = json!({"name": "R1", "vm_id": "42"});
    assert!(validate_vm_create(&req).is_ok());

    let req = json!({"name": "R1", "vm_id": "not-a-valid-id"});
    assert!(validate_vm_create(&req).is_err());
}
