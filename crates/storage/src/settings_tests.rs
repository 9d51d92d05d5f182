// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use netctl_core::{Compute, ComputeId};

use super::*;

#[test]
fn load_returns_none_when_file_absent() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("netctl_controller.conf");
    assert!(load(&path).unwrap().is_none());
}

#[test]
fn save_then_load_round_trips() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("netctl_controller.conf");

    let mut settings = Settings::default();
    settings.computes.push(Compute::new(ComputeId::new("remote-1"), "remote", "10.0.0.2", 3080));
    settings.gns3vm.enable = true;

    save(&path, &settings).unwrap();
    let loaded = load(&path).unwrap().expect("file should exist after save");

    assert_eq!(loaded.computes.len(), 1);
    assert_eq!(loaded.computes[0].compute_id, ComputeId::new("remote-1"));
    assert!(loaded.gns3vm.enable);
    assert_eq!(loaded.version, CURRENT_VERSION);
}

#[test]
fn save_does_not_leave_a_tmp_file_behind() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("netctl_controller.conf");
    save(&path, &Settings::default()).unwrap();
    assert!(!tmp_path_for(&path).exists());
}

#[test]
fn save_overwrites_an_existing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("netctl_controller.conf");

    save(&path, &Settings::default()).unwrap();
    let mut second = Settings::default();
    second.appliance_templates_etag = Some("abc123".to_string());
    save(&path, &second).unwrap();

    let loaded = load(&path).unwrap().unwrap();
    assert_eq!(loaded.appliance_templates_etag, Some("abc123".to_string()));
}
