// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::config_dir;

#[test]
#[serial]
fn config_dir_honors_env_override() {
    std::env::set_var("NETCTL_CONFIG_DIR", "/tmp/netctl-test-config-dir");
    assert_eq!(config_dir(), std::path::PathBuf::from("/tmp/netctl-test-config-dir"));
    std::env::remove_var("NETCTL_CONFIG_DIR");
}

#[test]
#[serial]
fn config_dir_falls_back_to_a_gns3_subdirectory() {
    std::env::remove_var("NETCTL_CONFIG_DIR");
    let dir = config_dir();
    assert_eq!(dir.file_name().unwrap(), "GNS3");
}
