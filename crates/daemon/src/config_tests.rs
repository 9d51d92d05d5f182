// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serial_test::serial;

use super::*;

#[test]
fn default_config_matches_documented_defaults() {
    let config = ServerConfig::default();
    assert_eq!(config.host, "localhost");
    assert_eq!(config.port, 3080);
    assert_eq!(config.protocol, "http");
}

#[test]
#[serial]
fn from_env_applies_overrides() {
    std::env::set_var("NETCTL_SERVER_HOST", "0.0.0.0");
    std::env::set_var("NETCTL_SERVER_PORT", "4000");
    let config = ServerConfig::from_env();
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 4000);
    std::env::remove_var("NETCTL_SERVER_HOST");
    std::env::remove_var("NETCTL_SERVER_PORT");
}

#[test]
#[serial]
fn from_env_falls_back_to_defaults_when_unset() {
    std::env::remove_var("NETCTL_SERVER_HOST");
    let config = ServerConfig::from_env();
    assert_eq!(config.host, "localhost");
}

#[test]
fn reload_invokes_registered_callbacks() {
    let store = ConfigStore::new(ServerConfig::default());
    let seen = std::sync::Arc::new(parking_lot::Mutex::new(None));
    let seen_clone = seen.clone();
    store.on_change(move |config| {
        *seen_clone.lock() = Some(config.host.clone());
    });

    let mut updated = ServerConfig::default();
    updated.host = "10.0.0.1".to_string();
    store.reload(updated);

    assert_eq!(*seen.lock(), Some("10.0.0.1".to_string()));
    assert_eq!(store.current().host, "10.0.0.1");
}
