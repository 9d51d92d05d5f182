// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn base_url_uses_configured_protocol() {
    let mut c = Compute::new(ComputeId::new("c1"), "main", "10.0.0.1", 8001);
    assert_eq!(c.base_url(), "http://10.0.0.1:8001");
    c.protocol = ComputeProtocol::Https;
    assert_eq!(c.base_url(), "https://10.0.0.1:8001");
}

#[test]
fn is_local_and_is_vm_detect_reserved_ids() {
    let local = Compute::new(ComputeId::new("local"), "Main server", "127.0.0.1", 3080);
    assert!(local.is_local());
    assert!(!local.is_vm());

    let vm = Compute::new(ComputeId::new("vm"), "GNS3 VM", "192.168.1.50", 3080);
    assert!(vm.is_vm());
    assert!(!vm.is_local());
}

#[test]
fn new_compute_starts_disconnected() {
    let c = Compute::new(ComputeId::new("remote-1"), "remote", "10.0.0.2", 3080);
    assert_eq!(c.connection_state, ConnectionState::Disconnected);
    assert!(c.last_error.is_none());
}
