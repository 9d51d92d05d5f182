// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use std::sync::Arc;

use netctl_adapters::FakeComputeTransport;
use netctl_core::Compute;

use super::*;

fn registry() -> (ComputeRegistry, Arc<FakeComputeTransport>) {
    let transport = Arc::new(FakeComputeTransport::new());
    let bus = NotificationBus::new();
    (ComputeRegistry::new(transport.clone(), bus), transport)
}

async fn noop_close(_id: ComputeId) {}

#[tokio::test]
async fn add_registers_a_new_compute() {
    let (registry, _transport) = registry();
    let compute = Compute::new(ComputeId::new("remote-1"), "remote", "10.0.0.1", 3080);
    let added = registry.add(compute, AddOptions { force: false, connect: false }).await.unwrap();
    assert_eq!(added.compute_id, ComputeId::new("remote-1"));
    assert!(registry.has(&ComputeId::new("remote-1")));
}

#[tokio::test]
async fn add_rejects_reserved_id_without_force() {
    let (registry, _transport) = registry();
    let compute = Compute::new(ComputeId::new("local"), "local", "127.0.0.1", 3080);
    let result = registry.add(compute, AddOptions::default()).await;
    assert!(matches!(result, Err(EngineError::Conflict(_))));
}

#[tokio::test]
async fn add_allows_reserved_id_with_force() {
    let (registry, _transport) = registry();
    let compute = Compute::new(ComputeId::new("local"), "Main server", "127.0.0.1", 3080);
    let result = registry.add(compute, AddOptions { force: true, connect: false }).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn add_rejects_duplicate_name_unless_forced() {
    let (registry, _transport) = registry();
    registry
        .add(
            Compute::new(ComputeId::new("r1"), "shared-name", "10.0.0.1", 3080),
            AddOptions::default(),
        )
        .await
        .unwrap();

    let result = registry
        .add(
            Compute::new(ComputeId::new("r2"), "shared-name", "10.0.0.2", 3080),
            AddOptions::default(),
        )
        .await;
    assert!(matches!(result, Err(EngineError::Conflict(_))));

    let result = registry
        .add(
            Compute::new(ComputeId::new("r2"), "shared-name", "10.0.0.2", 3080),
            AddOptions { force: true, connect: false },
        )
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn add_rejects_reserved_vm_name_even_with_force() {
    let (registry, _transport) = registry();
    let compute = Compute::new(ComputeId::new("r1"), RESERVED_VM_NAME, "10.0.0.1", 3080);
    let result = registry.add(compute, AddOptions { force: true, connect: false }).await;
    assert!(matches!(result, Err(EngineError::Conflict(_))));
}

#[tokio::test]
async fn add_with_existing_id_reconnects_and_updates() {
    let (registry, _transport) = registry();
    registry
        .add(Compute::new(ComputeId::new("r1"), "r1", "10.0.0.1", 3080), AddOptions::default())
        .await
        .unwrap();

    let updated = registry
        .add(Compute::new(ComputeId::new("r1"), "r1-renamed", "10.0.0.9", 4000), AddOptions::default())
        .await
        .unwrap();
    assert_eq!(updated.host, "10.0.0.9");

    let stored = registry.get(&ComputeId::new("r1")).unwrap();
    assert_eq!(stored.name, "r1-renamed");
    assert_eq!(stored.port, 4000);
}

#[tokio::test]
async fn add_survives_a_connect_failure_and_records_the_error() {
    let (registry, transport) = registry();
    transport.fail_connect("connection refused");

    let added = registry
        .add(
            Compute::new(ComputeId::new("r1"), "r1", "10.0.0.1", 3080),
            AddOptions { force: false, connect: true },
        )
        .await
        .unwrap();

    assert!(matches!(added.connection_state, ConnectionState::Errored { .. }));
    assert_eq!(added.last_error.as_deref(), Some("compute is unreachable: connection refused"));
    assert!(registry.has(&ComputeId::new("r1")));
}

#[tokio::test]
async fn get_missing_vm_returns_vm_not_configured() {
    let (registry, _transport) = registry();
    let result = registry.get(&ComputeId::new("vm"));
    assert!(matches!(result, Err(EngineError::VmNotConfigured)));
}

#[tokio::test]
async fn get_missing_other_returns_not_found() {
    let (registry, _transport) = registry();
    let result = registry.get(&ComputeId::new("unknown"));
    assert!(matches!(result, Err(EngineError::NotFound(_))));
}

#[tokio::test]
async fn delete_unknown_id_is_a_noop() {
    let (registry, _transport) = registry();
    registry.delete(&ComputeId::new("ghost"), noop_close).await.unwrap();
}

#[tokio::test]
async fn delete_closes_dependent_projects_before_removing() {
    let (registry, transport) = registry();
    registry
        .add(Compute::new(ComputeId::new("r1"), "r1", "10.0.0.1", 3080), AddOptions::default())
        .await
        .unwrap();

    let closed = std::sync::Arc::new(parking_lot::Mutex::new(false));
    let closed_clone = closed.clone();
    registry
        .delete(&ComputeId::new("r1"), |_id| async move {
            *closed_clone.lock() = true;
        })
        .await
        .unwrap();

    assert!(*closed.lock());
    assert!(!registry.has(&ComputeId::new("r1")));
    let _ = transport;
}
