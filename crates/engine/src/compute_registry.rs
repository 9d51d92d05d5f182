// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compute registry: add/remove/lookup computes, conflict checks.

use std::sync::Arc;

use netctl_adapters::{ComputeTransport, NotificationBus};
use netctl_core::{Compute, ComputeId, ConnectionState, Event};
use parking_lot::RwLock;
use serde_json::json;
use tokio::sync::mpsc;
use tracing::info;

use crate::error::EngineError;

/// Name reserved for the embedded-VM compute; user-supplied computes may not
/// claim it even with `force`.
const RESERVED_VM_NAME: &str = "gns3vm";

pub struct ComputeRegistry {
    computes: RwLock<Vec<Compute>>,
    transport: Arc<dyn ComputeTransport>,
    bus: NotificationBus,
}

/// Options controlling `add`'s conflict checks and side effects.
#[derive(Debug, Clone, Default)]
pub struct AddOptions {
    pub force: bool,
    pub connect: bool,
}

impl ComputeRegistry {
    pub fn new(transport: Arc<dyn ComputeTransport>, bus: NotificationBus) -> Self {
        Self {
            computes: RwLock::new(Vec::new()),
            transport,
            bus,
        }
    }

    pub fn list(&self) -> Vec<Compute> {
        self.computes.read().clone()
    }

    pub fn has(&self, id: &ComputeId) -> bool {
        self.computes.read().iter().any(|c| &c.compute_id == id)
    }

    pub fn get(&self, id: &ComputeId) -> Result<Compute, EngineError> {
        if id.as_str() == ComputeId::VM && !self.has(id) {
            return Err(EngineError::VmNotConfigured);
        }
        self.computes
            .read()
            .iter()
            .find(|c| &c.compute_id == id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("compute {id}")))
    }

    /// Adds a compute, or reconnects-and-updates one that already exists
    /// under `compute.compute_id`. A connect failure never aborts the add:
    /// it is reflected in the compute's state and a notification instead.
    pub async fn add(&self, mut compute: Compute, options: AddOptions) -> Result<Compute, EngineError> {
        if self.has(&compute.compute_id) {
            self.maybe_connect(&mut compute, options.connect).await;
            self.update_existing(&compute);
            self.bus.publish(Event::controller(
                "compute.updated",
                json!({"compute_id": compute.compute_id.as_str()}),
            ));
            return Ok(compute);
        }

        if compute.compute_id.is_reserved() && !options.force {
            return Err(EngineError::Conflict(format!(
                "compute id '{}' is reserved",
                compute.compute_id
            )));
        }
        if compute.name == RESERVED_VM_NAME {
            return Err(EngineError::Conflict(format!("compute name '{RESERVED_VM_NAME}' is reserved")));
        }
        if !options.force && self.computes.read().iter().any(|c| c.name == compute.name) {
            return Err(EngineError::Conflict(format!("a compute named '{}' already exists", compute.name)));
        }

        self.maybe_connect(&mut compute, options.connect).await;
        self.computes.write().push(compute.clone());
        info!(compute_id = %compute.compute_id, "compute registered");
        self.bus.publish(Event::controller(
            "compute.created",
            json!({"compute_id": compute.compute_id.as_str()}),
        ));
        Ok(compute)
    }

    fn update_existing(&self, incoming: &Compute) {
        let mut computes = self.computes.write();
        if let Some(existing) = computes.iter_mut().find(|c| c.compute_id == incoming.compute_id) {
            existing.host = incoming.host.clone();
            existing.port = incoming.port;
            existing.protocol = incoming.protocol;
            existing.credentials = incoming.credentials.clone();
            existing.name = incoming.name.clone();
            existing.connection_state = incoming.connection_state.clone();
            existing.last_error = incoming.last_error.clone();
        }
    }

    /// Attempts to connect if `connect` is set. Network failures are caught
    /// here: they set `ConnectionState::Errored` and publish a notification
    /// rather than propagating, per the connect contract.
    async fn maybe_connect(&self, compute: &mut Compute, connect: bool) {
        if !connect {
            return;
        }
        let (tx, _rx) = mpsc::channel(32);
        match self.transport.connect(compute, tx).await {
            Ok(()) => {
                compute.connection_state = ConnectionState::Connected;
                compute.last_error = None;
            }
            Err(err) => {
                let message = err.to_string();
                compute.connection_state = ConnectionState::Errored { message: message.clone() };
                compute.last_error = Some(message.clone());
                self.bus.publish(Event::controller(
                    "compute.connection_error",
                    json!({"compute_id": compute.compute_id.as_str(), "message": message}),
                ));
            }
        }
    }

    /// Deletes a compute, first closing every project that references it.
    /// Deleting an unknown id is a no-op, not an error.
    pub async fn delete<F, Fut>(&self, id: &ComputeId, close_dependent_projects: F) -> Result<(), EngineError>
    where
        F: FnOnce(ComputeId) -> Fut,
        Fut: std::future::Future<Output = ()>,
    {
        if !self.has(id) {
            return Ok(());
        }
        close_dependent_projects(id.clone()).await;

        let compute = self.get(id)?;
        self.transport.close(&compute).await;
        self.computes.write().retain(|c| &c.compute_id != id);
        self.bus
            .publish(Event::controller("compute.deleted", json!({"compute_id": id.as_str()})));
        Ok(())
    }
}

#[cfg(test)]
#[path = "compute_registry_tests.rs"]
mod tests;
