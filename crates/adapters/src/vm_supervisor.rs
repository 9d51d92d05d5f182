// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Embedded-VM supervisor adapter: brings up (or tears down) a compute hosted
//! in a local hypervisor. Failures here are always demoted to warnings; they
//! must never abort controller startup.

use async_trait::async_trait;
use netctl_storage::{GnsVmSettings, VmEngine, VmWhenExit};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum VmSupervisorError {
    #[error("no hypervisor engine configured")]
    NoEngine,
    #[error("failed to start the embedded VM: {0}")]
    StartFailed(String),
    #[error("failed to stop the embedded VM: {0}")]
    StopFailed(String),
}

/// Address the embedded VM can be reached at once running.
#[derive(Debug, Clone)]
pub struct VmEndpoint {
    pub host: String,
    pub port: u16,
}

#[async_trait]
pub trait VmSupervisor: Send + Sync {
    async fn start(&self, settings: &GnsVmSettings) -> Result<VmEndpoint, VmSupervisorError>;
    async fn stop(&self, settings: &GnsVmSettings) -> Result<(), VmSupervisorError>;
}

/// No-op supervisor used when `gns3vm.engine` is `none` or unset, and as the
/// safe default for platforms without a local hypervisor integration.
#[derive(Default)]
pub struct NullVmSupervisor;

#[async_trait]
impl VmSupervisor for NullVmSupervisor {
    async fn start(&self, _settings: &GnsVmSettings) -> Result<VmEndpoint, VmSupervisorError> {
        Err(VmSupervisorError::NoEngine)
    }

    async fn stop(&self, _settings: &GnsVmSettings) -> Result<(), VmSupervisorError> {
        Ok(())
    }
}

/// Starts the embedded VM if enabled, logging and swallowing any failure so
/// the caller's startup sequence continues regardless.
pub async fn ensure_running(supervisor: &dyn VmSupervisor, settings: &GnsVmSettings) -> Option<VmEndpoint> {
    if !settings.enable || matches!(settings.engine, VmEngine::None) {
        return None;
    }
    match supervisor.start(settings).await {
        Ok(endpoint) => Some(endpoint),
        Err(err) => {
            warn!(error = %err, "embedded VM failed to start; continuing without it");
            None
        }
    }
}

/// Honors `when_exit` on shutdown. Failures are logged, never propagated.
pub async fn shutdown(supervisor: &dyn VmSupervisor, settings: &GnsVmSettings) {
    if !settings.enable || matches!(settings.engine, VmEngine::None) {
        return;
    }
    match settings.when_exit {
        VmWhenExit::Stop => {
            if let Err(err) = supervisor.stop(settings).await {
                warn!(error = %err, "embedded VM failed to stop cleanly");
            }
        }
        VmWhenExit::Keep | VmWhenExit::Suspend => {}
    }
}

#[cfg(test)]
#[path = "vm_supervisor_tests.rs"]
mod tests;
