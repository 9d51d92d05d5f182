// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller facade: explicit startup/shutdown sequencing.
//!
//! Replaces the module-level singleton this was ported from with an explicit
//! `Arc<Controller>` handle threaded through call sites (see DESIGN.md).

use std::path::{Path, PathBuf};
use std::sync::Arc;

use netctl_adapters::{vm_supervisor, ComputeTransport, NotificationBus, VmSupervisor};
use netctl_core::{Appliance, ApplianceId, Compute, ComputeId};
use netctl_engine::{AddOptions, ApplianceStore, ComputeRegistry, EngineError, ProjectStore};
use netctl_storage::{legacy_import, paths::copy_default_configs, settings, GnsVmSettings, ResourcePaths, Settings};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{ConfigStore, ServerConfig};

/// The only fatal startup error: if the local compute's port is already
/// bound, nothing about this controller instance can proceed.
#[derive(Debug, Error)]
pub enum LifecycleError {
    #[error("port {port} is already in use")]
    PortInUse { port: u16 },
    #[error("failed to load controller settings: {0}")]
    ConfigLoadError(#[from] netctl_storage::StorageError),
    #[error("failed to register the local compute: {0}")]
    LocalComputeRejected(#[from] EngineError),
}

/// Where the controller persists its settings document.
fn settings_path(config_dir: &Path) -> PathBuf {
    config_dir.join("netctl_controller.conf")
}

fn legacy_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join("netctl_gui.conf")
}

/// `computes`/`appliances`/`projects` are `pub` for reads (listing, lookups).
/// Mutations should go through `add_compute`/`delete_compute`/
/// `add_appliance`/`delete_appliance` below, which persist the change;
/// writing to the registries directly bypasses that.
pub struct Controller {
    pub config: Arc<ConfigStore>,
    pub paths: ResourcePaths,
    pub bus: NotificationBus,
    pub computes: ComputeRegistry,
    pub appliances: ApplianceStore,
    pub projects: ProjectStore,
    vm_supervisor: Arc<dyn VmSupervisor>,
    vm_settings: GnsVmSettings,
    config_dir: PathBuf,
}

impl Controller {
    /// Runs the full startup sequence and returns a ready-to-use controller
    /// handle, or the one fatal error (`PortInUse`) that aborts startup.
    pub async fn start(
        config_dir: PathBuf,
        transport: Arc<dyn ComputeTransport>,
        vm: Arc<dyn VmSupervisor>,
    ) -> Result<Arc<Controller>, LifecycleError> {
        // Ensure the config directory exists before anything reads or writes
        // under it.
        ensure_config_dir(&config_dir);

        // Step 2: read server config, prepare for change notification.
        let config = ConfigStore::new(ServerConfig::from_env());

        // Step 3/4 are folded into `local_compute` below (host/port mapping,
        // hostname-derived display name).
        let bus = NotificationBus::new();
        let paths = ResourcePaths::resolve(
            config.current().projects_path,
            config.current().images_path,
            config.current().configs_path,
            config.current().appliances_path,
        );
        if let Err(err) = paths.ensure_all_exist() {
            warn!(error = %err, "failed to create one or more resource directories");
        }

        // Step 1: seed the user configs dir with any built-in default config
        // file not already present there.
        copy_default_configs(&paths.builtin_configs_dir(), &paths.configs_path);

        let computes = ComputeRegistry::new(transport, bus.clone());
        let appliances = ApplianceStore::new(bus.clone());
        let projects = ProjectStore::new(bus.clone());

        // Step 5: load settings, importing legacy config on first run.
        let path = settings_path(&config_dir);
        let settings_doc = load_or_import_settings(&path, &config_dir)?;

        appliances.load_builtins();
        for appliance in settings_doc.appliances {
            let id = appliance.appliance_id.clone();
            if appliances.add(appliance).is_err() {
                warn!(appliance_id = %id, "skipping appliance with a conflicting id from settings");
            }
        }
        appliances.load_templates(&paths.builtin_appliances_dir(), &paths.appliances_path);

        // Step 6: register "local". A port conflict here is the only fatal
        // startup error.
        let server_config = config.current();
        let local = build_local_compute(&server_config);
        if port_in_use(local.port) {
            return Err(LifecycleError::PortInUse { port: local.port });
        }
        computes.add(local, AddOptions { force: true, connect: false }).await?;

        // Step 7: reconnect persisted remote computes, skipping failures.
        for compute in settings_doc.computes {
            let id = compute.compute_id.clone();
            if let Err(err) = computes.add(compute, AddOptions { force: false, connect: true }).await {
                warn!(compute_id = %id, error = %err, "failed to reconnect persisted compute; skipping");
            }
        }

        // Step 8: preload projects without opening them.
        preload_projects(&projects, &paths.projects_path);

        // Step 9: bring up the embedded VM.
        let vm_settings = settings_doc.gns3vm.clone();
        let vm_endpoint = vm_supervisor::ensure_running(vm.as_ref(), &vm_settings).await;
        if let Some(endpoint) = vm_endpoint {
            let vm_compute = Compute::new(ComputeId::new(ComputeId::VM), "GNS3 VM", endpoint.host, endpoint.port);
            if let Err(err) = computes.add(vm_compute, AddOptions { force: true, connect: true }).await {
                warn!(error = %err, "failed to register the embedded VM as a compute");
            }
        }

        // Step 10: confirm auto-open projects came up. `load` during
        // preloading already opened any project with `auto_open` set.
        for project in projects.list().iter().filter(|p| p.auto_open) {
            info!(project_id = %project.project_id, status = ?project.status, "auto-open project ready");
        }

        info!("controller startup complete");

        let controller = Arc::new(Controller {
            config,
            paths,
            bus,
            computes,
            appliances,
            projects,
            vm_supervisor: vm,
            vm_settings,
            config_dir,
        });

        // Register the change-notify callback now that the controller has a
        // stable `Arc` handle: future Server.user/password changes are
        // propagated onto the "local" compute. `Weak` avoids a reference
        // cycle through `config`.
        let weak = Arc::downgrade(&controller);
        controller.config.on_change(move |new_config| {
            let Some(controller) = weak.upgrade() else { return };
            let user = new_config.user.clone();
            let password = new_config.password.clone();
            tokio::spawn(async move {
                controller.apply_local_credentials(user, password).await;
            });
        });

        Ok(controller)
    }

    /// Saves the current in-memory state back to `netctl_controller.conf`,
    /// atomically.
    pub fn save(&self) -> Result<(), netctl_storage::StorageError> {
        let mut doc = Settings::default();
        doc.computes = self
            .computes
            .list()
            .into_iter()
            .filter(|c| !c.is_local() && !c.is_vm())
            .collect();
        doc.appliances = self.appliances.list().into_iter().filter(|a| !a.builtin).collect();
        settings::save(&settings_path(&self.config_dir), &doc)
    }

    /// Closes every project, then every compute (swallowing per-compute
    /// errors), then stops the embedded VM. Projects are closed, not
    /// deleted — their directories survive an ordinary shutdown. Does not
    /// persist; callers that want the pre-shutdown state saved call `save`
    /// themselves first (see `netctld`'s main loop).
    pub async fn shutdown(&self) {
        for project in self.projects.list() {
            if let Err(err) = self.projects.close(&project.project_id) {
                warn!(project_id = %project.project_id, error = %err, "failed to close project during shutdown");
            }
        }
        for compute in self.computes.list() {
            let id = compute.compute_id.clone();
            if self
                .computes
                .delete(&id, |compute_id| async move { self.close_dependent_projects(&compute_id).await })
                .await
                .is_err()
            {
                warn!(compute_id = %id, "failed to close compute cleanly during shutdown");
            }
        }
        vm_supervisor::shutdown(self.vm_supervisor.as_ref(), &self.vm_settings).await;
        info!("controller shutdown complete");
    }

    /// Registers a compute and persists the updated settings.
    pub async fn add_compute(&self, compute: Compute, options: AddOptions) -> Result<Compute, EngineError> {
        let added = self.computes.add(compute, options).await?;
        if let Err(err) = self.save() {
            warn!(error = %err, "failed to persist settings after adding a compute");
        }
        Ok(added)
    }

    /// Closes every project referencing the compute, deletes it, and
    /// persists the updated settings.
    pub async fn delete_compute(&self, id: &ComputeId) -> Result<(), EngineError> {
        self.computes
            .delete(id, |compute_id| async move { self.close_dependent_projects(&compute_id).await })
            .await?;
        if let Err(err) = self.save() {
            warn!(error = %err, "failed to persist settings after deleting a compute");
        }
        Ok(())
    }

    /// Registers a user appliance and persists the updated settings.
    pub fn add_appliance(&self, appliance: Appliance) -> Result<Appliance, EngineError> {
        let added = self.appliances.add(appliance)?;
        if let Err(err) = self.save() {
            warn!(error = %err, "failed to persist settings after adding an appliance");
        }
        Ok(added)
    }

    /// Deletes a user appliance and persists the updated settings.
    pub fn delete_appliance(&self, id: &ApplianceId) -> Result<(), EngineError> {
        self.appliances.delete(id)?;
        if let Err(err) = self.save() {
            warn!(error = %err, "failed to persist settings after deleting an appliance");
        }
        Ok(())
    }

    /// Closes every project referencing `compute_id`. Shared by `shutdown`
    /// and `delete_compute` as the compute-delete cascade.
    async fn close_dependent_projects(&self, compute_id: &ComputeId) {
        for project in self.projects.list() {
            if project.uses_compute(compute_id) {
                if let Err(err) = self.projects.close(&project.project_id) {
                    warn!(project_id = %project.project_id, error = %err, "failed to close project referencing a deleted compute");
                }
            }
        }
    }

    /// Applies a `Server.user`/`Server.password` config change to the
    /// `"local"` compute, reconnecting it if it was already connected.
    async fn apply_local_credentials(&self, user: String, password: String) {
        let Ok(mut local) = self.computes.get(&ComputeId::new(ComputeId::LOCAL)) else {
            return;
        };
        let was_connected = local.connection_state.is_connected();
        local.credentials.user = user;
        local.credentials.password = password;
        if let Err(err) = self.computes.add(local, AddOptions { force: true, connect: was_connected }).await {
            warn!(error = %err, "failed to propagate server credential change to the local compute");
        }
    }
}

fn build_local_compute(config: &ServerConfig) -> Compute {
    // If the server binds all interfaces, the client-visible host becomes
    // loopback while the console-advertised host keeps the bind address.
    let client_visible_host = if config.host == "0.0.0.0" { "127.0.0.1" } else { &config.host };
    let display_name = hostname_display_name();

    let mut local = Compute::new(ComputeId::new(ComputeId::LOCAL), display_name, client_visible_host, config.port);
    local.console_host = config.host.clone();
    local.credentials.user = config.user.clone();
    local.credentials.password = config.password.clone();
    local
}

fn hostname_display_name() -> String {
    let hostname = std::env::var("HOSTNAME").unwrap_or_else(|_| "localhost".to_string());
    if hostname == "gns3vm" {
        "Main server".to_string()
    } else {
        hostname
    }
}

fn port_in_use(port: u16) -> bool {
    std::net::TcpListener::bind(("127.0.0.1", port)).is_err()
}

fn load_or_import_settings(path: &Path, config_dir: &Path) -> Result<Settings, LifecycleError> {
    if let Some(existing) = settings::load(path)? {
        return Ok(existing);
    }

    let mut doc = Settings::default();
    match legacy_import::import(&legacy_config_path(config_dir)) {
        Ok(Some(imported)) => {
            info!(
                computes = imported.computes.len(),
                appliances = imported.appliances.len(),
                "imported legacy configuration"
            );
            doc.computes = imported.computes;
            doc.appliances = imported.appliances;
        }
        Ok(None) => {}
        Err(err) => warn!(error = %err, "legacy config import failed; continuing with an empty configuration"),
    }
    settings::save(path, &doc)?;
    Ok(doc)
}

fn ensure_config_dir(config_dir: &Path) {
    if let Err(err) = std::fs::create_dir_all(config_dir) {
        warn!(error = %err, "failed to create the controller config directory");
    }
}

fn preload_projects(projects: &ProjectStore, projects_dir: &Path) {
    let Ok(entries) = std::fs::read_dir(projects_dir) else { return };
    for entry in entries.flatten() {
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }
        let Ok(files) = std::fs::read_dir(&dir) else { continue };
        for file in files.flatten() {
            let file_path = file.path();
            if file_path.extension().and_then(|e| e.to_str()) == Some("gns3") {
                if let Err(err) = projects.load(&file_path, false) {
                    warn!(path = %file_path.display(), error = %err, "skipping incompatible project");
                }
                break;
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
