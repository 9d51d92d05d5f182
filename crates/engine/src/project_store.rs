// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Project store & loader: project CRUD, topology file parse, free-name
//! allocation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use netctl_adapters::NotificationBus;
use netctl_core::{Event, Project, ProjectId, ProjectStatus};
use parking_lot::RwLock;
use serde_json::{json, Value};
use tokio::time::timeout;
use tracing::{info, warn};

use crate::error::EngineError;

/// Fields stripped from a topology file's envelope before the remainder is
/// handed to project construction.
const ENVELOPE_FIELDS: &[&str] = &["topology", "version", "revision", "type"];

/// Arbitrary but inherited bound on how many suffixed names `free_name` will
/// try before giving up; not derived from any resource limit, just preserved
/// from the source this was ported from.
const FREE_NAME_SEARCH_LIMIT: u32 = 1_000_000;

pub struct ProjectStore {
    projects: RwLock<Vec<Project>>,
    bus: NotificationBus,
}

impl ProjectStore {
    pub fn new(bus: NotificationBus) -> Self {
        Self {
            projects: RwLock::new(Vec::new()),
            bus,
        }
    }

    pub fn list(&self) -> Vec<Project> {
        self.projects.read().clone()
    }

    pub fn get(&self, id: &ProjectId) -> Result<Project, EngineError> {
        self.projects
            .read()
            .iter()
            .find(|p| &p.project_id == id)
            .cloned()
            .ok_or_else(|| EngineError::NotFound(format!("project {id}")))
    }

    /// Waits for a project to finish opening, up to `timeout_dur`.
    pub async fn get_loaded(&self, id: &ProjectId, timeout_dur: Duration) -> Result<Project, EngineError> {
        let wait_for_open = async {
            loop {
                let project = self.get(id)?;
                if project.status != ProjectStatus::Opening {
                    return Ok(project);
                }
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        };
        match timeout(timeout_dur, wait_for_open).await {
            Ok(result) => result,
            Err(_) => Err(EngineError::NotFound(format!("project {id} never finished opening"))),
        }
    }

    /// Adds a project, enforcing name+path uniqueness. Returns the existing
    /// project unchanged if `project_id` already exists.
    pub fn add(&self, project: Project) -> Result<Project, EngineError> {
        if let Ok(existing) = self.get(&project.project_id) {
            return Ok(existing);
        }

        let location_conflict = self
            .projects
            .read()
            .iter()
            .any(|p| p.name == project.name && p.path == project.path);
        if location_conflict {
            return Err(EngineError::Conflict(format!(
                "a project named '{}' already exists at {}",
                project.name,
                project.path.display()
            )));
        }
        let name_conflict = self.projects.read().iter().any(|p| p.name == project.name);
        if name_conflict {
            return Err(EngineError::Conflict(format!("a project named '{}' already exists", project.name)));
        }

        self.projects.write().push(project.clone());
        self.bus
            .publish(Event::controller("project.created", json!({"project_id": project.project_id.as_str()})));
        Ok(project)
    }

    /// Marks a project `Closed` in place, leaving its directory untouched.
    /// Used for ordinary close/shutdown; `remove` is reserved for the
    /// explicit delete-project path.
    pub fn close(&self, id: &ProjectId) -> Result<(), EngineError> {
        let mut projects = self.projects.write();
        let Some(project) = projects.iter_mut().find(|p| &p.project_id == id) else {
            return Err(EngineError::NotFound(format!("project {id}")));
        };
        project.status = ProjectStatus::Closed;
        drop(projects);
        self.bus
            .publish(Event::controller("project.closed", json!({"project_id": id.as_str()})));
        Ok(())
    }

    pub fn remove(&self, id: &ProjectId) -> Result<(), EngineError> {
        let project = self.get(id)?;
        if project.path.is_dir() {
            if let Err(err) = std::fs::remove_dir_all(&project.path) {
                warn!(project_id = %id, error = %err, "failed to remove project directory from disk");
            }
        }
        self.projects.write().retain(|p| &p.project_id != id);
        self.bus
            .publish(Event::controller("project.deleted", json!({"project_id": id.as_str()})));
        Ok(())
    }

    /// Loads a project from its `.gns3` topology file, stripping the
    /// envelope. Opens it immediately if `load_topology` or the project's
    /// `auto_open` flag is set.
    pub fn load(&self, path: &Path, load_topology: bool) -> Result<Project, EngineError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| EngineError::BadRequest(format!("cannot read topology file: {e}")))?;
        let mut doc: Value =
            serde_json::from_str(&text).map_err(|e| EngineError::BadRequest(format!("invalid topology JSON: {e}")))?;

        let project_id = doc
            .get("project_id")
            .and_then(Value::as_str)
            .map(ProjectId::new)
            .ok_or_else(|| EngineError::BadRequest("topology file is missing project_id".to_string()))?;
        let name = doc
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or("unnamed")
            .to_string();

        if let Value::Object(map) = &mut doc {
            for field in ENVELOPE_FIELDS {
                map.remove(*field);
            }
        }

        let dir = path.parent().map(Path::to_path_buf).unwrap_or_else(|| PathBuf::from("."));

        if let Ok(existing) = self.get(&project_id) {
            return Ok(existing);
        }

        let mut project = Project::new(project_id, name, dir);
        project.auto_open = doc.get("auto_open").and_then(Value::as_bool).unwrap_or(false);
        let should_open = load_topology || project.auto_open;

        self.projects.write().push(project.clone());
        if should_open {
            project.status = ProjectStatus::Opened;
            if let Some(stored) = self.projects.write().iter_mut().find(|p| p.project_id == project.project_id) {
                stored.status = ProjectStatus::Opened;
            }
            info!(project_id = %project.project_id, "project opened");
        }
        Ok(project)
    }

    /// Returns the first of `base`, `base-1`, `base-2`, … not used in-memory
    /// and not present as a subdirectory under `projects_dir`.
    pub fn free_name(&self, base: &str, projects_dir: &Path) -> Result<String, EngineError> {
        if !self.name_in_use(base, projects_dir) {
            return Ok(base.to_string());
        }
        for n in 1..=FREE_NAME_SEARCH_LIMIT {
            let candidate = format!("{base}-{n}");
            if !self.name_in_use(&candidate, projects_dir) {
                return Ok(candidate);
            }
        }
        Err(EngineError::FreeNameExhausted)
    }

    fn name_in_use(&self, name: &str, projects_dir: &Path) -> bool {
        let in_memory = self.projects.read().iter().any(|p| p.name == name);
        in_memory || projects_dir.join(name).is_dir()
    }
}

#[cfg(test)]
#[path = "project_store_tests.rs"]
mod tests;
