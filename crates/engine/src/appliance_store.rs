// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Appliance store: user appliances, built-ins, and downloadable templates.

use std::path::{Path, PathBuf};

use netctl_adapters::{NotificationBus, RefreshOutcome, TemplateDownloadError, TemplateDownloader};
use netctl_core::{builtin_appliances, Appliance, ApplianceId, ApplianceTemplate, Event, TemplateStatus};
use parking_lot::RwLock;
use serde_json::json;
use tracing::warn;

use crate::error::EngineError;

pub struct ApplianceStore {
    user_appliances: RwLock<Vec<Appliance>>,
    builtins: RwLock<Vec<Appliance>>,
    templates: RwLock<Vec<ApplianceTemplate>>,
    downloader: TemplateDownloader,
    bus: NotificationBus,
}

impl ApplianceStore {
    pub fn new(bus: NotificationBus) -> Self {
        Self {
            user_appliances: RwLock::new(Vec::new()),
            builtins: RwLock::new(Vec::new()),
            templates: RwLock::new(Vec::new()),
            downloader: TemplateDownloader::new(),
            bus,
        }
    }

    /// Re-creates the fixed set of built-in appliances. Idempotent and leaves
    /// user appliances untouched no matter how many times it is called (see
    /// DESIGN.md, Open Questions).
    pub fn load_builtins(&self) {
        *self.builtins.write() = builtin_appliances();
    }

    pub fn list(&self) -> Vec<Appliance> {
        let mut all = self.builtins.read().clone();
        all.extend(self.user_appliances.read().iter().cloned());
        all
    }

    pub fn get(&self, id: &ApplianceId) -> Result<Appliance, EngineError> {
        self.list()
            .into_iter()
            .find(|a| &a.appliance_id == id)
            .ok_or_else(|| EngineError::NotFound(format!("appliance {id}")))
    }

    pub fn add(&self, appliance: Appliance) -> Result<Appliance, EngineError> {
        if self.list().iter().any(|a| a.appliance_id == appliance.appliance_id) {
            return Err(EngineError::Conflict(format!(
                "appliance id '{}' already exists",
                appliance.appliance_id
            )));
        }
        self.user_appliances.write().push(appliance.clone());
        self.bus.publish(Event::controller(
            "appliance.created",
            json!({"appliance_id": appliance.appliance_id.as_str()}),
        ));
        Ok(appliance)
    }

    /// Built-ins may never be deleted.
    pub fn delete(&self, id: &ApplianceId) -> Result<(), EngineError> {
        let appliance = self.get(id)?;
        if appliance.builtin {
            return Err(EngineError::Conflict("built-in appliances cannot be deleted".to_string()));
        }
        self.user_appliances.write().retain(|a| &a.appliance_id != id);
        self.bus
            .publish(Event::controller("appliance.deleted", json!({"appliance_id": id.as_str()})));
        Ok(())
    }

    /// Scans `built_in_dir` then `user_dir` for `.gns3a`/`.gns3appliance`
    /// files. Parse failures skip the offending file with a warning; broken
    /// templates are skipped from the resulting list.
    pub fn load_templates(&self, built_in_dir: &Path, user_dir: &Path) -> Vec<ApplianceTemplate> {
        let mut templates = Vec::new();
        for dir in [built_in_dir, user_dir] {
            if !dir.is_dir() {
                continue;
            }
            let Ok(entries) = std::fs::read_dir(dir) else { continue };
            for entry in entries.flatten() {
                let path = entry.path();
                let is_template = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|ext| ext == "gns3a" || ext == "gns3appliance");
                if !is_template {
                    continue;
                }
                match parse_template(&path) {
                    Ok(template) if !template.is_broken() => templates.push(template),
                    Ok(_) => {}
                    Err(err) => warn!(path = %path.display(), error = %err, "skipping unparsable appliance template"),
                }
            }
        }
        *self.templates.write() = templates.clone();
        templates
    }

    pub fn templates(&self) -> Vec<ApplianceTemplate> {
        self.templates.read().clone()
    }

    /// Refreshes templates from the public registry. Serialized against
    /// itself by the downloader's internal lock.
    pub async fn refresh_templates(
        &self,
        current_etag: Option<&str>,
        dest_dir: &Path,
    ) -> Result<RefreshOutcome, TemplateDownloadError> {
        self.downloader.refresh(current_etag, dest_dir).await
    }
}

fn parse_template(path: &PathBuf) -> Result<ApplianceTemplate, serde_json::Error> {
    let text = std::fs::read_to_string(path).unwrap_or_default();
    let mut body: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&text)?;
    let name = body
        .remove("name")
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default());
    let status = match body.remove("status").and_then(|v| v.as_str().map(str::to_string)) {
        Some(s) if s == "broken" => TemplateStatus::Broken,
        Some(s) if s == "experimental" => TemplateStatus::Experimental,
        _ => TemplateStatus::Stable,
    };
    Ok(ApplianceTemplate {
        template_id: ApplianceTemplate::id_for_path(path),
        name,
        status,
        body,
    })
}

#[cfg(test)]
#[path = "appliance_store_tests.rs"]
mod tests;
