// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The persisted controller settings document and its atomic-write path.
//!
//! Writes follow the same write-temp, fsync, rename, fsync-directory sequence
//! as the rest of this workspace's durable-write code, simplified for a
//! single small JSON document (no compression, no WAL).

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use netctl_core::{Appliance, Compute, IouLicense};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;

pub const CURRENT_VERSION: &str = "1.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmEngine {
    Vmware,
    Virtualbox,
    Remote,
    None,
}

impl Default for VmEngine {
    fn default() -> Self {
        VmEngine::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VmWhenExit {
    Stop,
    Keep,
    Suspend,
}

impl Default for VmWhenExit {
    fn default() -> Self {
        VmWhenExit::Stop
    }
}

/// Embedded-VM supervisor configuration. The `gns3vm` field name on the wire
/// is kept verbatim for compatibility with the format this was ported from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GnsVmSettings {
    #[serde(default)]
    pub engine: VmEngine,
    #[serde(default)]
    pub enable: bool,
    #[serde(default)]
    pub when_exit: VmWhenExit,
    #[serde(default)]
    pub headless: bool,
    #[serde(default)]
    pub vmname: String,
}

/// Top-level persisted settings document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub iou_license: IouLicense,
    #[serde(default)]
    pub gns3vm: GnsVmSettings,
    #[serde(default)]
    pub appliance_templates_etag: Option<String>,
    #[serde(default)]
    pub computes: Vec<Compute>,
    #[serde(default)]
    pub appliances: Vec<Appliance>,
}

fn default_version() -> String {
    CURRENT_VERSION.to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            iou_license: IouLicense::default(),
            gns3vm: GnsVmSettings::default(),
            appliance_templates_etag: None,
            computes: Vec::new(),
            appliances: Vec::new(),
        }
    }
}

/// Reads the settings document from `path`. Returns `Ok(None)` if it does not
/// exist yet (a fresh install, or one awaiting legacy import).
pub fn load(path: &Path) -> Result<Option<Settings>, StorageError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)?;
    let settings: Settings = serde_json::from_str(&text)?;
    Ok(Some(settings))
}

/// Writes the settings document atomically: serialize, write to a sibling
/// `.tmp` file, fsync it, rename over the destination, then best-effort fsync
/// the parent directory so the rename itself is durable.
pub fn save(path: &Path, settings: &Settings) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let tmp_path = tmp_path_for(path);
    let json = serde_json::to_vec_pretty(settings)?;

    {
        let mut file = File::create(&tmp_path)?;
        file.write_all(&json)?;
        file.sync_all()?;
    }
    std::fs::rename(&tmp_path, path)?;
    if let Some(parent) = path.parent() {
        if let Ok(dir) = File::open(parent) {
            let _ = dir.sync_all();
        }
    }
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    path.with_extension("tmp")
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
