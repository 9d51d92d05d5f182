// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolves the on-disk resource roots the controller reads and writes.
//!
//! Upstream, `images_path`, `configs_path`, and `appliances_path` are all read
//! from config keys that default to the *projects* path. That looks like a
//! copy-paste bug in the original, but nothing downstream distinguishes the
//! directories in practice, so it is preserved rather than "fixed" (see
//! DESIGN.md, Open Questions).

use std::io;
use std::path::{Path, PathBuf};

/// Where a fresh install keeps all controller-managed files, absent any
/// config override.
pub fn default_projects_path() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("GNS3")
        .join("projects")
}

#[derive(Debug, Clone)]
pub struct ResourcePaths {
    pub projects_path: PathBuf,
    pub images_path: PathBuf,
    pub configs_path: PathBuf,
    pub appliances_path: PathBuf,
}

impl ResourcePaths {
    /// Builds the resource paths from config overrides, defaulting every
    /// unset one to `projects_path` (the preserved upstream behavior).
    pub fn resolve(
        projects_path: Option<PathBuf>,
        images_path: Option<PathBuf>,
        configs_path: Option<PathBuf>,
        appliances_path: Option<PathBuf>,
    ) -> Self {
        let projects_path = projects_path.unwrap_or_else(default_projects_path);
        Self {
            images_path: images_path.unwrap_or_else(|| projects_path.clone()),
            configs_path: configs_path.unwrap_or_else(|| projects_path.clone()),
            appliances_path: appliances_path.unwrap_or_else(|| projects_path.clone()),
            projects_path,
        }
    }

    pub fn ensure_all_exist(&self) -> io::Result<()> {
        for p in [&self.projects_path, &self.images_path, &self.configs_path, &self.appliances_path] {
            std::fs::create_dir_all(p)?;
        }
        Ok(())
    }

    /// Built-in appliance template assets shipped alongside the binary, vs.
    /// `appliances_path` which holds user-downloaded/user-provided ones.
    pub fn builtin_appliances_dir(&self) -> PathBuf {
        builtin_assets_dir().join("appliances")
    }

    /// Built-in default config files shipped alongside the binary, copied
    /// into `configs_path` on first run by `copy_default_configs`.
    pub fn builtin_configs_dir(&self) -> PathBuf {
        builtin_assets_dir().join("configs")
    }
}

fn builtin_assets_dir() -> PathBuf {
    std::env::var_os("NETCTL_ASSETS_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("assets"))
}

/// Copies every file from `built_in_dir` into `dest` that isn't already
/// present there. Missing `built_in_dir` is not an error: a fresh install has
/// nothing to seed from. Per-file copy failures are logged and skipped.
pub fn copy_default_configs(built_in_dir: &Path, dest: &Path) {
    let Ok(entries) = std::fs::read_dir(built_in_dir) else { return };
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(file_name) = path.file_name() else { continue };
        let dest_path = dest.join(file_name);
        if dest_path.exists() {
            continue;
        }
        if let Err(err) = std::fs::copy(&path, &dest_path) {
            tracing::warn!(path = %path.display(), error = %err, "failed to copy default config file");
        }
    }
}

#[cfg(test)]
#[path = "paths_tests.rs"]
mod tests;
