// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Project` domain type: a topology plus its runtime status.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::id::{ComputeId, ProjectId};

/// Name reserved for the throwaway project used to compute Dynamips IDLE-PC values.
pub const AUTO_IDLEPC_PROJECT_NAME: &str = "AUTOIDLEPC";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    Closed,
    Opening,
    Opened,
    Closing,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub project_id: ProjectId,
    pub name: String,
    pub path: PathBuf,
    pub filename: String,
    pub status: ProjectStatus,
    pub auto_open: bool,
    /// Computes this project's nodes are hosted on, derived as nodes are added.
    pub computes: BTreeSet<ComputeId>,
}

impl Project {
    pub fn new(project_id: ProjectId, name: impl Into<String>, path: PathBuf) -> Self {
        let name = name.into();
        let filename = format!("{name}.gns3");
        Self {
            project_id,
            name,
            path,
            filename,
            status: ProjectStatus::Closed,
            auto_open: false,
            computes: BTreeSet::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.status, ProjectStatus::Opened)
    }

    pub fn uses_compute(&self, compute_id: &ComputeId) -> bool {
        self.computes.contains(compute_id)
    }

    pub fn topology_file(&self) -> PathBuf {
        self.path.join(&self.filename)
    }
}

#[cfg(test)]
#[path = "project_tests.rs"]
mod tests;
