// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `ApplianceTemplate` domain type: a file-sourced recipe for an appliance.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::{uuid_v3, ApplianceTemplateId, TEMPLATE_NAMESPACE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateStatus {
    Stable,
    Experimental,
    Broken,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplianceTemplate {
    pub template_id: ApplianceTemplateId,
    pub name: String,
    pub status: TemplateStatus,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl ApplianceTemplate {
    /// Derive a template id deterministically from its absolute file path, so the
    /// id is stable across restarts even though the file itself carries none.
    pub fn id_for_path(path: &Path) -> ApplianceTemplateId {
        let id = uuid_v3(&TEMPLATE_NAMESPACE, &path.to_string_lossy());
        ApplianceTemplateId::new(id.to_string())
    }

    pub fn is_broken(&self) -> bool {
        matches!(self.status, TemplateStatus::Broken)
    }
}

#[cfg(test)]
#[path = "appliance_template_tests.rs"]
mod tests;
