// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Builders shared by other crates' tests. Only compiled with `test-support`.

use std::path::PathBuf;

use crate::compute::Compute;
use crate::id::{ComputeId, ProjectId};
use crate::project::Project;

pub fn sample_compute(id: &str) -> Compute {
    Compute::new(ComputeId::new(id), format!("compute-{id}"), "127.0.0.1", 3080)
}

pub fn sample_project(id: &str, name: &str) -> Project {
    Project::new(ProjectId::new(id), name, PathBuf::from(format!("/tmp/netctl-test/{name}")))
}
