// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! netctl-core: domain types for the network-emulation controller.

pub mod appliance;
pub mod appliance_template;
pub mod compute;
pub mod dynamips;
pub mod event;
pub mod id;
pub mod iou_license;
pub mod project;

#[cfg(feature = "test-support")]
pub mod test_support;

pub use appliance::{builtin_appliances, Appliance, ApplianceType};
pub use appliance_template::{ApplianceTemplate, TemplateStatus};
pub use compute::{Compute, ComputeCredentials, ComputeProtocol, ConnectionState};
pub use event::{Event, Scope};
pub use id::{ApplianceId, ApplianceTemplateId, ComputeId, ProjectId};
pub use iou_license::IouLicense;
pub use project::{Project, ProjectStatus, AUTO_IDLEPC_PROJECT_NAME};
