// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Appliance` domain type: a concrete, ready-to-use node template.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::id::{uuid_v3, ApplianceId, BUILTIN_NAMESPACE};

/// The emulator backend an appliance targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplianceType {
    Qemu,
    Iou,
    Docker,
    Dynamips,
    Vmware,
    Virtualbox,
    Vpcs,
    Cloud,
    Nat,
    EthernetSwitch,
    EthernetHub,
    FrameRelaySwitch,
    AtmSwitch,
    Traceng,
}

impl ApplianceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApplianceType::Qemu => "qemu",
            ApplianceType::Iou => "iou",
            ApplianceType::Docker => "docker",
            ApplianceType::Dynamips => "dynamips",
            ApplianceType::Vmware => "vmware",
            ApplianceType::Virtualbox => "virtualbox",
            ApplianceType::Vpcs => "vpcs",
            ApplianceType::Cloud => "cloud",
            ApplianceType::Nat => "nat",
            ApplianceType::EthernetSwitch => "ethernet_switch",
            ApplianceType::EthernetHub => "ethernet_hub",
            ApplianceType::FrameRelaySwitch => "frame_relay_switch",
            ApplianceType::AtmSwitch => "atm_switch",
            ApplianceType::Traceng => "traceng",
        }
    }
}

/// A node template. Beyond the common fields every appliance carries an open
/// `extras` map for backend-specific settings (§9: a full tagged-variant-per-type
/// design is deliberately not attempted here; see DESIGN.md).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appliance {
    pub appliance_id: ApplianceId,
    pub appliance_type: ApplianceType,
    pub name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub builtin: bool,
    #[serde(default)]
    pub compute_id: Option<crate::id::ComputeId>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl Appliance {
    pub fn new(appliance_id: ApplianceId, appliance_type: ApplianceType, name: impl Into<String>) -> Self {
        Self {
            appliance_id,
            appliance_type,
            name: name.into(),
            builtin: false,
            compute_id: None,
            extras: Map::new(),
        }
    }

    fn builtin_with_id(id: Uuid, appliance_type: ApplianceType, name: &str) -> Self {
        let mut a = Self::new(ApplianceId::new(id.to_string()), appliance_type, name);
        a.builtin = true;
        a
    }
}

use uuid::Uuid;

/// The fixed set of appliances the controller always makes available, recreated
/// on every load. Built-ins are never persisted.
pub fn builtin_appliances() -> Vec<Appliance> {
    let mk = |name: &str, ty: ApplianceType| {
        let id = uuid_v3(&BUILTIN_NAMESPACE, name);
        Appliance::builtin_with_id(id, ty, name)
    };
    vec![
        mk("Cloud", ApplianceType::Cloud),
        mk("NAT", ApplianceType::Nat),
        mk("VPCS", ApplianceType::Vpcs),
        mk("Ethernet switch", ApplianceType::EthernetSwitch),
        mk("Ethernet hub", ApplianceType::EthernetHub),
        mk("Frame Relay switch", ApplianceType::FrameRelaySwitch),
        mk("ATM switch", ApplianceType::AtmSwitch),
    ]
}

#[cfg(test)]
#[path = "appliance_tests.rs"]
mod tests;
