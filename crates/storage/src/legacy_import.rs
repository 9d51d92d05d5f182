// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! One-time import of a legacy GUI configuration file into the controller
//! settings document. Only triggered when no controller settings file exists
//! yet; any failure here is swallowed by the caller (see `LegacyImportError`).

use std::path::Path;

use netctl_core::{Appliance, ApplianceId, Compute, ComputeCredentials, ComputeId, ComputeProtocol};
use serde_json::Value;

use crate::error::LegacyImportError;

/// Deprecated per-node keys the legacy format carried that no longer mean
/// anything to this controller; stripped on import rather than preserved.
const DEPRECATED_NODE_KEYS: &[&str] = &[
    "enable_remote_console",
    "use_ubridge",
    "acpi_shutdown",
    "default_symbol",
    "hover_symbol",
];

const DEFAULT_SYMBOL: &str = ":/symbols/computer.svg";

/// One legacy emulator section and the `appliance_type` tag its nodes should
/// be imported with.
const EMULATOR_SECTIONS: &[(&str, &str, &str)] = &[
    ("Qemu", "vms", "qemu"),
    ("IOU", "devices", "iou"),
    ("Docker", "containers", "docker"),
    ("Dynamips", "routers", "dynamips"),
    ("VMware", "vms", "vmware"),
    ("VirtualBox", "vms", "virtualbox"),
    ("VPCS", "nodes", "vpcs"),
    ("TraceNG", "nodes", "traceng"),
    ("Builtin", "cloud_nodes", "cloud"),
    ("Builtin", "ethernet_switches", "ethernet_switch"),
    ("Builtin", "ethernet_hubs", "ethernet_hub"),
];

#[derive(Debug, Default)]
pub struct LegacyImportResult {
    pub computes: Vec<Compute>,
    pub appliances: Vec<Appliance>,
}

/// Parses a legacy `gns3_gui.conf`-style file, if present, and converts its
/// remote-server and per-emulator-node sections into controller settings.
pub fn import(path: &Path) -> Result<Option<LegacyImportResult>, LegacyImportError> {
    if !path.exists() {
        return Ok(None);
    }
    let text = std::fs::read_to_string(path)?;
    let doc: Value = serde_json::from_str(&text)?;

    let mut result = LegacyImportResult::default();
    result.computes.extend(import_remote_servers(&doc));
    if let Some(vm_compute) = import_vm_server(&doc) {
        result.computes.push(vm_compute);
    }
    result.appliances.extend(import_emulator_nodes(&doc));
    Ok(Some(result))
}

fn import_remote_servers(doc: &Value) -> Vec<Compute> {
    let servers = doc.pointer("/Servers/remote_servers").and_then(Value::as_array);
    let Some(servers) = servers else { return Vec::new() };

    servers
        .iter()
        .enumerate()
        .filter_map(|(i, entry)| {
            let host = entry.get("host")?.as_str()?.to_string();
            let port = entry.get("port").and_then(Value::as_u64).unwrap_or(3080) as u16;
            let protocol = match entry.get("protocol").and_then(Value::as_str) {
                Some("https") => ComputeProtocol::Https,
                _ => ComputeProtocol::Http,
            };
            let mut compute = Compute::new(
                ComputeId::new(format!("imported-remote-{i}")),
                format!("{host}:{port}"),
                host,
                port,
            );
            compute.protocol = protocol;
            compute.credentials = ComputeCredentials {
                user: entry.get("user").and_then(Value::as_str).unwrap_or_default().to_string(),
                password: entry.get("password").and_then(Value::as_str).unwrap_or_default().to_string(),
            };
            Some(compute)
        })
        .collect()
}

fn import_vm_server(doc: &Value) -> Option<Compute> {
    let vm = doc.pointer("/Servers/vm")?;
    let host = vm.get("host")?.as_str()?.to_string();
    let port = vm.get("port").and_then(Value::as_u64).unwrap_or(3080) as u16;
    Some(Compute::new(ComputeId::new(ComputeId::VM), "GNS3 VM", host, port))
}

fn import_emulator_nodes(doc: &Value) -> Vec<Appliance> {
    let mut imported = Vec::new();
    for (section, list_key, appliance_type) in EMULATOR_SECTIONS {
        let Some(nodes) = doc.pointer(&format!("/{section}/{list_key}")).and_then(Value::as_array) else {
            continue;
        };
        for node in nodes {
            if let Some(appliance) = convert_node(node, appliance_type) {
                imported.push(appliance);
            }
        }
    }
    imported
}

fn convert_node(node: &Value, appliance_type: &str) -> Option<Appliance> {
    let name = node.get("name").and_then(Value::as_str)?.to_string();
    let appliance_id = node
        .get("appliance_id")
        .and_then(Value::as_str)
        .map(ApplianceId::new)
        .unwrap_or_else(|| ApplianceId::new(uuid::Uuid::new_v4().to_string()));

    let ty = parse_appliance_type(appliance_type)?;
    let mut appliance = Appliance::new(appliance_id, ty, name);

    if let Value::Object(map) = node {
        for (k, v) in map {
            if DEPRECATED_NODE_KEYS.contains(&k.as_str()) || k == "name" || k == "appliance_id" {
                continue;
            }
            appliance.extras.insert(k.clone(), v.clone());
        }
    }

    if !appliance.extras.contains_key("symbol") {
        appliance
            .extras
            .insert("symbol".to_string(), Value::String(DEFAULT_SYMBOL.to_string()));
    }

    Some(appliance)
}

fn parse_appliance_type(s: &str) -> Option<netctl_core::ApplianceType> {
    use netctl_core::ApplianceType::*;
    Some(match s {
        "qemu" => Qemu,
        "iou" => Iou,
        "docker" => Docker,
        "dynamips" => Dynamips,
        "vmware" => Vmware,
        "virtualbox" => Virtualbox,
        "vpcs" => Vpcs,
        "cloud" => Cloud,
        "ethernet_switch" => EthernetSwitch,
        "ethernet_hub" => EthernetHub,
        "traceng" => Traceng,
        _ => return None,
    })
}

#[cfg(test)]
#[path = "legacy_import_tests.rs"]
mod tests;
