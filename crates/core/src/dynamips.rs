// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Validation of Dynamips VM request payloads.
//!
//! The upstream JSON Schema is carried forward as plain field checks rather
//! than wired through a generic schema-validation crate: the shape is small,
//! fixed, and known ahead of time.

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("field `{field}` has the wrong type, expected {expected}")]
    WrongType { field: &'static str, expected: &'static str },
    #[error("field `{field}` does not match the expected pattern: {value}")]
    PatternMismatch { field: &'static str, value: String },
    #[error("field `{field}` is out of range: {value}")]
    OutOfRange { field: &'static str, value: String },
}

const NPE_VALUES: &[&str] = &[
    "npe-100", "npe-150", "npe-175", "npe-200", "npe-225", "npe-300", "npe-400", "npe-g2",
];
const MIDPLANE_VALUES: &[&str] = &["std", "vxr"];

fn as_str<'a>(obj: &'a Value, field: &'static str) -> Result<Option<&'a str>, ValidationError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(Value::Null) => Ok(None),
        Some(_) => Err(ValidationError::WrongType { field, expected: "string" }),
    }
}

fn as_i64(obj: &Value, field: &'static str) -> Result<Option<i64>, ValidationError> {
    match obj.get(field) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(Some)
            .ok_or(ValidationError::WrongType { field, expected: "integer" }),
        Some(_) => Err(ValidationError::WrongType { field, expected: "integer" }),
    }
}

fn matches_pattern(s: &str, check: impl Fn(&str) -> bool) -> bool {
    check(s)
}

fn is_uuid_like(s: &str) -> bool {
    s.len() == 36 && s.chars().filter(|c| *c == '-').count() == 4
}

fn is_platform(s: &str) -> bool {
    s.len() == 5 && s.starts_with('c') && s[1..].chars().all(|c| c.is_ascii_digit())
}

fn is_chassis(s: &str) -> bool {
    let digits_len = s.chars().take_while(|c| c.is_ascii_digit()).count();
    digits_len == 4 && (s.len() == 4 || (s.len() == 6 && &s[4..] == "XM"))
}

fn is_mac_addr(s: &str) -> bool {
    let parts: Vec<&str> = s.split('.').collect();
    parts.len() == 3 && parts.iter().all(|p| p.len() == 4 && p.chars().all(|c| c.is_ascii_hexdigit()))
}

fn is_hex_with_prefix(s: &str, digits: usize) -> bool {
    s.len() == 2 + digits
        && s.starts_with("0x")
        && s[2..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Validates the subset of `VM_CREATE_SCHEMA` fields a controller-side caller
/// is expected to populate before forwarding a Dynamips create request.
pub fn validate_vm_create(value: &Value) -> Result<(), ValidationError> {
    let obj = value;

    if let Some(vm_id) = as_str(obj, "vm_id")? {
        if !is_uuid_like(vm_id) && vm_id.parse::<i64>().is_err() {
            return Err(ValidationError::PatternMismatch { field: "vm_id", value: vm_id.to_string() });
        }
    }

    match as_str(obj, "name")? {
        Some(name) if !name.is_empty() => {}
        Some(_) => return Err(ValidationError::PatternMismatch { field: "name", value: String::new() }),
        None => return Err(ValidationError::MissingField("name")),
    }

    if let Some(platform) = as_str(obj, "platform")? {
        if !matches_pattern(platform, is_platform) {
            return Err(ValidationError::PatternMismatch { field: "platform", value: platform.to_string() });
        }
    }

    if let Some(chassis) = as_str(obj, "chassis")? {
        if !matches_pattern(chassis, is_chassis) {
            return Err(ValidationError::PatternMismatch { field: "chassis", value: chassis.to_string() });
        }
    }

    if let Some(mac) = as_str(obj, "mac_addr")? {
        if !matches_pattern(mac, is_mac_addr) {
            return Err(ValidationError::PatternMismatch { field: "mac_addr", value: mac.to_string() });
        }
    }

    if let Some(confreg) = as_str(obj, "confreg")? {
        if !matches_pattern(confreg, |s| is_hex_with_prefix(s, 4)) {
            return Err(ValidationError::PatternMismatch { field: "confreg", value: confreg.to_string() });
        }
    }

    if let Some(idlepc) = as_str(obj, "idlepc")? {
        if !idlepc.is_empty() && !matches_pattern(idlepc, |s| s.starts_with("0x") && s[2..].chars().all(|c| c.is_ascii_hexdigit())) {
            return Err(ValidationError::PatternMismatch { field: "idlepc", value: idlepc.to_string() });
        }
    }

    if let Some(ram) = as_i64(obj, "ram")? {
        if ram < 1 {
            return Err(ValidationError::OutOfRange { field: "ram", value: ram.to_string() });
        }
    }

    if let Some(iomem) = as_i64(obj, "iomem")? {
        if !(0..=100).contains(&iomem) {
            return Err(ValidationError::OutOfRange { field: "iomem", value: iomem.to_string() });
        }
    }

    if let Some(npe) = as_str(obj, "npe")? {
        if !NPE_VALUES.contains(&npe) {
            return Err(ValidationError::PatternMismatch { field: "npe", value: npe.to_string() });
        }
    }

    if let Some(midplane) = as_str(obj, "midplane")? {
        if !MIDPLANE_VALUES.contains(&midplane) {
            return Err(ValidationError::PatternMismatch { field: "midplane", value: midplane.to_string() });
        }
    }

    for slot_key in ["slot0", "slot1", "slot2", "slot3", "slot4", "slot5", "slot6"] {
        if obj.get(slot_key).is_some_and(|v| !v.is_string() && !v.is_null()) {
            return Err(ValidationError::WrongType { field: "slotN", expected: "string" });
        }
    }
    for wic_key in ["wic0", "wic1", "wic2"] {
        if obj.get(wic_key).is_some_and(|v| !v.is_string() && !v.is_null()) {
            return Err(ValidationError::WrongType { field: "wicN", expected: "string" });
        }
    }

    Ok(())
}

/// Validates a TCP/UDP port value used anywhere in a Dynamips request (NIO
/// endpoints, console ports, etc).
pub fn validate_port(port: i64) -> Result<(), ValidationError> {
    if (1..=65535).contains(&port) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange { field: "port", value: port.to_string() })
    }
}

#[cfg(test)]
#[path = "dynamips_tests.rs"]
mod tests;
