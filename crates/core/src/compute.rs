// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The `Compute` domain type: a remote host that actually runs emulated nodes.

use serde::{Deserialize, Serialize};

use crate::id::ComputeId;

/// Transport used to reach a compute's REST surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComputeProtocol {
    Http,
    Https,
}

impl Default for ComputeProtocol {
    fn default() -> Self {
        Self::Http
    }
}

/// Current connection state of a compute client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Errored { message: String },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected)
    }
}

/// Credentials used to authenticate against a compute's REST surface.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeCredentials {
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
}

/// A remote compute node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Compute {
    pub compute_id: ComputeId,
    pub protocol: ComputeProtocol,
    pub host: String,
    pub port: u16,
    /// Host clients should use when connecting to console sessions hosted here.
    pub console_host: String,
    pub credentials: ComputeCredentials,
    pub name: String,
    #[serde(skip)]
    pub connection_state: ConnectionState,
    #[serde(skip)]
    pub last_error: Option<String>,
}

impl Compute {
    pub fn new(compute_id: ComputeId, name: impl Into<String>, host: impl Into<String>, port: u16) -> Self {
        let host = host.into();
        Self {
            compute_id,
            protocol: ComputeProtocol::Http,
            console_host: host.clone(),
            host,
            port,
            credentials: ComputeCredentials::default(),
            name: name.into(),
            connection_state: ConnectionState::Disconnected,
            last_error: None,
        }
    }

    pub fn is_local(&self) -> bool {
        self.compute_id.as_str() == ComputeId::LOCAL
    }

    pub fn is_vm(&self) -> bool {
        self.compute_id.as_str() == ComputeId::VM
    }

    pub fn base_url(&self) -> String {
        let scheme = match self.protocol {
            ComputeProtocol::Http => "http",
            ComputeProtocol::Https => "https",
        };
        format!("{scheme}://{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
#[path = "compute_tests.rs"]
mod tests;
