// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Config store: typed access to layered static configuration with
//! environment-variable overrides and change-notify callbacks.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub projects_path: Option<PathBuf>,
    pub images_path: Option<PathBuf>,
    pub configs_path: Option<PathBuf>,
    pub appliances_path: Option<PathBuf>,
    pub user: String,
    pub password: String,
    pub protocol: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3080,
            projects_path: None,
            images_path: None,
            configs_path: None,
            appliances_path: None,
            user: String::new(),
            password: String::new(),
            protocol: "http".to_string(),
        }
    }
}

impl ServerConfig {
    /// Reads overrides from `NETCTL_SERVER_*` environment variables, falling
    /// back to the hardcoded defaults for anything unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(host) = std::env::var("NETCTL_SERVER_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("NETCTL_SERVER_PORT") {
            if let Ok(port) = port.parse() {
                config.port = port;
            }
        }
        if let Ok(path) = std::env::var("NETCTL_SERVER_PROJECTS_PATH") {
            config.projects_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("NETCTL_SERVER_IMAGES_PATH") {
            config.images_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("NETCTL_SERVER_CONFIGS_PATH") {
            config.configs_path = Some(PathBuf::from(path));
        }
        if let Ok(path) = std::env::var("NETCTL_SERVER_APPLIANCES_PATH") {
            config.appliances_path = Some(PathBuf::from(path));
        }
        if let Ok(user) = std::env::var("NETCTL_SERVER_USER") {
            config.user = user;
        }
        if let Ok(password) = std::env::var("NETCTL_SERVER_PASSWORD") {
            config.password = password;
        }
        if let Ok(protocol) = std::env::var("NETCTL_SERVER_PROTOCOL") {
            config.protocol = protocol;
        }
        config
    }
}

type ChangeCallback = Box<dyn Fn(&ServerConfig) + Send + Sync>;

/// Holds the current config plus a registry of change-notify callbacks,
/// invoked synchronously whenever `reload` runs.
pub struct ConfigStore {
    current: RwLock<ServerConfig>,
    callbacks: RwLock<Vec<ChangeCallback>>,
}

impl ConfigStore {
    pub fn new(initial: ServerConfig) -> Arc<Self> {
        Arc::new(Self {
            current: RwLock::new(initial),
            callbacks: RwLock::new(Vec::new()),
        })
    }

    pub fn current(&self) -> ServerConfig {
        self.current.read().clone()
    }

    pub fn on_change(&self, callback: impl Fn(&ServerConfig) + Send + Sync + 'static) {
        self.callbacks.write().push(Box::new(callback));
    }

    /// Replaces the current config and synchronously runs every registered callback.
    pub fn reload(&self, new_config: ServerConfig) {
        *self.current.write() = new_config;
        let snapshot = self.current();
        for callback in self.callbacks.read().iter() {
            callback(&snapshot);
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
