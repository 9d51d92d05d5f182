// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! In-memory `ComputeTransport` for exercising the registry/registry-adjacent
//! logic without a network.

use std::collections::VecDeque;

use async_trait::async_trait;
use netctl_core::Compute;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{ComputeError, ComputeEvent, ComputeTransport, Method};

#[derive(Default)]
pub struct FakeComputeTransport {
    /// Queued responses returned in order for successive `request` calls.
    responses: Mutex<VecDeque<Result<Value, ComputeError>>>,
    /// If set, `connect` fails with this error instead of succeeding.
    connect_failure: Mutex<Option<String>>,
    connected: Mutex<Vec<String>>,
}

impl FakeComputeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, response: Result<Value, ComputeError>) {
        self.responses.lock().push_back(response);
    }

    pub fn fail_connect(&self, message: impl Into<String>) {
        *self.connect_failure.lock() = Some(message.into());
    }

    pub fn connected_ids(&self) -> Vec<String> {
        self.connected.lock().clone()
    }
}

#[async_trait]
impl ComputeTransport for FakeComputeTransport {
    async fn connect(&self, compute: &Compute, _events: mpsc::Sender<ComputeEvent>) -> Result<(), ComputeError> {
        if let Some(message) = self.connect_failure.lock().clone() {
            return Err(ComputeError::Unreachable(message));
        }
        self.connected.lock().push(compute.compute_id.to_string());
        Ok(())
    }

    async fn close(&self, compute: &Compute) {
        self.connected.lock().retain(|id| id != compute.compute_id.as_str());
    }

    async fn request(&self, _compute: &Compute, _method: Method, _path: &str, _body: Option<Value>) -> Result<Value, ComputeError> {
        self.responses.lock().pop_front().unwrap_or(Ok(Value::Null))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
