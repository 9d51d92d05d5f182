// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Compute client: one long-lived handle per remote compute node.

#[cfg(any(test, feature = "test-support"))]
pub mod fake;
pub mod http;

use async_trait::async_trait;
use netctl_core::Compute;
use serde_json::Value;
use thiserror::Error;
use tokio::sync::mpsc;

/// An event a compute forwarded to the controller (e.g. a node log line, a
/// console-ready notification). Re-emitted on the notification bus by the
/// caller once received.
#[derive(Debug, Clone)]
pub struct ComputeEvent {
    pub action: String,
    pub payload: Value,
}

#[derive(Debug, Error)]
pub enum ComputeError {
    #[error("compute is unreachable: {0}")]
    Unreachable(String),
    #[error("compute returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
    #[error("compute rejected credentials")]
    Auth,
    #[error("compute reported a conflict: {0}")]
    Conflict(String),
}

/// HTTP method used for a `request` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Transport abstraction so the connect/reconnect/backoff state machine can
/// be tested against a fake instead of a real socket.
#[async_trait]
pub trait ComputeTransport: Send + Sync {
    /// Authenticates against the compute and starts forwarding its events
    /// into `events`. Idempotent: calling `connect` on an already-connected
    /// client is a no-op success.
    async fn connect(&self, compute: &Compute, events: mpsc::Sender<ComputeEvent>) -> Result<(), ComputeError>;

    /// Cancels the event stream and releases any held resources. Idempotent.
    async fn close(&self, compute: &Compute);

    /// Issues one typed REST call against the compute's API.
    async fn request(
        &self,
        compute: &Compute,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ComputeError>;
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
