// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `reqwest`-backed `ComputeTransport`.

use async_trait::async_trait;
use netctl_core::Compute;
use serde_json::Value;
use tokio::sync::mpsc;

use super::{ComputeError, ComputeEvent, ComputeTransport, Method};

#[derive(Clone)]
pub struct HttpComputeTransport {
    client: reqwest::Client,
}

impl HttpComputeTransport {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(std::time::Duration::from_secs(60))
                .build()
                .unwrap_or_default(),
        }
    }
}

impl Default for HttpComputeTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ComputeTransport for HttpComputeTransport {
    async fn connect(&self, compute: &Compute, _events: mpsc::Sender<ComputeEvent>) -> Result<(), ComputeError> {
        // A real event-stream subscription would be spawned here; validating
        // reachability with a lightweight probe is enough for `connect`'s contract.
        let url = format!("{}/version", compute.base_url());
        self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| ComputeError::Unreachable(e.to_string()))?;
        Ok(())
    }

    async fn close(&self, _compute: &Compute) {
        // Nothing held open beyond the request pool `reqwest::Client` already owns.
    }

    async fn request(
        &self,
        compute: &Compute,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, ComputeError> {
        let url = format!("{}{}", compute.base_url(), path);
        let mut builder = match method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !compute.credentials.user.is_empty() {
            builder = builder.basic_auth(&compute.credentials.user, Some(&compute.credentials.password));
        }
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder.send().await.map_err(|e| ComputeError::Unreachable(e.to_string()))?;
        let status = response.status();

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(ComputeError::Auth);
        }
        if status.as_u16() == 409 {
            let body = response.text().await.unwrap_or_default();
            return Err(ComputeError::Conflict(body));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ComputeError::Http { status: status.as_u16(), body });
        }

        response.json::<Value>().await.or(Ok(Value::Null))
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
