// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Downloads appliance template files from the public registry, using a
//! conditional GET against the directory listing so unchanged registries
//! cost a single round trip.

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::warn;

const REGISTRY_URL: &str = "https://api.github.com/repos/GNS3/gns3-registry/contents/appliances";

#[derive(Debug, Error)]
pub enum TemplateDownloadError {
    #[error("failed to reach the appliance registry: {0}")]
    Unreachable(String),
    #[error("registry returned HTTP {0}")]
    Http(u16),
}

#[derive(Debug, Deserialize)]
struct RegistryEntry {
    #[serde(rename = "type")]
    entry_type: String,
    name: String,
    download_url: Option<String>,
}

/// Outcome of a single refresh attempt.
#[derive(Debug)]
pub enum RefreshOutcome {
    /// The registry's ETag matched; nothing to do.
    NotModified,
    /// New or changed entries were fetched. `failed` lists file names that
    /// could not be downloaded; the refresh continues past individual failures.
    Updated { new_etag: String, fetched: Vec<String>, failed: Vec<String> },
}

/// Serializes refreshes against themselves: a second caller observes the
/// first's result instead of issuing a duplicate conditional GET.
pub struct TemplateDownloader {
    client: reqwest::Client,
    lock: Arc<Mutex<()>>,
}

impl TemplateDownloader {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Refreshes the on-disk appliance template directory from the public
    /// registry. `current_etag` is whatever was last persisted; `dest_dir` is
    /// where downloaded files are written.
    pub async fn refresh(
        &self,
        current_etag: Option<&str>,
        dest_dir: &Path,
    ) -> Result<RefreshOutcome, TemplateDownloadError> {
        let _guard = self.lock.lock().await;

        let mut request = self.client.get(REGISTRY_URL);
        if let Some(etag) = current_etag {
            request = request.header("If-None-Match", etag);
        }

        let response = request.send().await.map_err(|e| TemplateDownloadError::Unreachable(e.to_string()))?;

        if response.status().as_u16() == 304 {
            return Ok(RefreshOutcome::NotModified);
        }
        if !response.status().is_success() {
            return Err(TemplateDownloadError::Http(response.status().as_u16()));
        }

        let new_etag = response
            .headers()
            .get("etag")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let entries: Vec<RegistryEntry> = response.json().await.map_err(|e| TemplateDownloadError::Unreachable(e.to_string()))?;

        let mut fetched = Vec::new();
        let mut failed = Vec::new();

        std::fs::create_dir_all(dest_dir).map_err(|e| TemplateDownloadError::Unreachable(e.to_string()))?;

        for entry in entries.into_iter().filter(|e| e.entry_type == "file") {
            let Some(download_url) = entry.download_url.clone() else {
                failed.push(entry.name);
                continue;
            };
            match self.fetch_one(&download_url, dest_dir, &entry.name).await {
                Ok(()) => fetched.push(entry.name),
                Err(err) => {
                    warn!(file = %entry.name, error = %err, "failed to download appliance template");
                    failed.push(entry.name);
                }
            }
        }

        Ok(RefreshOutcome::Updated { new_etag, fetched, failed })
    }

    async fn fetch_one(&self, url: &str, dest_dir: &Path, file_name: &str) -> Result<(), TemplateDownloadError> {
        let body = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TemplateDownloadError::Unreachable(e.to_string()))?
            .bytes()
            .await
            .map_err(|e| TemplateDownloadError::Unreachable(e.to_string()))?;

        let tmp_path = dest_dir.join(format!("{file_name}.tmp"));
        let final_path = dest_dir.join(file_name);
        std::fs::write(&tmp_path, &body).map_err(|e| TemplateDownloadError::Unreachable(e.to_string()))?;
        std::fs::rename(&tmp_path, &final_path).map_err(|e| TemplateDownloadError::Unreachable(e.to_string()))?;
        Ok(())
    }
}

impl Default for TemplateDownloader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "template_downloader_tests.rs"]
mod tests;
