// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Legacy import is always best-effort: any failure is logged and swallowed
/// by the caller, never propagated as a startup failure.
#[derive(Debug, Error)]
pub enum LegacyImportError {
    #[error("I/O error reading legacy config: {0}")]
    Io(#[from] std::io::Error),
    #[error("legacy config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}
