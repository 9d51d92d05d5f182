// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! IOU license settings, propagated verbatim to computes that need them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IouLicense {
    #[serde(default)]
    pub iourc_content: String,
    #[serde(default)]
    pub license_check: bool,
}
