// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! netctl-adapters: compute client transport, notification bus, embedded-VM
//! supervisor, and appliance-template downloader.

pub mod compute_client;
pub mod notify;
pub mod template_downloader;
pub mod vm_supervisor;

#[cfg(any(test, feature = "test-support"))]
pub use compute_client::fake::FakeComputeTransport;
pub use compute_client::http::HttpComputeTransport;
pub use compute_client::{ComputeError, ComputeEvent, ComputeTransport, Method};
pub use notify::{NotificationBus, Subscription};
pub use template_downloader::{RefreshOutcome, TemplateDownloadError, TemplateDownloader};
pub use vm_supervisor::{NullVmSupervisor, VmEndpoint, VmSupervisor, VmSupervisorError};
