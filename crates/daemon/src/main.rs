// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! netctld
//!
//! Boots a controller instance: runs the sequenced startup, waits for a
//! shutdown signal, then runs the sequenced shutdown. The HTTP/WebSocket
//! server that would expose this over the network is out of scope here;
//! this binary exists to exercise the controller facade directly.

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use netctl_adapters::{HttpComputeTransport, NullVmSupervisor};
use netctl_daemon::{Controller, LifecycleError};
use tokio::signal::unix::{signal, SignalKind};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Some(arg) = std::env::args().nth(1) {
        match arg.as_str() {
            "--version" | "-V" | "-v" => {
                println!("netctld {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                println!("netctld {}", env!("CARGO_PKG_VERSION"));
                println!("Boots the network-emulation controller and waits for a shutdown signal.");
                println!();
                println!("OPTIONS:");
                println!("    -h, --help       Print help information");
                println!("    -v, --version    Print version information");
                return Ok(());
            }
            _ => {
                eprintln!("error: unexpected argument '{arg}'");
                eprintln!("Usage: netctld [--help | --version]");
                std::process::exit(1);
            }
        }
    }

    let config_dir = config_dir();
    let _log_guard = setup_logging(&config_dir)?;

    info!("starting netctld");

    let transport = Arc::new(HttpComputeTransport::new());
    let vm_supervisor = Arc::new(NullVmSupervisor);

    let controller = match Controller::start(config_dir, transport, vm_supervisor).await {
        Ok(controller) => controller,
        Err(LifecycleError::PortInUse { port }) => {
            eprintln!("netctld: port {port} is already in use; another controller may be running");
            std::process::exit(1);
        }
        Err(err) => {
            error!(error = %err, "controller failed to start");
            return Err(err.into());
        }
    };

    info!("controller ready");

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::select! {
        _ = sigterm.recv() => info!("received SIGTERM, shutting down"),
        _ = sigint.recv() => info!("received SIGINT, shutting down"),
    }

    if let Err(err) = controller.save() {
        error!(error = %err, "failed to persist controller settings during shutdown");
    }
    controller.shutdown().await;
    info!("netctld stopped");
    Ok(())
}

fn config_dir() -> PathBuf {
    std::env::var_os("NETCTL_CONFIG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|| dirs::config_dir().unwrap_or_else(|| PathBuf::from(".")).join("GNS3"))
}

fn setup_logging(config_dir: &Path) -> Result<tracing_appender::non_blocking::WorkerGuard, std::io::Error> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    std::fs::create_dir_all(config_dir)?;
    let file_appender = tracing_appender::rolling::never(config_dir, "netctld.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry().with(filter).with(fmt::layer().with_writer(non_blocking)).init();

    Ok(guard)
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
