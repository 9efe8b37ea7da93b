use anyhow::{bail, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{error, info, warn};

#[cfg(unix)]
use nix::libc;
#[cfg(unix)]
use tokio::signal::unix::{signal, SignalKind};

use crate::handlers::AppState;
use crate::inventory::Inventory;

/// Shutdown signal types
#[derive(Debug, Clone, Copy)]
pub enum ShutdownSignal {
    /// Graceful shutdown (drain connections, clean up)
    Graceful,
}

/// Setup signal handlers for the server
///
/// Returns a broadcast sender for shutdown signals and a join handle for the signal task
///
/// Handles:
/// - SIGTERM/SIGINT: Graceful shutdown
/// - SIGHUP: Configuration and inventory reload
#[cfg(unix)]
pub fn setup_signal_handlers(
    state: AppState,
    config_path: PathBuf,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        let (mut sigterm, mut sigint, mut sighup) = match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
            signal(SignalKind::hangup()),
        ) {
            (Ok(term), Ok(int), Ok(hup)) => (term, int, hup),
            _ => {
                error!("Failed to install signal handlers, shutdown and reload signals are ignored");
                return;
            }
        };

        loop {
            tokio::select! {
                _ = sigterm.recv() => {
                    info!("SIGTERM received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sigint.recv() => {
                    info!("SIGINT received, initiating graceful shutdown");
                    let _ = tx_clone.send(ShutdownSignal::Graceful);
                    break;
                }
                _ = sighup.recv() => {
                    info!("SIGHUP received, reloading configuration and inventory");
                    if let Err(e) = reload(&state, &config_path) {
                        error!("Failed to reload: {}", e);
                    }
                }
            }
        }
    });

    (shutdown_tx, handle)
}

/// Windows placeholder - only Ctrl+C shutdown is supported
#[cfg(not(unix))]
pub fn setup_signal_handlers(
    _state: AppState,
    _config_path: PathBuf,
) -> (
    broadcast::Sender<ShutdownSignal>,
    tokio::task::JoinHandle<()>,
) {
    let (shutdown_tx, _) = broadcast::channel(16);
    let tx_clone = shutdown_tx.clone();

    let handle = tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl+C received, initiating shutdown");
                let _ = tx_clone.send(ShutdownSignal::Graceful);
            }
            Err(e) => {
                error!("Failed to listen for Ctrl+C: {}", e);
            }
        }
    });

    (shutdown_tx, handle)
}

/// Reload configuration and inventory
///
/// The new inventory is built completely before anything is swapped in.
/// If the config or the listing source cannot be read, the current state
/// stays in place and requests keep seeing the old table.
pub fn reload(state: &AppState, config_path: &Path) -> Result<()> {
    info!("Loading new configuration from {:?}...", config_path);

    let new_config = match crate::config::load_config(config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            crate::metrics::record_reload("failed");
            return Err(e);
        }
    };

    let current = state.config.load();
    if new_config.server.host != current.server.host || new_config.server.port != current.server.port {
        warn!("Listen address changes take effect only after a restart");
    }

    let new_inventory = match Inventory::try_load(&new_config.inventory) {
        Ok(inventory) => inventory,
        Err(e) => {
            crate::metrics::record_reload("failed");
            bail!("Rejecting reload, keeping the current inventory: {}", e);
        }
    };

    let listings = new_inventory.table.len();
    state.config.store(Arc::new(new_config));
    state.inventory.store(Arc::new(new_inventory));

    crate::metrics::record_listings(listings);
    crate::metrics::record_reload("success");
    info!("Inventory swapped, now serving {} listings", listings);

    Ok(())
}

/// Send a signal to a process by PID (for the reload command)
#[cfg(unix)]
pub fn send_signal_to_pid(pid: u32, signal_kind: SignalKind) -> Result<()> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    let nix_signal = match signal_kind.as_raw_value() {
        libc::SIGTERM => Signal::SIGTERM,
        libc::SIGHUP => Signal::SIGHUP,
        libc::SIGINT => Signal::SIGINT,
        libc::SIGCONT => Signal::SIGCONT,
        _ => bail!("Unsupported signal: {:?}", signal_kind),
    };

    info!("Sending signal {:?} to PID {}", nix_signal, pid);

    kill(Pid::from_raw(pid as i32), nix_signal)
        .map_err(|e| anyhow::anyhow!("Failed to send signal to PID {}: {}", pid, e))?;

    Ok(())
}

/// Windows placeholder
#[cfg(not(unix))]
pub fn send_signal_to_pid(_pid: u32, _signal_kind: ()) -> Result<()> {
    bail!("Signal sending not supported on this platform");
}
