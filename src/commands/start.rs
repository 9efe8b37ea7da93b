use anyhow::Result;
use colored::Colorize;
use phone_finder::{config::Config, server};
use std::path::PathBuf;
use tracing::info;

use crate::pid::PidFile;

/// Execute the start command
///
/// Creates the PID file, then serves until a shutdown signal arrives.
pub async fn execute(cfg: Config, config_path: PathBuf, pid_file: Option<PathBuf>) -> Result<()> {
    println!("{}", "Starting phone finder...".green());
    info!(
        "Starting phone finder with listings from {:?}",
        cfg.inventory.path
    );

    // Prevents a second instance from sharing the PID file
    let _pid_file = PidFile::create(pid_file)?;

    server::start_server(cfg, config_path).await?;

    Ok(())
}
