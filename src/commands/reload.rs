use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;
use tracing::info;

use crate::pid::PidFile;

#[cfg(unix)]
use phone_finder::signals::send_signal_to_pid;
#[cfg(unix)]
use tokio::signal::unix::SignalKind;

/// Execute the reload command
///
/// This sends SIGHUP to the running process, which re-reads the
/// configuration and the listings file without restarting the server
pub async fn execute(pid_file: Option<PathBuf>) -> Result<()> {
    #[cfg(not(unix))]
    {
        let _ = pid_file;
        anyhow::bail!("Reload command is not supported on this platform");
    }

    #[cfg(unix)]
    {
        let pid = PidFile::read(pid_file)?;

        println!(
            "{} {}",
            "Reloading listings".yellow(),
            format!("(PID: {})", pid).cyan()
        );

        send_signal_to_pid(pid, SignalKind::hangup())?;

        println!("{}", "  Reload signal sent successfully".green());
        println!(
            "  {}",
            "Note: Check server logs to verify reload succeeded".dimmed()
        );
        info!("SIGHUP sent to PID {}", pid);

        Ok(())
    }
}
