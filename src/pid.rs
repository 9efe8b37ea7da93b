use anyhow::{bail, Context, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const DEFAULT_PID_FILE: &str = "./phone-finder.pid";

/// PID file manager with exclusive locking
#[derive(Debug)]
pub struct PidFile {
    path: PathBuf,
    file: File,
}

impl PidFile {
    /// Create and lock a PID file
    ///
    /// Fails if another live process holds the lock. A lock left behind by a
    /// dead process is taken over.
    pub fn create(path: Option<PathBuf>) -> Result<Self> {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_PID_FILE));

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create PID file directory: {:?}", parent))?;
        }

        // Not truncated on open: the old PID is needed if the lock is held
        #[allow(clippy::suspicious_open_options)]
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&path)
            .with_context(|| format!("Failed to open PID file: {:?}", path))?;

        if file.try_lock_exclusive().is_err() {
            let old_pid = Self::read_pid_from_file(&mut file)
                .context("Failed to read PID from locked file")?;

            if Self::is_process_running(old_pid) {
                bail!(
                    "Phone finder already running (PID: {}). Stop it first.",
                    old_pid
                );
            }

            warn!("Taking over stale PID file (old PID: {} is not running)", old_pid);
            file.lock_exclusive()
                .context("Failed to acquire lock even after detecting stale PID")?;
        }

        let pid = std::process::id();
        file.set_len(0)?;
        file.seek(SeekFrom::Start(0))?;
        writeln!(file, "{}", pid)?;
        file.flush()?;

        info!("PID file {:?} created with PID: {}", path, pid);

        Ok(PidFile { path, file })
    }

    /// Read PID from an existing PID file (for the reload command)
    pub fn read(path: Option<PathBuf>) -> Result<u32> {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_PID_FILE));

        if !path.exists() {
            bail!("PID file not found: {:?}. Is the server running?", path);
        }

        let mut file = File::open(&path)
            .with_context(|| format!("Failed to open PID file: {:?}", path))?;

        Self::read_pid_from_file(&mut file)
    }

    fn read_pid_from_file(file: &mut File) -> Result<u32> {
        file.seek(SeekFrom::Start(0))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        contents
            .trim()
            .parse::<u32>()
            .with_context(|| format!("Invalid PID in file: '{}'", contents.trim()))
    }

    #[cfg(unix)]
    fn is_process_running(pid: u32) -> bool {
        use nix::sys::signal::kill;
        use nix::unistd::Pid;

        // Null signal only checks that the process exists
        match kill(Pid::from_raw(pid as i32), None) {
            Ok(_) => true,
            Err(nix::errno::Errno::EPERM) => true,
            Err(_) => false,
        }
    }

    #[cfg(not(unix))]
    fn is_process_running(_pid: u32) -> bool {
        warn!("Process detection not implemented for this platform");
        false
    }

    #[allow(dead_code)]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for PidFile {
    fn drop(&mut self) {
        if let Err(e) = self.file.unlock() {
            warn!("Failed to unlock PID file: {}", e);
        }

        if let Err(e) = std::fs::remove_file(&self.path) {
            warn!("Failed to remove PID file {:?}: {}", self.path, e);
        } else {
            info!("PID file removed: {:?}", self.path);
        }
    }
}
