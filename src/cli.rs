use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "phone-finder", version, about = "Chat-style search over a phone listings spreadsheet")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the web server (default)
    Start {
        /// Path to PID file
        #[arg(short, long)]
        pid_file: Option<PathBuf>,
    },

    /// Reload configuration and listings without restarting (sends SIGHUP)
    Reload {
        /// Path to PID file
        #[arg(short, long)]
        pid_file: Option<PathBuf>,
    },

    /// Validate the configuration and try loading the listings
    Test,

    /// Run a single query against the listings and print the result
    Query {
        /// Query text, e.g. `cheap samsung`
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,

        /// Read listings from this file instead of the configured one
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Print the HTML reply the web endpoint would send
        #[arg(long)]
        html: bool,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command
            .clone()
            .unwrap_or(Commands::Start { pid_file: None })
    }
}
