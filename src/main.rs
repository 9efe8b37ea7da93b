use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod pid;

use phone_finder::{config, config::LogFormat, init_tracing};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Config errors are reported by the command that needs the config
    let cfg = config::load_config(&args.config);
    match &cfg {
        Ok(cfg) => init_tracing(&cfg.server.log_level, cfg.server.log_format),
        Err(_) => init_tracing("info", LogFormat::Text),
    }

    match args.get_command() {
        cli::Commands::Start { pid_file } => {
            commands::start::execute(cfg?, args.config.clone(), pid_file).await?;
        }
        cli::Commands::Reload { pid_file } => {
            commands::reload::execute(pid_file).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(cfg?)?;
        }
        cli::Commands::Query { words, file, html } => {
            commands::query::execute(cfg?, &words.join(" "), file, html)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg?)?,
        },
        cli::Commands::Version => {
            println!("Phone Finder v{}", env!("CARGO_PKG_VERSION"));
            println!("Rust {}", env!("CARGO_PKG_RUST_VERSION"));
        }
    }

    Ok(())
}
