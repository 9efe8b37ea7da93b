//! Command implementations for the CLI
//!
//! - start: Start the web server
//! - reload: Reload configuration and listings of a running server
//! - test: Validate configuration and listings
//! - query: Run one query from the terminal
//! - config: Configuration display

pub mod config;
pub mod query;
pub mod reload;
pub mod start;
