//! CLI module for the Telemetry Gateway

pub mod serve;

use clap::{Parser, Subcommand};

/// Telemetry Gateway - team-scoped telemetry collection with API key and token auth
#[derive(Parser)]
#[command(name = "telemetry-gateway")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Base configuration file, replacing config/default
    #[arg(long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default)
    Serve,
}
