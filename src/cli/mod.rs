//! CLI module for Keygate
//!
//! `serve` runs the HTTP API and is the default when no subcommand is given.

pub mod serve;

use clap::{Parser, Subcommand};

/// Keygate - API key issuance with HWID binding and expiry
#[derive(Parser)]
#[command(name = "keygate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve(serve::ServeArgs),
}

impl Cli {
    /// The requested command, falling back to `serve` with no overrides
    pub fn into_command(self) -> Command {
        self.command
            .unwrap_or_else(|| Command::Serve(serve::ServeArgs::default()))
    }
}
