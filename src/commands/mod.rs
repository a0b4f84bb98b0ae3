//! CLI command definitions.

pub mod seed;

use clap::{Parser, Subcommand};

/// usersvc: authentication and authorization service
#[derive(Debug, Parser)]
#[command(name = "usersvc-server", version, about, long_about = None)]
pub struct Cli {
    /// Configuration overlay to load from `config/{env}.toml`
    #[arg(long, env = "USERSVC_ENV", default_value = "development")]
    pub env: String,

    /// Subcommand to execute (defaults to `serve`)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create default roles and permissions, and optionally an admin user
    Seed(seed::SeedArgs),
}
