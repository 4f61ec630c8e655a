//! Command definitions and structures for the CLI
//!
//! This module contains all the clap-based command line argument definitions,
//! including the main CLI structure and all subcommands.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser)]
#[command(name = "push-notify")]
#[command(about = "Send push notifications through an HTTP notification gateway")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file
    #[arg(long, global = true, env = "PUSH_NOTIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a notification to one or more device tokens
    Send {
        /// Notification title
        #[arg(short, long)]
        title: String,

        /// Notification body
        #[arg(short, long)]
        body: String,

        /// Device token (repeat for several recipients)
        #[arg(short = 'k', long = "token", required = true)]
        tokens: Vec<String>,

        /// Extra payload as a JSON object
        #[arg(short, long)]
        data: Option<String>,

        #[command(flatten)]
        gateway: GatewayArgs,
    },

    /// Write a default configuration file
    Init {
        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Configure settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Gateway overrides for a single invocation
#[derive(Args, Debug, Default, Clone)]
pub struct GatewayArgs {
    /// Full gateway base URL (overrides host, protocol and port)
    #[arg(long, conflicts_with_all = ["host", "protocol", "port"])]
    pub url: Option<String>,

    /// Gateway host
    #[arg(long)]
    pub host: Option<String>,

    /// Gateway protocol
    #[arg(long)]
    pub protocol: Option<String>,

    /// Gateway port
    #[arg(long)]
    pub port: Option<u16>,
}

/// Configuration management actions
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set configuration value
    Set {
        /// Configuration key (e.g., gateway.host)
        key: String,
        /// Value to set
        value: String,
    },

    /// Print the configuration file location
    Path,
}
