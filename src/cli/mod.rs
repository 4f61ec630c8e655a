//! CLI module providing command-line interface functionality
//!
//! This module handles argument parsing and routing to the appropriate
//! handlers while keeping the client library free of CLI concerns.

pub mod commands;
pub mod context;
pub mod handlers;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

pub use commands::{Cli, Commands, ConfigAction, GatewayArgs};
pub use context::CliContext;
pub use handlers::CommandHandler;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Parse command line arguments and execute the requested command
    pub async fn run() -> Result<ExitCode> {
        let cli = Cli::parse();

        let context = CliContext::new(cli.config.clone(), cli.verbose)?;
        context.init_logging()?;

        CommandHandler::new(context).handle_command(cli.command).await
    }
}
