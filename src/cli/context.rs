//! CLI Context for dependency injection and shared state
//!
//! Centralizes the loaded configuration and logging setup for the handlers.

use anyhow::Result;
use push_notify::ConfigManager;
use std::path::PathBuf;

/// CLI execution context containing the configuration and verbosity
pub struct CliContext {
    pub verbose: bool,
    pub config_manager: ConfigManager,
}

impl CliContext {
    pub fn new(config_path: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let config_manager = ConfigManager::load(config_path)?;
        Ok(Self {
            verbose,
            config_manager,
        })
    }

    /// Initialize logging subsystem based on verbosity and configuration
    pub fn init_logging(&self) -> Result<()> {
        let log_level = if self.verbose {
            "debug"
        } else {
            self.config_manager.config().logging.level.as_str()
        };

        tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(
                tracing_subscriber::EnvFilter::from_default_env().add_directive(
                    log_level
                        .parse()
                        .unwrap_or_else(|_| tracing::Level::INFO.into()),
                ),
            )
            .init();

        if self.verbose {
            tracing::debug!("Verbose logging enabled");
            tracing::debug!("Config path: {:?}", self.config_manager.path());
        }

        Ok(())
    }
}
