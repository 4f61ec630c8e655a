//! Command handlers for all CLI operations
//!
//! This module contains the implementation of all command handlers,
//! providing clean separation between CLI parsing and business logic.

use super::{CliContext, Commands, ConfigAction, GatewayArgs};
use anyhow::{Context, Result};
use push_notify::client::{PushClient, SendOutcome};
use push_notify::config::CONFIG_KEYS;
use push_notify::{ClientOptions, GatewayEndpoint};
use serde_json::{Map, Value};
use std::process::ExitCode;
use tracing::debug;

/// Exit status used when the gateway declines a notification
pub const EXIT_REJECTED: u8 = 2;

/// Coordinates all command handling operations with dependency injection via CliContext
pub struct CommandHandler {
    context: CliContext,
}

impl CommandHandler {
    pub fn new(context: CliContext) -> Self {
        Self { context }
    }

    /// Route commands to their appropriate handlers
    pub async fn handle_command(self, command: Commands) -> Result<ExitCode> {
        match command {
            Commands::Send {
                title,
                body,
                tokens,
                data,
                gateway,
            } => self.handle_send(title, body, tokens, data, gateway).await,
            Commands::Init { force } => self.handle_init(force).map(|_| ExitCode::SUCCESS),
            Commands::Config { action } => self.handle_config(action).map(|_| ExitCode::SUCCESS),
        }
    }

    /// Handle the send command
    async fn handle_send(
        &self,
        title: String,
        body: String,
        tokens: Vec<String>,
        data: Option<String>,
        gateway: GatewayArgs,
    ) -> Result<ExitCode> {
        let data = data.as_deref().map(parse_data).transpose()?;
        let options = self.client_options(&gateway);
        debug!("Resolved gateway endpoint: {:?}", options.endpoint);

        let client = PushClient::new(options).context("Failed to create push client")?;
        let outcome = client
            .send_notification(&title, &body, tokens, data)
            .await
            .context("Failed to send notification")?;

        match outcome {
            SendOutcome::Sent(payload) => {
                println!("Notification sent");
                println!("Gateway: {}", client.base_url());
                if !payload.is_null() {
                    println!("{}", serde_json::to_string_pretty(&payload)?);
                }
                Ok(ExitCode::SUCCESS)
            }
            SendOutcome::Rejected { status } => {
                println!("Notification rejected by gateway (HTTP {status})");
                Ok(ExitCode::from(EXIT_REJECTED))
            }
        }
    }

    /// Handle configuration initialization
    fn handle_init(mut self, force: bool) -> Result<()> {
        let manager = &mut self.context.config_manager;

        if manager.exists() && !force {
            println!("Configuration already initialized at: {}", manager.path().display());
            println!("Use --force to overwrite");
            return Ok(());
        }

        manager.reset();
        manager.save()?;
        println!("Configuration initialized successfully at: {}", manager.path().display());
        Ok(())
    }

    /// Handle configuration management
    fn handle_config(mut self, action: ConfigAction) -> Result<()> {
        let manager = &mut self.context.config_manager;

        match action {
            ConfigAction::Show => {
                println!("{}", manager.to_toml()?);
            }
            ConfigAction::Set { key, value } => {
                if !CONFIG_KEYS.contains(&key.as_str()) {
                    anyhow::bail!(
                        "Unknown configuration key: {}. Valid keys are: {}",
                        key,
                        CONFIG_KEYS.join(", ")
                    );
                }
                manager.set_value(&key, &value)?;
                manager.save()?;
                println!("Set {key} = {value}");
            }
            ConfigAction::Path => {
                println!("{}", manager.path().display());
            }
        }

        Ok(())
    }

    /// Merge command-line gateway overrides over the configuration file
    fn client_options(&self, args: &GatewayArgs) -> ClientOptions {
        let config = &self.context.config_manager.config().gateway;
        let mut options = config.to_options();
        options.endpoint = resolve_endpoint(config.endpoint(), config, args);
        options
    }
}

fn resolve_endpoint(
    configured: GatewayEndpoint,
    config: &push_notify::GatewayConfig,
    args: &GatewayArgs,
) -> GatewayEndpoint {
    if let Some(url) = &args.url {
        return GatewayEndpoint::base_url(url.clone());
    }
    if args.host.is_none() && args.protocol.is_none() && args.port.is_none() {
        return configured;
    }
    GatewayEndpoint::host_port(
        args.host.clone().unwrap_or_else(|| config.host.clone()),
        args.protocol.clone().unwrap_or_else(|| config.protocol.clone()),
        args.port.unwrap_or(config.port),
    )
}

/// Parse the `--data` argument, which must be a JSON object
fn parse_data(raw: &str) -> Result<Map<String, Value>> {
    let value: Value = serde_json::from_str(raw).context("--data is not valid JSON")?;
    match value {
        Value::Object(map) => Ok(map),
        other => anyhow::bail!("--data must be a JSON object, got: {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use push_notify::GatewayConfig;

    #[test]
    fn test_parse_data() {
        let map = parse_data(r#"{"screen": "orders", "id": 7}"#).unwrap();
        assert_eq!(map.get("id"), Some(&Value::from(7)));

        assert!(parse_data("[1, 2]").is_err());
        assert!(parse_data("{not json").is_err());
    }

    #[test]
    fn test_resolve_endpoint_precedence() {
        let config = GatewayConfig {
            url: Some("https://gw.example.com".to_string()),
            ..Default::default()
        };

        let none = GatewayArgs::default();
        assert_eq!(
            resolve_endpoint(config.endpoint(), &config, &none),
            GatewayEndpoint::base_url("https://gw.example.com")
        );

        let url = GatewayArgs {
            url: Some("http://other:1".to_string()),
            ..Default::default()
        };
        assert_eq!(
            resolve_endpoint(config.endpoint(), &config, &url),
            GatewayEndpoint::base_url("http://other:1")
        );

        let port_only = GatewayArgs {
            port: Some(9000),
            ..Default::default()
        };
        assert_eq!(
            resolve_endpoint(config.endpoint(), &config, &port_only),
            GatewayEndpoint::host_port("localhost", "http", 9000)
        );
    }
}
