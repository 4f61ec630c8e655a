use crate::client::{
    ClientOptions, GatewayEndpoint, DEFAULT_PORT, DEFAULT_PROTOCOL, DEFAULT_TIMEOUT_SECS,
};
use crate::errors::{AppError, AppResult};
use directories::BaseDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration keys accepted by [`ConfigManager::set_value`]
pub const CONFIG_KEYS: &[&str] = &[
    "gateway.url",
    "gateway.host",
    "gateway.protocol",
    "gateway.port",
    "gateway.timeout_secs",
    "logging.level",
];

/// Configuration file contents for the push-notify CLI
///
/// The client itself never reads this; [`GatewayConfig::to_options`] turns it
/// into explicit [`ClientOptions`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub gateway: GatewayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Where the notification gateway lives
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Pre-built base URL; takes precedence over host/protocol/port
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_protocol() -> String {
    DEFAULT_PROTOCOL.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: None,
            host: default_host(),
            protocol: default_protocol(),
            port: default_port(),
            timeout_secs: Some(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl GatewayConfig {
    pub fn endpoint(&self) -> GatewayEndpoint {
        match &self.url {
            Some(url) => GatewayEndpoint::base_url(url.clone()),
            None => GatewayEndpoint::host_port(self.host.clone(), self.protocol.clone(), self.port),
        }
    }

    pub fn to_options(&self) -> ClientOptions {
        let options = ClientOptions::new(self.endpoint());
        match self.timeout_secs {
            Some(secs) => options.with_timeout(Duration::from_secs(secs)),
            None => options,
        }
    }
}

/// Loads and saves the TOML configuration file
///
/// The file lives at `~/.config/push-notify/config.toml` unless an explicit
/// path is given. A missing file yields the defaults; nothing is written until
/// [`save()`](Self::save) is called.
pub struct ConfigManager {
    config_path: PathBuf,
    config: Config,
}

impl ConfigManager {
    pub fn load(path: Option<PathBuf>) -> AppResult<Self> {
        let config_path = match path {
            Some(path) => path,
            None => Self::default_config_path()?,
        };
        let config = Self::read_or_default(&config_path)?;
        Ok(Self {
            config_path,
            config,
        })
    }

    pub fn default_config_path() -> AppResult<PathBuf> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| AppError::configuration("Failed to get base directories"))?;
        Ok(base_dirs.config_dir().join("push-notify").join("config.toml"))
    }

    fn read_or_default(path: &Path) -> AppResult<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::io_with_source(path, "read config file", e))?;
        Ok(toml::from_str(&content)?)
    }

    /// Write the current configuration, creating parent directories
    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| AppError::io_with_source(parent, "create config directory", e))?;
        }
        let content = self.to_toml()?;
        fs::write(&self.config_path, content)
            .map_err(|e| AppError::io_with_source(&self.config_path, "write config file", e))?;
        Ok(())
    }

    pub fn to_toml(&self) -> AppResult<String> {
        toml::to_string_pretty(&self.config)
            .map_err(|e| AppError::configuration_with_source("Failed to serialize config", e))
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    pub fn exists(&self) -> bool {
        self.config_path.exists()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reset to defaults in memory
    pub fn reset(&mut self) {
        self.config = Config::default();
    }

    /// Set a single dotted key such as `gateway.port`
    pub fn set_value(&mut self, key: &str, value: &str) -> AppResult<()> {
        let invalid = |reason: &str| AppError::configuration(format!("Invalid value for '{key}': {reason}"));
        let gateway = &mut self.config.gateway;

        match key {
            "gateway.url" => gateway.url = if value.is_empty() { None } else { Some(value.to_string()) },
            "gateway.host" => gateway.host = value.to_string(),
            "gateway.protocol" => gateway.protocol = value.to_string(),
            "gateway.port" => {
                gateway.port = value.parse().map_err(|_| invalid("expected a port number"))?
            }
            "gateway.timeout_secs" => {
                gateway.timeout_secs =
                    Some(value.parse().map_err(|_| invalid("expected a number of seconds"))?)
            }
            "logging.level" => self.config.logging.level = value.to_string(),
            _ => {
                return Err(AppError::configuration(format!(
                    "Unknown configuration key: {}. Valid keys are: {}",
                    key,
                    CONFIG_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}
