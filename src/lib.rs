//! Push Notify Library
//!
//! Client for sending push notifications to device tokens through an HTTP
//! notification gateway, plus the configuration file used by the CLI.

pub mod client;
pub mod config;
pub mod errors;

// Re-export commonly used types for convenience
pub use client::{
    BlockingPushClient, ClientOptions, GatewayEndpoint, NotificationRequest, PushClient,
    SendOutcome,
};
pub use config::{Config, ConfigManager, GatewayConfig};
pub use errors::{AppError, AppResult};
