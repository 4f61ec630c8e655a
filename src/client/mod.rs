//! Notification gateway client
//!
//! The client turns a title, body and list of device tokens into a single
//! `POST {base_url}/api/send` and reads back the gateway's verdict.
//!
//! ## Architecture
//!
//! - **PushClient**: async client owning the validated base URL
//! - **BlockingPushClient**: sync wrapper for callers without a runtime
//! - **Transport**: seam between the client and the HTTP stack; `HttpTransport`
//!   is the reqwest implementation
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use push_notify::client::{ClientOptions, GatewayEndpoint, PushClient, SendOutcome};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let options = ClientOptions::new(GatewayEndpoint::host_port("push.internal", "https", 8443));
//! let client = PushClient::new(options)?;
//!
//! match client.send_notification("Build finished", "All checks passed", ["device-token"], None).await? {
//!     SendOutcome::Sent(payload) => println!("accepted: {payload}"),
//!     SendOutcome::Rejected { status } => println!("rejected with HTTP {status}"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod endpoint;
pub mod message;
pub mod outcome;
pub mod push;
pub mod transport;

pub use endpoint::{
    BaseUrl, ClientOptions, GatewayEndpoint, DEFAULT_PORT, DEFAULT_PROTOCOL, DEFAULT_TIMEOUT_SECS,
};
pub use message::NotificationRequest;
pub use outcome::SendOutcome;
pub use push::{BlockingPushClient, PushClient};
pub use transport::{GatewayResponse, HttpTransport, Transport};
