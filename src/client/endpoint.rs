use std::time::Duration;
use url::Url;

use crate::errors::{AppError, AppResult};

/// Protocol used when a host is given without one
pub const DEFAULT_PROTOCOL: &str = "http";

/// Port used when a host is given without one
pub const DEFAULT_PORT: u16 = 5000;

/// Request timeout applied by the default HTTP transport
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the send endpoint, relative to the gateway base URL
pub const SEND_PATH: &str = "api/send";

/// How the gateway base URL is described before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayEndpoint {
    /// A fully-formed base URL such as `https://push.example.com`
    BaseUrl(String),
    /// A host with protocol and port, assembled as `protocol://host:port`
    HostPort {
        host: String,
        protocol: String,
        port: u16,
    },
}

impl GatewayEndpoint {
    pub fn base_url(url: impl Into<String>) -> Self {
        Self::BaseUrl(url.into())
    }

    /// Host with the default protocol and port
    pub fn host(host: impl Into<String>) -> Self {
        Self::host_port(host, DEFAULT_PROTOCOL, DEFAULT_PORT)
    }

    pub fn host_port(host: impl Into<String>, protocol: impl Into<String>, port: u16) -> Self {
        Self::HostPort {
            host: host.into(),
            protocol: protocol.into(),
            port,
        }
    }

    /// Validate the description and produce the canonical base URL
    pub fn resolve(&self) -> AppResult<BaseUrl> {
        match self {
            Self::BaseUrl(url) => BaseUrl::parse(url),
            Self::HostPort {
                host,
                protocol,
                port,
            } => BaseUrl::from_parts(host, protocol, *port),
        }
    }
}

/// Validated, absolute gateway base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl {
    base: String,
    send_url: Url,
}

impl BaseUrl {
    /// Parse a pre-built base URL. Trailing slashes are dropped.
    pub fn parse(url: &str) -> AppResult<Self> {
        let trimmed = url.trim();
        if trimmed.is_empty() {
            return Err(AppError::configuration(
                "Gateway URL is required and cannot be empty.",
            ));
        }

        let parsed = Url::parse(trimmed).map_err(|e| {
            AppError::configuration_with_source(format!("Invalid gateway URL '{trimmed}'"), e)
        })?;
        if parsed.cannot_be_a_base() || parsed.host_str().is_none() {
            return Err(AppError::configuration(format!(
                "Gateway URL '{trimmed}' must be an absolute URL with a host"
            )));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(AppError::configuration(format!(
                "Gateway URL '{trimmed}' must not carry a query or fragment"
            )));
        }

        let base = trimmed.trim_end_matches('/').to_string();
        Self::with_send_url(base)
    }

    /// Assemble `protocol://host:port` and validate it
    pub fn from_parts(host: &str, protocol: &str, port: u16) -> AppResult<Self> {
        if host.trim().is_empty() {
            return Err(AppError::configuration("Host is required and cannot be empty."));
        }
        if protocol.trim().is_empty() {
            return Err(AppError::configuration(
                "Protocol is required and cannot be empty.",
            ));
        }
        if port == 0 {
            return Err(AppError::configuration("Port is required and cannot be empty."));
        }

        let base = format!("{protocol}://{host}:{port}");
        let invalid = || {
            AppError::configuration(
                "Invalid URL constructed from provided protocol, host, and port.",
            )
        };

        let parsed = Url::parse(&base).map_err(|e| {
            AppError::configuration_with_source(
                "Invalid URL constructed from provided protocol, host, and port.",
                e,
            )
        })?;
        // A host smuggling in a path, query or credentials is not a bare host
        if parsed.cannot_be_a_base()
            || parsed.host_str().is_none()
            || parsed.path() != "/"
            || parsed.query().is_some()
            || parsed.fragment().is_some()
            || !parsed.username().is_empty()
        {
            return Err(invalid());
        }

        Self::with_send_url(base)
    }

    fn with_send_url(base: String) -> AppResult<Self> {
        let mut send_url = Url::parse(&base)?;
        send_url
            .path_segments_mut()
            .map_err(|_| AppError::configuration(format!("Gateway URL '{base}' cannot be a base")))?
            .pop_if_empty()
            .extend(SEND_PATH.split('/'));
        Ok(Self { base, send_url })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// Full URL of the send endpoint
    pub fn send_url(&self) -> &Url {
        &self.send_url
    }
}

impl std::fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base)
    }
}

/// Everything needed to build a [`super::PushClient`] with the default transport
#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub endpoint: GatewayEndpoint,
    pub timeout: Duration,
    pub user_agent: Option<String>,
}

impl ClientOptions {
    pub fn new(endpoint: GatewayEndpoint) -> Self {
        Self {
            endpoint,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: Some(concat!("push-notify/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_message(result: AppResult<BaseUrl>) -> String {
        match result {
            Err(AppError::Configuration { message, .. }) => message,
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_host_port_assembles_exact_url() {
        let base = GatewayEndpoint::host_port("api.example.com", "https", 443)
            .resolve()
            .unwrap();
        assert_eq!(base.as_str(), "https://api.example.com:443");
        assert_eq!(base.send_url().as_str(), "https://api.example.com/api/send");

        let base = GatewayEndpoint::host_port("localhost", "http", 3000)
            .resolve()
            .unwrap();
        assert_eq!(base.as_str(), "http://localhost:3000");
        assert_eq!(base.send_url().as_str(), "http://localhost:3000/api/send");
    }

    #[test]
    fn test_host_uses_defaults() {
        let base = GatewayEndpoint::host("localhost").resolve().unwrap();
        assert_eq!(base.as_str(), "http://localhost:5000");
    }

    #[test]
    fn test_empty_parts_are_rejected() {
        assert_eq!(
            config_message(BaseUrl::from_parts("", "http", 5000)),
            "Host is required and cannot be empty."
        );
        assert_eq!(
            config_message(BaseUrl::from_parts("   ", "http", 5000)),
            "Host is required and cannot be empty."
        );
        assert_eq!(
            config_message(BaseUrl::from_parts("localhost", "", 5000)),
            "Protocol is required and cannot be empty."
        );
        assert_eq!(
            config_message(BaseUrl::from_parts("localhost", "http", 0)),
            "Port is required and cannot be empty."
        );
    }

    #[test]
    fn test_malformed_host_is_rejected() {
        for host in ["bad host", "localhost/path", "user@localhost", "host?x=1"] {
            let message = config_message(BaseUrl::from_parts(host, "http", 5000));
            assert_eq!(
                message, "Invalid URL constructed from provided protocol, host, and port.",
                "host {host:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_base_url_variant() {
        let base = GatewayEndpoint::base_url("https://push.example.com/")
            .resolve()
            .unwrap();
        assert_eq!(base.as_str(), "https://push.example.com");
        assert_eq!(base.send_url().as_str(), "https://push.example.com/api/send");

        let base = BaseUrl::parse("http://gw.internal:8080/notify").unwrap();
        assert_eq!(
            base.send_url().as_str(),
            "http://gw.internal:8080/notify/api/send"
        );
    }

    #[test]
    fn test_base_url_rejects_query_and_fragment() {
        for url in ["http://gw.example.com?token=1", "http://gw.example.com/push#frag"] {
            let message = config_message(BaseUrl::parse(url));
            assert!(message.contains("query or fragment"), "{url}: {message}");
        }
    }

    #[test]
    fn test_base_url_trailing_slashes_are_normalized() {
        for url in ["http://gw.example.com//", "http://gw.example.com/push///"] {
            let base = BaseUrl::parse(url).unwrap();
            assert!(!base.as_str().ends_with('/'), "{url}");
            assert!(base.send_url().path().ends_with("/api/send"), "{url}");
            assert!(!base.send_url().path().contains("//"), "{url}");
        }

        let base = BaseUrl::parse("http://gw.example.com//").unwrap();
        assert_eq!(base.send_url().as_str(), "http://gw.example.com/api/send");
    }

    #[test]
    fn test_base_url_rejects_non_absolute() {
        assert!(BaseUrl::parse("").is_err());
        assert!(BaseUrl::parse("push.example.com").is_err());
        assert!(BaseUrl::parse("mailto:ops@example.com").is_err());
    }
}
