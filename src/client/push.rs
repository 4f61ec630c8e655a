use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tracing::{debug, info, warn};

use super::endpoint::{BaseUrl, ClientOptions, GatewayEndpoint};
use super::message::NotificationRequest;
use super::outcome::{interpret_response, SendOutcome};
use super::transport::{HttpTransport, Transport};
use crate::errors::{AppError, AppResult};

/// Async client for the notification gateway
///
/// Holds only the immutable base URL and a shared transport, so clones can be
/// used from several tasks at once.
#[derive(Clone)]
pub struct PushClient {
    base_url: BaseUrl,
    transport: Arc<dyn Transport>,
}

impl PushClient {
    /// Create a client backed by the reqwest transport
    pub fn new(options: ClientOptions) -> AppResult<Self> {
        let transport = HttpTransport::new(options.timeout, options.user_agent.as_deref())?;
        Self::with_transport(options.endpoint, Arc::new(transport))
    }

    /// Create a client around any transport
    pub fn with_transport(endpoint: GatewayEndpoint, transport: Arc<dyn Transport>) -> AppResult<Self> {
        let base_url = endpoint.resolve()?;
        debug!("Push client configured for {}", base_url);
        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Validate and send one notification.
    ///
    /// `data` defaults to an empty object. Input problems fail before any
    /// network I/O.
    pub async fn send_notification<I, S>(
        &self,
        title: &str,
        body: &str,
        recipients: I,
        data: Option<Map<String, Value>>,
    ) -> AppResult<SendOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = NotificationRequest::new(title, body, recipients)?
            .with_data(data.unwrap_or_default());
        self.send(&request).await
    }

    /// Send a prepared request
    pub async fn send(&self, request: &NotificationRequest) -> AppResult<SendOutcome> {
        request.validate()?;

        let url = self.base_url.send_url();
        let body = request.to_json_bytes()?;
        debug!(
            "Sending notification '{}' to {} recipient(s) via {}",
            request.title,
            request.recipients.len(),
            url
        );

        let response = self.transport.post_json(url, body).await.map_err(|e| {
            warn!("Notification transport failed: {}", e);
            e
        })?;
        let outcome = interpret_response(&response)?;

        match &outcome {
            SendOutcome::Sent(_) => info!("Notification '{}' accepted by gateway", request.title),
            SendOutcome::Rejected { status } => {
                warn!("Notification '{}' rejected by gateway (HTTP {})", request.title, status)
            }
        }

        Ok(outcome)
    }

    /// Wrap in a synchronous facade
    pub fn blocking(self) -> AppResult<BlockingPushClient> {
        BlockingPushClient::new(self)
    }
}

impl std::fmt::Debug for PushClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PushClient")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Synchronous wrapper around [`PushClient`] for blocking callers
pub struct BlockingPushClient {
    inner: PushClient,
    // Only built when constructed outside a tokio runtime
    runtime: Option<Runtime>,
}

impl BlockingPushClient {
    pub fn new(inner: PushClient) -> AppResult<Self> {
        let runtime = match Handle::try_current() {
            Ok(_) => None,
            Err(_) => Some(Self::build_runtime()?),
        };
        Ok(Self { inner, runtime })
    }

    /// Create a blocking client backed by the reqwest transport
    pub fn with_options(options: ClientOptions) -> AppResult<Self> {
        Self::new(PushClient::new(options)?)
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    /// Send a notification, blocking until the exchange completes
    pub fn send_notification<I, S>(
        &self,
        title: &str,
        body: &str,
        recipients: I,
        data: Option<Map<String, Value>>,
    ) -> AppResult<SendOutcome>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = NotificationRequest::new(title, body, recipients)?
            .with_data(data.unwrap_or_default());
        self.send(&request)
    }

    pub fn send(&self, request: &NotificationRequest) -> AppResult<SendOutcome> {
        // The ambient runtime decides first; blocking on the owned one from
        // inside another runtime would panic
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(self.inner.send(request)))
            }
            Ok(_) => Err(AppError::configuration(
                "Blocking client cannot be used from a current-thread tokio runtime",
            )),
            Err(_) => match &self.runtime {
                Some(runtime) => runtime.block_on(self.inner.send(request)),
                None => Self::build_runtime()?.block_on(self.inner.send(request)),
            },
        }
    }

    fn build_runtime() -> AppResult<Runtime> {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| AppError::configuration_with_source("Failed to create runtime", e))
    }
}
