use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{AppError, AppResult};

/// A single notification as sent to the gateway
///
/// Serializes to `{ "title", "body", "fcm_tokens", "data" }`. Build it with
/// [`NotificationRequest::new`] to have the input checked up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    #[serde(rename = "fcm_tokens")]
    pub recipients: Vec<String>,
    #[serde(default)]
    pub data: Map<String, Value>,
}

impl NotificationRequest {
    /// Create a validated request with an empty data payload
    pub fn new<I, S>(title: impl Into<String>, body: impl Into<String>, recipients: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let request = Self {
            title: title.into(),
            body: body.into(),
            recipients: recipients.into_iter().map(Into::into).collect(),
            data: Map::new(),
        };
        request.validate()?;
        Ok(request)
    }

    /// Attach application data delivered alongside the notification
    pub fn with_data(mut self, data: Map<String, Value>) -> Self {
        self.data = data;
        self
    }

    /// Check title, body and recipients
    pub fn validate(&self) -> AppResult<()> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("title", "Title must be a non-empty string."));
        }
        if self.body.trim().is_empty() {
            return Err(AppError::validation("body", "Body must be a non-empty string."));
        }
        if self.recipients.is_empty() || self.recipients.iter().any(|t| t.trim().is_empty()) {
            return Err(AppError::validation(
                "fcm_tokens",
                "FCM tokens must be an array of non-empty strings.",
            ));
        }
        Ok(())
    }

    /// JSON bytes sent as the request body
    pub fn to_json_bytes(&self) -> AppResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| {
            AppError::protocol_with_source("Failed to serialize notification request", e)
        })
    }
}
