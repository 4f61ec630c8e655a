use serde_json::Value;

use super::transport::GatewayResponse;
use crate::errors::{AppError, AppResult};

/// Result of a send that reached the gateway
///
/// A rejection is an ordinary answer from the gateway (unknown tokens, a
/// non-200 status) and is returned, not raised.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Gateway accepted the notification; carries the reply's `data` field
    Sent(Value),
    /// Gateway declined the notification
    Rejected { status: u16 },
}

impl SendOutcome {
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent(_))
    }

    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Sent(payload) => Some(payload),
            Self::Rejected { .. } => None,
        }
    }

    pub fn into_payload(self) -> Option<Value> {
        match self {
            Self::Sent(payload) => Some(payload),
            Self::Rejected { .. } => None,
        }
    }
}

/// Map a raw gateway reply onto an outcome.
///
/// Non-200 is always a rejection. A 200 must carry a JSON object; anything
/// else is a protocol error.
pub(crate) fn interpret_response(response: &GatewayResponse) -> AppResult<SendOutcome> {
    if response.status != 200 {
        return Ok(SendOutcome::Rejected {
            status: response.status,
        });
    }

    let reply: Value = serde_json::from_slice(&response.body).map_err(|e| {
        AppError::protocol_with_source("Gateway response body is not valid JSON", e)
    })?;
    let Value::Object(mut fields) = reply else {
        return Err(AppError::protocol("Gateway response body is not a JSON object"));
    };

    if fields.get("status").is_some_and(is_truthy) {
        Ok(SendOutcome::Sent(fields.remove("data").unwrap_or(Value::Null)))
    } else {
        Ok(SendOutcome::Rejected {
            status: response.status,
        })
    }
}

/// Loose truthiness for the `status` flag; gateways send bools, ints or strings
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty() && s != "0",
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(status: u16, body: &str) -> GatewayResponse {
        GatewayResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn test_accepted_returns_data() {
        let outcome =
            interpret_response(&response(200, r#"{"status": true, "data": {"id": "abc"}}"#))
                .unwrap();
        assert_eq!(outcome, SendOutcome::Sent(json!({"id": "abc"})));
        assert_eq!(outcome.payload(), Some(&json!({"id": "abc"})));
    }

    #[test]
    fn test_accepted_without_data() {
        let outcome = interpret_response(&response(200, r#"{"status": 1}"#)).unwrap();
        assert_eq!(outcome, SendOutcome::Sent(Value::Null));
    }

    #[test]
    fn test_status_false_is_rejection() {
        let outcome = interpret_response(&response(200, r#"{"status": false}"#)).unwrap();
        assert_eq!(outcome, SendOutcome::Rejected { status: 200 });
        assert!(!outcome.is_sent());
        assert_eq!(outcome.into_payload(), None);
    }

    #[test]
    fn test_missing_status_is_rejection() {
        let outcome = interpret_response(&response(200, r#"{"data": {"id": 1}}"#)).unwrap();
        assert_eq!(outcome, SendOutcome::Rejected { status: 200 });
    }

    #[test]
    fn test_non_200_is_rejection_whatever_the_body() {
        for (status, body) in [
            (500, "Internal Server Error"),
            (400, r#"{"status": false, "error": "invalid tokens"}"#),
            (201, r#"{"status": true, "data": {}}"#),
        ] {
            let outcome = interpret_response(&response(status, body)).unwrap();
            assert_eq!(outcome, SendOutcome::Rejected { status });
        }
    }

    #[test]
    fn test_malformed_200_is_protocol_error() {
        for body in ["<html>oops</html>", "", "[true]", "\"ok\""] {
            let err = interpret_response(&response(200, body)).unwrap_err();
            assert_eq!(err.category(), "protocol", "body {body:?}");
        }
    }

    #[test]
    fn test_truthiness() {
        for value in [json!(true), json!(1), json!(-2.5), json!("yes"), json!([0]), json!({"a": 1})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
        for value in [json!(false), json!(null), json!(0), json!(0.0), json!(""), json!("0"), json!([]), json!({})] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
    }
}
