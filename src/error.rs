//! Error types for the HRIS client

use std::collections::BTreeMap;

use serde::Deserialize;
use thiserror::Error;

use crate::capture::CaptureError;
use crate::config::ConfigError;

/// Field-level validation failure raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Main client error type
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Request failed with status {status}")]
    Http { status: u16 },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Device capture failed: {0}")]
    Capture(#[from] CaptureError),

    #[error("Another action on {0} is still in flight")]
    Busy(String),

    #[error("Cancelled by user")]
    Cancelled,

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid session: {0}")]
    Session(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error body shapes returned by the HRIS API.
///
/// Some endpoints answer `{"message": ...}`, the auth layer answers
/// `{"error": ...}`, and form endpoints add an `errors` map keyed by field.
#[derive(Debug, Default, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Vec<String>>>,
}

impl ApiErrorBody {
    /// First human readable message carried by the body, if any.
    pub fn best_message(&self) -> Option<String> {
        if let Some(m) = self.message.as_deref().filter(|m| !m.trim().is_empty()) {
            return Some(m.to_string());
        }
        if let Some(e) = self.error.as_deref().filter(|e| !e.trim().is_empty()) {
            return Some(e.to_string());
        }
        self.errors
            .as_ref()
            .and_then(|fields| fields.values().flatten().next().cloned())
    }
}

impl ClientError {
    /// Build the error for a non-success HTTP response.
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        let parsed = serde_json::from_slice::<ApiErrorBody>(body)
            .ok()
            .and_then(|b| b.best_message());

        match (status, parsed) {
            (401, message) => {
                ClientError::Unauthorized(message.unwrap_or_else(|| "Unauthorized".to_string()))
            }
            (403, message) => {
                ClientError::Forbidden(message.unwrap_or_else(|| "Forbidden".to_string()))
            }
            (status, Some(message)) => ClientError::Api { status, message },
            (status, None) => ClientError::Http { status },
        }
    }

    /// Whether the error carries a message the user should see verbatim.
    pub fn is_recognized(&self) -> bool {
        matches!(
            self,
            ClientError::Api { .. }
                | ClientError::Unauthorized(_)
                | ClientError::Forbidden(_)
                | ClientError::Validation(_)
                | ClientError::Capture(_)
                | ClientError::Busy(_)
        )
    }

    /// Message for a toast: the server/validation message when recognised,
    /// otherwise the caller's generic fallback ("Failed to ...").
    pub fn toast_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Unauthorized(m) | ClientError::Forbidden(m) => m.clone(),
            ClientError::Validation(v) => v.message.clone(),
            ClientError::Capture(c) => c.to_string(),
            ClientError::Busy(_) => "Please wait for the current action to finish".to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Result type alias for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_body_becomes_api_error() {
        let err = ClientError::from_response(422, br#"{"message":"Quota exceeded"}"#);
        assert!(matches!(
            err,
            ClientError::Api { status: 422, ref message } if message == "Quota exceeded"
        ));
        assert_eq!(err.toast_message("Failed to submit leave"), "Quota exceeded");
    }

    #[test]
    fn field_errors_are_used_when_no_message() {
        let body = br#"{"errors":{"email":["The email has already been taken."]}}"#;
        let err = ClientError::from_response(422, body);
        assert_eq!(err.toast_message("x"), "The email has already been taken.");
    }

    #[test]
    fn auth_layer_error_shape() {
        let err = ClientError::from_response(401, br#"{"error":"Invalid or expired token"}"#);
        assert!(matches!(err, ClientError::Unauthorized(ref m) if m == "Invalid or expired token"));
    }

    #[test]
    fn unrecognized_body_falls_back_to_generic_toast() {
        let err = ClientError::from_response(502, b"<html>bad gateway</html>");
        assert!(matches!(err, ClientError::Http { status: 502 }));
        assert!(!err.is_recognized());
        assert_eq!(
            err.toast_message("Failed to approve attendance"),
            "Failed to approve attendance"
        );

        let decode = ClientError::Decode(serde_json::from_str::<u8>("x").unwrap_err());
        assert!(!decode.is_recognized());
        assert_eq!(decode.toast_message("Failed to load payroll"), "Failed to load payroll");
    }
}
