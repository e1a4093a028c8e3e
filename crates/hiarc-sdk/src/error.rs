//! Error types for the Hiarc SDK.

use reqwest::StatusCode;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// The platform answered with a non-success status
    #[error("API error (HTTP {status}): {body}")]
    ApiError {
        /// Response status
        status: StatusCode,
        /// Whatever body the server sent, possibly empty
        body: String,
    },

    /// Connection error (network, DNS, TLS, timeout)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Request could not be built or sent
    #[error("Request error: {0}")]
    RequestError(String),

    /// Response body could not be decoded
    #[error("Failed to decode response: {0}")]
    DecodeError(String),

    /// Base URL could not be parsed or cannot hold a path
    #[error("Invalid base URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A credential or user key cannot be sent as a header value
    #[error("Invalid value for header {0}")]
    InvalidHeader(&'static str),

    /// Local file error during upload or download
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SdkError {
    /// The HTTP status, when the error came from the platform
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SdkError::ApiError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            SdkError::DecodeError(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::ApiError {
                status,
                body: e.to_string(),
            }
        } else {
            SdkError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::DecodeError(format!("JSON parsing error: {}", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_includes_status_and_body() {
        let err = SdkError::ApiError {
            status: StatusCode::NOT_FOUND,
            body: r#"{"message":"missing"}"#.to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("404 Not Found"));
        assert!(msg.contains("missing"));
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn test_json_error_maps_to_decode() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(SdkError::from(json_err), SdkError::DecodeError(_)));
    }
}
