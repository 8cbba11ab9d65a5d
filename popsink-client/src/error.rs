//! Error types for the Popsink client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the Popsink client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response was received
    #[error("failed to perform request: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-2xx status code
    #[error("API request failed with status {status}: {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Raw response body
        message: String,
    },

    /// Failed to encode a request body or decode a response body
    #[error("{0}")]
    ParseError(String),

    /// The client was given unusable input (e.g. a malformed base URL)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if (400..500).contains(status))
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ClientError::api_error(400, r#"{"detail":"bad name"}"#);
        assert_eq!(
            err.to_string(),
            r#"API request failed with status 400: {"detail":"bad name"}"#
        );
    }

    #[test]
    fn test_status_classification() {
        assert!(ClientError::api_error(404, "").is_not_found());
        assert!(ClientError::api_error(404, "").is_client_error());
        assert!(!ClientError::api_error(403, "").is_not_found());
        assert!(ClientError::api_error(502, "").is_server_error());
        assert!(!ClientError::api_error(502, "").is_client_error());
        assert!(!ClientError::ParseError("x".to_string()).is_server_error());
    }
}
