//! Error types for the management client

use serde::Deserialize;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the management plane
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed before a response arrived
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// The identity provider rejected the service principal
    #[error("Authentication failed (status {status}): {message}")]
    Authentication {
        /// HTTP status code from the token endpoint
        status: u16,
        /// Error description from the identity provider
        message: String,
    },

    /// Management API returned an error status code
    #[error("API error (status {status}{}): {message}", code_suffix(.code))]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error code from the response envelope, if any
        code: Option<String>,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),
}

fn code_suffix(code: &Option<String>) -> String {
    code.as_deref()
        .map(|c| format!(", code {c}"))
        .unwrap_or_default()
}

/// Error envelope used by the management plane: `{"error": {"code", "message"}}`
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: Option<String>,
    message: Option<String>,
}

impl ClientError {
    /// Build an API error from a status code and raw response body
    ///
    /// The body is parsed as the management error envelope when possible,
    /// otherwise it becomes the message verbatim.
    pub fn from_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(envelope) => Self::ApiError {
                status,
                code: envelope.error.code,
                message: envelope
                    .error
                    .message
                    .unwrap_or_else(|| body.to_string()),
            },
            Err(_) => Self::ApiError {
                status,
                code: None,
                message: if body.is_empty() {
                    "Unknown error".to_string()
                } else {
                    body.to_string()
                },
            },
        }
    }

    /// HTTP status of the failure, when one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RequestFailed(e) => e.status().map(|s| s.as_u16()),
            Self::Authentication { status, .. } | Self::ApiError { status, .. } => Some(*status),
            Self::ParseError(_) => None,
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Whether repeating the same idempotent request may succeed
    ///
    /// Throttling, server errors and transport failures qualify;
    /// authentication and other client errors do not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ApiError { status: 429, .. } => true,
            Self::ApiError { .. } => self.is_server_error(),
            Self::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::Authentication { .. } | Self::ParseError(_) => false,
        }
    }
}
