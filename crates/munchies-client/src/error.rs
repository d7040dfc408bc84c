//! # Client Error Types
//!
//! Error types for calls to the backend and the services built on them.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Backend             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Connection     │  │  Unauthorized           │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │  NotFound               │ │
//! │  │  ConfigLoad/Save│  │  Http (5xx)     │  │  Rejected               │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │    Protocol     │  │     Domain      │                              │
//! │  │                 │  │                 │                              │
//! │  │  Serialization  │  │  Core (EmptyCart│                              │
//! │  │  Deserialization│  │  Validation,...)│                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed mutation is returned to the view that started it. Nothing here
//! touches the cart; the checkout flow decides what survives a failure.

use munchies_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering configuration, transport and backend failures.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid client configuration: {0}")]
    InvalidConfig(String),

    /// Backend URL cannot be parsed or joined.
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Backend could not be reached.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request did not complete in time.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Backend answered with an unexpected HTTP status.
    #[error("Backend returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    // =========================================================================
    // Backend Errors
    // =========================================================================
    /// Caller lacks the privilege for this call.
    ///
    /// ## When This Occurs
    /// - A guest places an order
    /// - A non-admin manages the menu or order statuses
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Referenced entity does not exist on the backend.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: u64 },

    /// Backend refused the call (trap, failed precondition).
    #[error("Backend rejected the request: {0}")]
    Rejected(String),

    // =========================================================================
    // Protocol Errors
    // =========================================================================
    /// Request arguments could not be encoded.
    #[error("Serialization failed: {0}")]
    SerializationFailed(String),

    /// Response body could not be decoded.
    #[error("Deserialization failed: {0}")]
    DeserializationFailed(String),

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Domain rule violated before anything was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Internal client error.
    #[error("Internal error: {0}")]
    Internal(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::DeserializationFailed(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(0)
        } else if err.is_connect() || err.is_request() {
            ClientError::ConnectionFailed(err.to_string())
        } else if err.is_decode() {
            ClientError::DeserializationFailed(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::Http {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Internal(err.to_string())
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization (for retry logic)
// =============================================================================

impl ClientError {
    /// Returns true if the call may succeed when sent again.
    ///
    /// ## Retryable Errors
    /// - Connection failures and timeouts
    /// - HTTP 5xx and 429
    ///
    /// ## Non-Retryable Errors
    /// - Configuration errors
    /// - Authorization and validation failures
    /// - Anything the backend explicitly rejected
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::ConnectionFailed(_) | ClientError::Timeout(_) => true,
            ClientError::Http { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::ConnectionFailed("refused".into()).is_retryable());
        assert!(ClientError::Timeout(10).is_retryable());
        assert!(ClientError::Http { status: 503, message: "busy".into() }.is_retryable());
        assert!(ClientError::Http { status: 429, message: "slow down".into() }.is_retryable());

        assert!(!ClientError::Http { status: 404, message: "nope".into() }.is_retryable());
        assert!(!ClientError::Unauthorized("admin only".into()).is_retryable());
        assert!(!ClientError::Rejected("unknown item".into()).is_retryable());
        assert!(!ClientError::Core(CoreError::EmptyCart).is_retryable());
    }

    #[test]
    fn test_config_errors() {
        assert!(ClientError::InvalidUrl("x".into()).is_config_error());
        assert!(!ClientError::Timeout(1).is_config_error());
    }

    #[test]
    fn test_domain_errors_pass_through() {
        let err = ClientError::from(CoreError::EmptyCart);
        assert_eq!(err.to_string(), "Your cart is empty");

        let err = ClientError::from(ValidationError::required("name"));
        assert!(matches!(err, ClientError::Core(CoreError::Validation(_))));
    }
}
