//! Error types for the anet-accept library

use thiserror::Error;

/// Result type alias for payment operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Main error type for payment operations
#[derive(Error, Debug)]
pub enum PaymentError {
    /// Public client key lookup failed; carries the gateway's reported
    /// code and message verbatim. Not retryable without operator
    /// intervention (bad credentials or environment mismatch).
    #[error("Credential error {code}: {message}")]
    Credential { code: String, message: String },

    /// Charge rejected or gateway-side failure; carries the gateway's
    /// reported code and message verbatim. Retry policy is the caller's.
    #[error("Gateway error {code}: {message}")]
    Gateway { code: String, message: String },

    /// Malformed request or configuration (caller bug). Never
    /// retryable.
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl PaymentError {
    /// Create a credential error from a gateway message
    pub fn credential(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Credential {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a gateway error from a gateway message
    pub fn gateway(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Gateway {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// The gateway-reported code, if this error carries one
    pub fn gateway_code(&self) -> Option<&str> {
        match self {
            Self::Credential { code, .. } | Self::Gateway { code, .. } => Some(code),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_preserves_gateway_fields() {
        let err = PaymentError::credential("E00007", "User authentication failed.");
        assert_eq!(
            err.to_string(),
            "Credential error E00007: User authentication failed."
        );
        assert_eq!(err.gateway_code(), Some("E00007"));
    }

    #[test]
    fn test_validation_error_has_no_gateway_code() {
        let err = PaymentError::validation("amount must be positive");
        assert_eq!(err.gateway_code(), None);
    }
}
