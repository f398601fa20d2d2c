//! Error types for REST API operations

use crate::transport::TransportError;
use binance_auth::AuthError;
use binance_types::error_codes::{BinanceApiError, RecoveryStrategy};
use std::time::Duration;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// The HTTP exchange did not complete
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Server answered with a status of 300 or above
    #[error("API error (HTTP {status}): {}", String::from_utf8_lossy(.body))]
    Api {
        status: u16,
        /// Raw response body, usually `{"code":..,"msg":..}`
        body: Vec<u8>,
        /// Parsed `Retry-After` header, sent with 418 and 429
        retry_after: Option<Duration>,
    },

    /// Successful response body did not match the expected shape
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Parameters could not be form-encoded
    #[error("Failed to encode parameters: {0}")]
    Encode(#[from] serde_urlencoded::ser::Error),

    /// Missing API credentials for a signed endpoint
    #[error("Authentication required for this endpoint")]
    AuthRequired,

    /// Credentials could not be loaded
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl RestError {
    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw body of an API error
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Server-requested wait before retrying
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Api { retry_after, .. } => *retry_after,
            _ => None,
        }
    }

    /// Decode the exchange's `{"code", "msg"}` payload, if there is one
    pub fn api_error(&self) -> Option<BinanceApiError> {
        self.body().and_then(BinanceApiError::parse)
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            Self::Api {
                status,
                retry_after,
                ..
            } => {
                if let Some(delay) = retry_after {
                    return RecoveryStrategy::Retry {
                        delay_ms: u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        max_attempts: 1,
                    };
                }
                match (self.api_error(), *status) {
                    (Some(error), _) if error.code.is_some() => error.recovery_strategy(),
                    (_, 418 | 429) => RecoveryStrategy::rate_limit_backoff(),
                    (_, 500..=599) => RecoveryStrategy::service_retry(),
                    (_, 401 | 403) => RecoveryStrategy::Fatal,
                    _ => RecoveryStrategy::Manual,
                }
            }
            Self::Transport(TransportError::Timeout(_) | TransportError::Connect(_)) => {
                RecoveryStrategy::service_retry()
            }
            Self::Transport(_) => RecoveryStrategy::Manual,
            Self::AuthRequired | Self::Auth(_) | Self::Configuration(_) => RecoveryStrategy::Fatal,
            Self::Decode(_) | Self::Encode(_) | Self::InvalidParameter(_) => RecoveryStrategy::Skip,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this error indicates rate limiting
    pub fn is_rate_limited(&self) -> bool {
        matches!(self.status(), Some(418 | 429))
            || self.api_error().is_some_and(|e| e.is_rate_limit())
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
