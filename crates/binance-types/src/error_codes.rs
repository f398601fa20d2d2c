//! Binance API error code mapping with recovery strategies
//!
//! Failed requests carry a JSON payload of the form
//! `{"code": -1121, "msg": "Invalid symbol."}`. This module decodes that
//! payload and classifies the documented codes so callers can decide how to
//! react. Nothing here retries on its own.

use serde::Deserialize;
use std::time::Duration;

/// Recovery strategy for handling API errors
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RecoveryStrategy {
    /// Exponential backoff before retry
    Backoff {
        initial_ms: u64,
        max_ms: u64,
        multiplier: u32, // Multiplier as integer (e.g., 2 = 2x)
    },
    /// Fixed delay retry
    Retry { delay_ms: u64, max_attempts: u32 },
    /// Local clock drifted outside recvWindow; resync before retrying
    ResyncClock,
    /// Cannot recover programmatically - fatal error
    Fatal,
    /// Requires user intervention (e.g., add funds)
    UserAction { message: &'static str },
    /// Request was invalid as built; do not resend it unchanged
    Skip,
    /// Manual investigation needed
    #[default]
    Manual,
}

impl RecoveryStrategy {
    /// Default exponential backoff for rate limits
    pub fn rate_limit_backoff() -> Self {
        Self::Backoff {
            initial_ms: 1000,
            max_ms: 60000,
            multiplier: 2,
        }
    }

    /// Default retry for transient service errors
    pub fn service_retry() -> Self {
        Self::Retry {
            delay_ms: 1000,
            max_attempts: 3,
        }
    }

    /// Get the initial delay duration
    pub fn initial_delay(&self) -> Option<Duration> {
        match self {
            Self::Backoff { initial_ms, .. } => Some(Duration::from_millis(*initial_ms)),
            Self::Retry { delay_ms, .. } => Some(Duration::from_millis(*delay_ms)),
            _ => None,
        }
    }

    /// Check if this strategy allows retry
    pub fn allows_retry(&self) -> bool {
        matches!(
            self,
            Self::Backoff { .. } | Self::Retry { .. } | Self::ResyncClock
        )
    }
}

/// Binance error code ranges
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// -1000 to -1099: general server or network issues
    Server,
    /// -1100 to -1199: request parameter issues
    Request,
    /// -2000 to -2099: processing issues (orders, keys)
    Processing,
    /// Anything else
    Unknown,
}

impl ErrorCategory {
    /// Classify a numeric error code by its range
    pub fn from_code(code: i64) -> Self {
        match code {
            -1099..=-1000 => Self::Server,
            -1199..=-1100 => Self::Request,
            -2099..=-2000 => Self::Processing,
            _ => Self::Unknown,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    code: i64,
    #[serde(default)]
    msg: String,
}

/// Parsed Binance API error with metadata
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} ({raw_code})")]
pub struct BinanceApiError {
    /// Numeric code reported by the exchange
    pub raw_code: i64,
    /// Parsed error code (if recognized)
    pub code: Option<BinanceErrorCode>,
    /// Error category
    pub category: ErrorCategory,
    /// Message reported by the exchange
    pub message: String,
}

impl BinanceApiError {
    /// Build from a numeric code and message
    pub fn new(raw_code: i64, message: impl Into<String>) -> Self {
        Self {
            raw_code,
            code: BinanceErrorCode::from_code(raw_code),
            category: ErrorCategory::from_code(raw_code),
            message: message.into(),
        }
    }

    /// Decode an error payload from a raw response body
    ///
    /// Returns `None` when the body is not a `{"code", "msg"}` document,
    /// which happens for HTML error pages served by proxies.
    pub fn parse(body: &[u8]) -> Option<Self> {
        let payload: ErrorPayload = serde_json::from_slice(body).ok()?;
        Some(Self::new(payload.code, payload.msg))
    }

    /// Get the recovery strategy for this error
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        self.code
            .map(|c| c.recovery_strategy())
            .unwrap_or(RecoveryStrategy::Manual)
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        self.recovery_strategy().allows_retry()
    }

    /// Check if this is a rate limit error
    pub fn is_rate_limit(&self) -> bool {
        matches!(
            self.code,
            Some(BinanceErrorCode::TooManyRequests) | Some(BinanceErrorCode::TooManyOrders)
        )
    }

    /// Check if the credentials were rejected
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self.code,
            Some(BinanceErrorCode::Unauthorized)
                | Some(BinanceErrorCode::InvalidSignature)
                | Some(BinanceErrorCode::BadApiKeyFormat)
                | Some(BinanceErrorCode::RejectedApiKey)
        )
    }

    /// Check if this is a fatal error that cannot be recovered
    pub fn is_fatal(&self) -> bool {
        matches!(self.recovery_strategy(), RecoveryStrategy::Fatal)
    }
}

/// Documented Binance spot API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinanceErrorCode {
    // === 10xx General server or network issues ===
    /// -1000 UNKNOWN
    Unknown,
    /// -1001 DISCONNECTED
    Disconnected,
    /// -1002 UNAUTHORIZED
    Unauthorized,
    /// -1003 TOO_MANY_REQUESTS
    TooManyRequests,
    /// -1006 UNEXPECTED_RESP
    UnexpectedResponse,
    /// -1007 TIMEOUT
    Timeout,
    /// -1008 SERVER_BUSY
    ServerBusy,
    /// -1013 INVALID_MESSAGE (usually a symbol filter failure)
    FilterFailure,
    /// -1014 UNKNOWN_ORDER_COMPOSITION
    UnknownOrderComposition,
    /// -1015 TOO_MANY_ORDERS
    TooManyOrders,
    /// -1016 SERVICE_SHUTTING_DOWN
    ServiceShuttingDown,
    /// -1020 UNSUPPORTED_OPERATION
    UnsupportedOperation,
    /// -1021 INVALID_TIMESTAMP
    InvalidTimestamp,
    /// -1022 INVALID_SIGNATURE
    InvalidSignature,

    // === 11xx Request issues ===
    /// -1100 ILLEGAL_CHARS
    IllegalChars,
    /// -1101 TOO_MANY_PARAMETERS
    TooManyParameters,
    /// -1102 MANDATORY_PARAM_EMPTY_OR_MALFORMED
    MandatoryParamMissing,
    /// -1103 UNKNOWN_PARAM
    UnknownParam,
    /// -1104 UNREAD_PARAMETERS
    UnreadParameters,
    /// -1105 PARAM_EMPTY
    ParamEmpty,
    /// -1106 PARAM_NOT_REQUIRED
    ParamNotRequired,
    /// -1111 BAD_PRECISION
    BadPrecision,
    /// -1112 NO_DEPTH
    NoDepth,
    /// -1114 TIF_NOT_REQUIRED
    TimeInForceNotRequired,
    /// -1115 INVALID_TIF
    InvalidTimeInForce,
    /// -1116 INVALID_ORDER_TYPE
    InvalidOrderType,
    /// -1117 INVALID_SIDE
    InvalidSide,
    /// -1118 EMPTY_NEW_CL_ORD_ID
    EmptyNewClientOrderId,
    /// -1119 EMPTY_ORG_CL_ORD_ID
    EmptyOrigClientOrderId,
    /// -1120 BAD_INTERVAL
    BadInterval,
    /// -1121 BAD_SYMBOL
    BadSymbol,
    /// -1125 INVALID_LISTEN_KEY
    InvalidListenKey,
    /// -1127 MORE_THAN_XX_HOURS
    LookupIntervalTooBig,
    /// -1128 OPTIONAL_PARAMS_BAD_COMBO
    OptionalParamsBadCombo,
    /// -1130 INVALID_PARAMETER
    InvalidParameter,

    // === 20xx Processing issues ===
    /// -2010 NEW_ORDER_REJECTED
    NewOrderRejected,
    /// -2011 CANCEL_REJECTED
    CancelRejected,
    /// -2013 NO_SUCH_ORDER
    NoSuchOrder,
    /// -2014 BAD_API_KEY_FMT
    BadApiKeyFormat,
    /// -2015 REJECTED_MBX_KEY
    RejectedApiKey,
    /// -2016 NO_TRADING_WINDOW
    NoTradingWindow,
}

impl BinanceErrorCode {
    /// Map a numeric error code to a known variant
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            -1000 => Self::Unknown,
            -1001 => Self::Disconnected,
            -1002 => Self::Unauthorized,
            -1003 => Self::TooManyRequests,
            -1006 => Self::UnexpectedResponse,
            -1007 => Self::Timeout,
            -1008 => Self::ServerBusy,
            -1013 => Self::FilterFailure,
            -1014 => Self::UnknownOrderComposition,
            -1015 => Self::TooManyOrders,
            -1016 => Self::ServiceShuttingDown,
            -1020 => Self::UnsupportedOperation,
            -1021 => Self::InvalidTimestamp,
            -1022 => Self::InvalidSignature,
            -1100 => Self::IllegalChars,
            -1101 => Self::TooManyParameters,
            -1102 => Self::MandatoryParamMissing,
            -1103 => Self::UnknownParam,
            -1104 => Self::UnreadParameters,
            -1105 => Self::ParamEmpty,
            -1106 => Self::ParamNotRequired,
            -1111 => Self::BadPrecision,
            -1112 => Self::NoDepth,
            -1114 => Self::TimeInForceNotRequired,
            -1115 => Self::InvalidTimeInForce,
            -1116 => Self::InvalidOrderType,
            -1117 => Self::InvalidSide,
            -1118 => Self::EmptyNewClientOrderId,
            -1119 => Self::EmptyOrigClientOrderId,
            -1120 => Self::BadInterval,
            -1121 => Self::BadSymbol,
            -1125 => Self::InvalidListenKey,
            -1127 => Self::LookupIntervalTooBig,
            -1128 => Self::OptionalParamsBadCombo,
            -1130 => Self::InvalidParameter,
            -2010 => Self::NewOrderRejected,
            -2011 => Self::CancelRejected,
            -2013 => Self::NoSuchOrder,
            -2014 => Self::BadApiKeyFormat,
            -2015 => Self::RejectedApiKey,
            -2016 => Self::NoTradingWindow,
            _ => return None,
        })
    }

    /// The numeric code reported by the exchange
    pub fn code(&self) -> i64 {
        match self {
            Self::Unknown => -1000,
            Self::Disconnected => -1001,
            Self::Unauthorized => -1002,
            Self::TooManyRequests => -1003,
            Self::UnexpectedResponse => -1006,
            Self::Timeout => -1007,
            Self::ServerBusy => -1008,
            Self::FilterFailure => -1013,
            Self::UnknownOrderComposition => -1014,
            Self::TooManyOrders => -1015,
            Self::ServiceShuttingDown => -1016,
            Self::UnsupportedOperation => -1020,
            Self::InvalidTimestamp => -1021,
            Self::InvalidSignature => -1022,
            Self::IllegalChars => -1100,
            Self::TooManyParameters => -1101,
            Self::MandatoryParamMissing => -1102,
            Self::UnknownParam => -1103,
            Self::UnreadParameters => -1104,
            Self::ParamEmpty => -1105,
            Self::ParamNotRequired => -1106,
            Self::BadPrecision => -1111,
            Self::NoDepth => -1112,
            Self::TimeInForceNotRequired => -1114,
            Self::InvalidTimeInForce => -1115,
            Self::InvalidOrderType => -1116,
            Self::InvalidSide => -1117,
            Self::EmptyNewClientOrderId => -1118,
            Self::EmptyOrigClientOrderId => -1119,
            Self::BadInterval => -1120,
            Self::BadSymbol => -1121,
            Self::InvalidListenKey => -1125,
            Self::LookupIntervalTooBig => -1127,
            Self::OptionalParamsBadCombo => -1128,
            Self::InvalidParameter => -1130,
            Self::NewOrderRejected => -2010,
            Self::CancelRejected => -2011,
            Self::NoSuchOrder => -2013,
            Self::BadApiKeyFormat => -2014,
            Self::RejectedApiKey => -2015,
            Self::NoTradingWindow => -2016,
        }
    }

    /// Get the recovery strategy for this error code
    pub fn recovery_strategy(&self) -> RecoveryStrategy {
        match self {
            // Rate limiting - backoff
            Self::TooManyRequests => RecoveryStrategy::rate_limit_backoff(),
            Self::TooManyOrders => RecoveryStrategy::Backoff {
                initial_ms: 10000,
                max_ms: 120000,
                multiplier: 2,
            },

            // Service issues - retry
            Self::Disconnected
            | Self::UnexpectedResponse
            | Self::Timeout
            | Self::ServerBusy
            | Self::ServiceShuttingDown => RecoveryStrategy::service_retry(),

            // Clock skew
            Self::InvalidTimestamp => RecoveryStrategy::ResyncClock,

            // Credentials - fatal
            Self::Unauthorized
            | Self::InvalidSignature
            | Self::BadApiKeyFormat
            | Self::RejectedApiKey => RecoveryStrategy::Fatal,

            // Trading issues - user action
            Self::NewOrderRejected => RecoveryStrategy::UserAction {
                message: "Order rejected - check balance and market status",
            },
            Self::FilterFailure => RecoveryStrategy::UserAction {
                message: "Order violates a symbol filter - adjust price or quantity",
            },
            Self::NoTradingWindow => RecoveryStrategy::UserAction {
                message: "No trading window available for this symbol",
            },

            // Validation errors - skip
            Self::IllegalChars
            | Self::TooManyParameters
            | Self::MandatoryParamMissing
            | Self::UnknownParam
            | Self::UnreadParameters
            | Self::ParamEmpty
            | Self::ParamNotRequired
            | Self::BadPrecision
            | Self::TimeInForceNotRequired
            | Self::InvalidTimeInForce
            | Self::InvalidOrderType
            | Self::InvalidSide
            | Self::EmptyNewClientOrderId
            | Self::EmptyOrigClientOrderId
            | Self::BadInterval
            | Self::BadSymbol
            | Self::InvalidListenKey
            | Self::LookupIntervalTooBig
            | Self::OptionalParamsBadCombo
            | Self::InvalidParameter
            | Self::UnknownOrderComposition
            | Self::UnsupportedOperation
            | Self::NoDepth => RecoveryStrategy::Skip,

            // Order lookups
            Self::CancelRejected | Self::NoSuchOrder => RecoveryStrategy::Skip,

            Self::Unknown => RecoveryStrategy::Manual,
        }
    }

    /// Get a human-readable description of this error
    pub fn description(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown error while processing the request",
            Self::Disconnected => "Internal error; unable to process the request",
            Self::Unauthorized => "Not authorized to execute this request",
            Self::TooManyRequests => "Too many requests",
            Self::UnexpectedResponse => "Unexpected response from the message bus",
            Self::Timeout => "Timeout waiting for backend response",
            Self::ServerBusy => "Server is busy, try again",
            Self::FilterFailure => "Request rejected by a symbol filter",
            Self::UnknownOrderComposition => "Unsupported order combination",
            Self::TooManyOrders => "Too many new orders",
            Self::ServiceShuttingDown => "Service is shutting down",
            Self::UnsupportedOperation => "Operation not supported",
            Self::InvalidTimestamp => "Timestamp outside of recvWindow",
            Self::InvalidSignature => "Signature for this request is not valid",
            Self::IllegalChars => "Illegal characters found in a parameter",
            Self::TooManyParameters => "Too many parameters sent",
            Self::MandatoryParamMissing => "Mandatory parameter empty or malformed",
            Self::UnknownParam => "Unknown parameter sent",
            Self::UnreadParameters => "Not all sent parameters were read",
            Self::ParamEmpty => "A parameter was empty",
            Self::ParamNotRequired => "A parameter was sent when not required",
            Self::BadPrecision => "Precision is over the maximum defined for this asset",
            Self::NoDepth => "No orders on the book for this symbol",
            Self::TimeInForceNotRequired => "Time in force not required for this order type",
            Self::InvalidTimeInForce => "Invalid time in force",
            Self::InvalidOrderType => "Invalid order type",
            Self::InvalidSide => "Invalid side",
            Self::EmptyNewClientOrderId => "New client order id was empty",
            Self::EmptyOrigClientOrderId => "Original client order id was empty",
            Self::BadInterval => "Invalid interval",
            Self::BadSymbol => "Invalid symbol",
            Self::InvalidListenKey => "Listen key does not exist",
            Self::LookupIntervalTooBig => "Lookup interval is too big",
            Self::OptionalParamsBadCombo => "Combination of optional parameters invalid",
            Self::InvalidParameter => "Invalid data sent for a parameter",
            Self::NewOrderRejected => "New order rejected",
            Self::CancelRejected => "Cancel rejected",
            Self::NoSuchOrder => "Order does not exist",
            Self::BadApiKeyFormat => "API key format invalid",
            Self::RejectedApiKey => "Invalid API key, IP, or permissions for action",
            Self::NoTradingWindow => "No trading window could be found for the symbol",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rate_limit_payload() {
        let err = BinanceApiError::parse(br#"{"code":-1003,"msg":"Too many requests"}"#).unwrap();
        assert_eq!(err.raw_code, -1003);
        assert_eq!(err.code, Some(BinanceErrorCode::TooManyRequests));
        assert_eq!(err.category, ErrorCategory::Server);
        assert_eq!(err.message, "Too many requests");
        assert!(err.is_rate_limit());
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_non_json_body() {
        assert!(BinanceApiError::parse(b"<h1>Page Not available</h1>").is_none());
    }

    #[test]
    fn test_unknown_code_is_manual() {
        let err = BinanceApiError::new(-9999, "something new");
        assert_eq!(err.code, None);
        assert_eq!(err.category, ErrorCategory::Unknown);
        assert_eq!(err.recovery_strategy(), RecoveryStrategy::Manual);
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_invalid_timestamp_requests_resync() {
        let err = BinanceApiError::new(-1021, "Timestamp for this request is outside of the recvWindow.");
        assert_eq!(err.recovery_strategy(), RecoveryStrategy::ResyncClock);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_auth_failures_are_fatal() {
        for code in [-1002, -1022, -2014, -2015] {
            let err = BinanceApiError::new(code, "rejected");
            assert!(err.is_auth_failure(), "code {code}");
            assert!(err.is_fatal(), "code {code}");
        }
    }

    #[test]
    fn test_code_roundtrip() {
        for code in [-1000, -1013, -1121, -2010, -2013, -2016] {
            let parsed = BinanceErrorCode::from_code(code).unwrap();
            assert_eq!(parsed.code(), code);
            assert!(!parsed.description().is_empty());
        }
    }

    #[test]
    fn test_category_ranges() {
        assert_eq!(ErrorCategory::from_code(-1100), ErrorCategory::Request);
        assert_eq!(ErrorCategory::from_code(-2011), ErrorCategory::Processing);
        assert_eq!(ErrorCategory::from_code(0), ErrorCategory::Unknown);
    }

    #[test]
    fn test_order_rejection_needs_user_action() {
        let err = BinanceApiError::new(-2010, "Account has insufficient balance for requested action.");
        assert!(matches!(
            err.recovery_strategy(),
            RecoveryStrategy::UserAction { .. }
        ));
        assert_eq!(err.to_string(), "Account has insufficient balance for requested action. (-2010)");
    }
}
