//! Request builder
//!
//! A [`Request`] collects the method, path and parameters of one API call.
//! Parameters live in a sorted map so that the encoded query string, and
//! therefore the signature computed over it, does not depend on the order
//! in which they were set.
//!
//! ```
//! use binance_rest::request::{Method, Request};
//!
//! let limit: Option<u32> = None;
//! let request = Request::new(Method::Get, "/api/v3/depth")
//!     .param("symbol", "ETHBTC")
//!     .optional_param("limit", limit);
//!
//! assert_eq!(request.query_string().unwrap(), "symbol=ETHBTC");
//! ```

use binance_types::{KlineInterval, OrderResponseType, OrderType, Side, TimeInForce};
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        }
    }

    /// Returns true if parameters travel in the form body instead of the URL
    pub fn has_form_body(&self) -> bool {
        matches!(self, Self::Post)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A value that can be rendered as a query parameter
///
/// Rendering is locale independent. Floating point and decimal values are
/// always rendered with exactly 8 fractional digits, the precision the
/// exchange expects for prices and quantities.
pub trait QueryValue {
    fn to_query_value(&self) -> String;
}

impl<T: QueryValue + ?Sized> QueryValue for &T {
    fn to_query_value(&self) -> String {
        (**self).to_query_value()
    }
}

impl QueryValue for str {
    fn to_query_value(&self) -> String {
        self.to_string()
    }
}

impl QueryValue for String {
    fn to_query_value(&self) -> String {
        self.clone()
    }
}

macro_rules! display_query_value {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> String {
                    self.to_string()
                }
            }
        )*
    };
}

display_query_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64, bool);

impl QueryValue for f64 {
    fn to_query_value(&self) -> String {
        format!("{:.8}", self)
    }
}

impl QueryValue for Decimal {
    fn to_query_value(&self) -> String {
        // rescale caps the scale at what the 96-bit mantissa can hold,
        // so very large values keep fewer than 8 fractional digits
        let mut value = self.round_dp(8);
        value.rescale(8);
        value.to_string()
    }
}

macro_rules! enum_query_value {
    ($($ty:ty),*) => {
        $(
            impl QueryValue for $ty {
                fn to_query_value(&self) -> String {
                    self.as_str().to_string()
                }
            }
        )*
    };
}

enum_query_value!(Side, OrderType, TimeInForce, OrderResponseType, KlineInterval);

/// Parameters and routing of a single API call
///
/// Two requests are equal when method, path, parameter set and signed flag
/// are equal; insertion order is irrelevant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    params: BTreeMap<String, String>,
    signed: bool,
}

impl Request {
    /// Create a request with no parameters
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: BTreeMap::new(),
            signed: false,
        }
    }

    /// Set a parameter, replacing any previous value for the same name
    pub fn param(mut self, name: impl Into<String>, value: impl QueryValue) -> Self {
        self.params.insert(name.into(), value.to_query_value());
        self
    }

    /// Set a parameter only when a value is present
    pub fn optional_param<V: QueryValue>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }

    /// Mark the request as requiring a signature
    pub fn signed(mut self) -> Self {
        self.signed = true;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_signed(&self) -> bool {
        self.signed
    }

    /// Look up a rendered parameter value
    pub fn get_param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// Iterate over parameters in encoding order
    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Canonical `application/x-www-form-urlencoded` encoding
    ///
    /// Keys are sorted lexicographically. This is the exact string that gets
    /// signed.
    pub fn query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_new_request_is_empty_and_unsigned() {
        let request = Request::new(Method::Get, "/api/v3/ping");
        assert_eq!(request.method(), Method::Get);
        assert_eq!(request.path(), "/api/v3/ping");
        assert!(!request.is_signed());
        assert_eq!(request.query_string().unwrap(), "");
    }

    #[test]
    fn test_keys_are_sorted() {
        let request = Request::new(Method::Get, "/x")
            .param("symbol", "LTCBTC")
            .param("limit", 100u32);
        assert_eq!(request.query_string().unwrap(), "limit=100&symbol=LTCBTC");
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let a = Request::new(Method::Post, "/api/v3/order")
            .param("symbol", "ETHBTC")
            .param("side", Side::Buy)
            .param("quantity", 1.5f64);
        let b = Request::new(Method::Post, "/api/v3/order")
            .param("quantity", 1.5f64)
            .param("symbol", "ETHBTC")
            .param("side", Side::Buy);

        assert_eq!(a, b);
        assert_eq!(a.query_string().unwrap(), b.query_string().unwrap());
    }

    #[test]
    fn test_last_write_wins() {
        let request = Request::new(Method::Get, "/x")
            .param("limit", 100u32)
            .param("limit", 500u32);
        assert_eq!(request.get_param("limit"), Some("500"));
        assert_eq!(request.query_string().unwrap(), "limit=500");
    }

    #[test]
    fn test_absent_optional_param_is_omitted() {
        let request = Request::new(Method::Get, "/x").param("symbol", "ETHBTC");
        let before = request.query_string().unwrap();

        let request = request.optional_param("limit", None::<u32>);
        assert_eq!(request.query_string().unwrap(), before);
        assert_eq!(before, "symbol=ETHBTC");
    }

    #[test]
    fn test_present_optional_param_is_sent() {
        let request = Request::new(Method::Get, "/x")
            .param("symbol", "ETHBTC")
            .optional_param("limit", Some(10u32))
            .optional_param("fromId", Some(0i64));
        assert_eq!(
            request.query_string().unwrap(),
            "fromId=0&limit=10&symbol=ETHBTC"
        );
    }

    #[test]
    fn test_fixed_precision_rendering() {
        assert_eq!(1.0f64.to_query_value(), "1.00000000");
        assert_eq!(0.1f64.to_query_value(), "0.10000000");
        assert_eq!(30000.5f64.to_query_value(), "30000.50000000");
        assert_eq!(dec!(0.1).to_query_value(), "0.10000000");
        assert_eq!(dec!(25000).to_query_value(), "25000.00000000");
        assert_eq!((-42i64).to_query_value(), "-42");
        assert_eq!(true.to_query_value(), "true");
    }

    #[test]
    fn test_enum_rendering() {
        let request = Request::new(Method::Post, "/api/v3/order")
            .param("type", OrderType::StopLossLimit)
            .param("timeInForce", TimeInForce::ImmediateOrCancel)
            .param("newOrderRespType", OrderResponseType::Full)
            .param("interval", KlineInterval::Month1);
        assert_eq!(request.get_param("type"), Some("STOP_LOSS_LIMIT"));
        assert_eq!(request.get_param("timeInForce"), Some("IOC"));
        assert_eq!(request.get_param("newOrderRespType"), Some("FULL"));
        assert_eq!(request.get_param("interval"), Some("1M"));
    }

    #[test]
    fn test_values_are_url_encoded() {
        let request = Request::new(Method::Get, "/x")
            .param("newClientOrderId", "my order&id=1");
        assert_eq!(
            request.query_string().unwrap(),
            "newClientOrderId=my+order%26id%3D1"
        );
    }

    #[test]
    fn test_signed_flag_affects_equality() {
        let unsigned = Request::new(Method::Get, "/api/v3/account").param("timestamp", 1i64);
        let signed = unsigned.clone().signed();
        assert!(signed.is_signed());
        assert_ne!(unsigned, signed);
    }

    #[test]
    fn test_largest_decimal_renders_without_panicking() {
        assert_eq!(
            Decimal::MAX.to_query_value(),
            "79228162514264337593543950335"
        );
        let request = Request::new(Method::Post, "/api/v3/order").param("quantity", Decimal::MAX);
        assert_eq!(
            request.query_string().unwrap(),
            "quantity=79228162514264337593543950335"
        );
        assert_eq!(dec!(123.456789012).to_query_value(), "123.45678901");
    }
}
