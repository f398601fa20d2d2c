//! API credentials for Binance
//!
//! Implements HMAC-SHA256 signing as required by Binance's signed endpoints.
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretBox};
use sha2::Sha256;
use tracing::debug;

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key on every request
pub const API_KEY_HEADER: &str = "X-MBX-APIKEY";

const API_KEY_ENV: &str = "BINANCE_API_KEY";
const API_SECRET_ENV: &str = "BINANCE_API_SECRET";

/// API credentials for authenticated requests
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (public, sent as a header)
    api_key: String,
    /// API secret (HMAC key, zeroized on drop)
    api_secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and secret
    ///
    /// The secret is used as raw bytes for the HMAC key, exactly as issued
    /// by the exchange.
    pub fn new(api_key: impl Into<String>, api_secret: impl AsRef<str>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: SecretBox::new(Box::new(api_secret.as_ref().as_bytes().to_vec())),
        }
    }

    /// Create credentials from environment variables
    ///
    /// Reads `BINANCE_API_KEY` and `BINANCE_API_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_KEY_ENV.to_string()))?;
        let api_secret = std::env::var(API_SECRET_ENV)
            .map_err(|_| AuthError::EnvVarNotSet(API_SECRET_ENV.to_string()))?;

        if api_key.trim().is_empty() {
            return Err(AuthError::InvalidCredentials(format!("{} is empty", API_KEY_ENV)));
        }
        if api_secret.trim().is_empty() {
            return Err(AuthError::InvalidCredentials(format!("{} is empty", API_SECRET_ENV)));
        }

        debug!("Loaded API credentials from environment");
        Ok(Self::new(api_key, api_secret))
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Sign an encoded parameter string
    ///
    /// Binance signature algorithm:
    /// 1. HMAC-SHA256(api_secret, payload)
    /// 2. Lowercase hex encode result
    ///
    /// The payload must be the exact string sent to the server, minus the
    /// `signature` parameter itself.
    pub fn sign(&self, payload: &str) -> String {
        // expose_secret() provides controlled access to the key
        let mut mac = HmacSha256::new_from_slice(self.api_secret.expose_secret())
            .expect("HMAC can take key of any size");
        mac.update(payload.as_bytes());

        hex::encode(mac.finalize().into_bytes())
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            api_secret: SecretBox::new(Box::new(self.api_secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .api_key
            .char_indices()
            .nth(8)
            .map(|(idx, _)| &self.api_key[..idx])
            .unwrap_or(&self.api_key);

        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("api_secret", &"[REDACTED]")
            .finish()
    }
}
