//! Authentication primitives for the Binance API
//!
//! Signed endpoints require two things: an API key sent in the
//! `X-MBX-APIKEY` header, and a `signature` parameter holding the
//! HMAC-SHA256 of the encoded parameters keyed with the API secret.
//! Every signed request also carries a millisecond `timestamp`, which is
//! read from a [`Clock`].
//!
//! # Example
//!
//! ```
//! use binance_auth::{Clock, Credentials, FixedClock};
//!
//! let creds = Credentials::new("api-key", "secret");
//! let clock = FixedClock::new(1234567890);
//!
//! let payload = format!("timestamp={}", clock.now_millis());
//! let signature = creds.sign(&payload);
//! assert_eq!(signature.len(), 64);
//! ```

mod clock;
mod credentials;
mod error;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{Credentials, API_KEY_HEADER};
pub use error::{AuthError, AuthResult};
