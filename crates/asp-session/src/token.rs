//! Best-effort inspection of the bearer token.
//!
//! The session never rejects a token on its own; these helpers exist so
//! `auth status` can show when the server will stop accepting it.

use base64::Engine as _;
use chrono::{DateTime, Utc};

use crate::error::SessionError;

/// Decode the JWT `exp` claim without verifying the signature.
///
/// # Errors
///
/// Returns [`SessionError::Token`] if the token is not a three-part JWT or
/// the payload has no usable `exp` claim.
pub fn decode_expiry(jwt: &str) -> Result<DateTime<Utc>, SessionError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(SessionError::Token("not a JWT".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1].trim_end_matches('='))
        .map_err(|e| SessionError::Token(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| SessionError::Token(format!("payload is not JSON: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| SessionError::Token("missing exp claim".into()))?;
    DateTime::from_timestamp(exp, 0).ok_or_else(|| SessionError::Token("invalid exp timestamp".into()))
}
