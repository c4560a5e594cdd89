//! Encoding utilities — base64.
//!
//! Base64 uses the standard alphabet with padding (RFC 4648 §4), the
//! format key material is persisted in. No URL-safe variant.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::PlainsightError;

/// Encode bytes to standard base64 (RFC 4648, with padding).
pub fn to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decode standard base64 to bytes.
///
/// # Errors
/// Returns `PlainsightError::Encoding` on invalid base64 input.
pub fn from_base64(encoded: &str) -> Result<Vec<u8>, PlainsightError> {
    STANDARD
        .decode(encoded)
        .map_err(|e| PlainsightError::Encoding(format!("invalid base64: {e}")))
}
