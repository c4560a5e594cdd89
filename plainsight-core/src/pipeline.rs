//! Conceal and reveal: the full message-in-image pipeline.
//!
//! ```text
//! conceal: message -> encrypt_message -> envelope::serialize -> stego::embed
//! reveal:  stego::extract -> envelope::deserialize -> decrypt_message
//! ```

use rand_core::{CryptoRngCore, OsRng};

use crate::constants::{ENVELOPE_HEADER_LENGTH, TAG_LENGTH};
use crate::crypto::{decrypt_message, encrypt_message_with_rng};
use crate::envelope;
use crate::errors::PlainsightError;
use crate::stego::{self, PixelBuffer};

/// Carrier capacity needed to conceal a message of `message_len` UTF-8 bytes.
pub fn required_capacity(message_len: usize) -> usize {
    ENVELOPE_HEADER_LENGTH
        .saturating_add(message_len)
        .saturating_add(TAG_LENGTH)
}

/// Whether `carrier` can hold a message of `message_len` bytes.
pub fn fits(carrier: &PixelBuffer, message_len: usize) -> bool {
    i64::try_from(required_capacity(message_len)).map_or(false, |need| need <= carrier.capacity())
}

/// Encrypt `message` for `recipient_public_key` and hide it in `carrier`.
///
/// `carrier` is modified in place. It is left untouched on any error.
///
/// # Errors
/// `PayloadTooLarge` if the envelope does not fit; `InvalidPublicKey` for
/// a malformed key.
pub fn conceal(
    carrier: &mut PixelBuffer,
    message: &str,
    recipient_public_key: &[u8],
) -> Result<(), PlainsightError> {
    conceal_with_rng(carrier, message, recipient_public_key, &mut OsRng)
}

/// [`conceal`] with caller-supplied randomness.
///
/// # Errors
/// As [`conceal`].
pub fn conceal_with_rng<R: CryptoRngCore>(
    carrier: &mut PixelBuffer,
    message: &str,
    recipient_public_key: &[u8],
    rng: &mut R,
) -> Result<(), PlainsightError> {
    if !fits(carrier, message.len()) {
        return Err(PlainsightError::PayloadTooLarge {
            size: required_capacity(message.len()),
            capacity: carrier.capacity(),
        });
    }

    let payload = encrypt_message_with_rng(message, recipient_public_key, rng)?;
    let bytes = envelope::serialize(&payload)?;
    stego::embed(carrier, &bytes)?;

    tracing::info!(
        envelope_len = bytes.len(),
        capacity = carrier.capacity(),
        "message concealed"
    );
    Ok(())
}

/// Extract and decrypt the message hidden in `carrier`.
///
/// # Errors
/// `NoHiddenData`, `TruncatedEnvelope`, `AuthenticationFailure` or
/// `InvalidUtf8` depending on where the carrier stops making sense.
pub fn reveal(carrier: &PixelBuffer, secret_key: &[u8]) -> Result<String, PlainsightError> {
    let bytes = stego::extract(carrier)?;
    let payload = envelope::deserialize(&bytes)?;
    let message = decrypt_message(&payload, secret_key)?;

    tracing::info!(message_len = message.len(), "message revealed");
    Ok(message)
}
