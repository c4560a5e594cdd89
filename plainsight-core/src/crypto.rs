//! Hybrid message encryption — ML-KEM-768 + HKDF-SHA256 + AES-256-GCM.
//!
//! ```text
//! encrypt: (kem_ct, ss) = Encaps(recipient_pk)
//!          key          = derive_key(ss)
//!          (iv, ct)     = AES-256-GCM(key, message)
//! decrypt: ss = Decaps(kem_ct, sk); key = derive_key(ss); AES-GCM open
//! ```
//!
//! One encapsulation per message; there is no session state and no
//! forward secrecy beyond that.

use rand_core::{CryptoRngCore, OsRng};

use crate::cipher;
use crate::envelope::EncryptedPayload;
use crate::errors::PlainsightError;
use crate::kem;

/// Encrypt `message` for the holder of `recipient_public_key`.
///
/// # Errors
/// `InvalidPublicKey` if the key is not an ML-KEM-768 public key.
pub fn encrypt_message(
    message: &str,
    recipient_public_key: &[u8],
) -> Result<EncryptedPayload, PlainsightError> {
    encrypt_bytes_with_rng(message.as_bytes(), recipient_public_key, &mut OsRng)
}

/// [`encrypt_message`] with caller-supplied randomness.
///
/// # Errors
/// `InvalidPublicKey` if the key is not an ML-KEM-768 public key.
pub fn encrypt_message_with_rng<R: CryptoRngCore>(
    message: &str,
    recipient_public_key: &[u8],
    rng: &mut R,
) -> Result<EncryptedPayload, PlainsightError> {
    encrypt_bytes_with_rng(message.as_bytes(), recipient_public_key, rng)
}

/// Encrypt arbitrary bytes for the holder of `recipient_public_key`.
///
/// # Errors
/// `InvalidPublicKey` if the key is not an ML-KEM-768 public key.
pub fn encrypt_bytes_with_rng<R: CryptoRngCore>(
    plaintext: &[u8],
    recipient_public_key: &[u8],
    rng: &mut R,
) -> Result<EncryptedPayload, PlainsightError> {
    let encapsulated = kem::encapsulate_with_rng(recipient_public_key, rng)?;
    let key = cipher::derive_key(encapsulated.shared_secret.as_slice())?;
    let (iv, ciphertext) = cipher::encrypt_with_rng(plaintext, &key, rng)?;

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = ciphertext.len(),
        "encrypted message"
    );
    Ok(EncryptedPayload {
        kem_ciphertext: encapsulated.cipher_text,
        iv,
        ciphertext,
    })
}

/// Decrypt `payload` with `secret_key`, returning the raw plaintext.
///
/// # Errors
/// `InvalidSecretKey` on a malformed key, `AuthenticationFailure` if the
/// payload was not made for this key or was modified.
pub fn decrypt_bytes(
    payload: &EncryptedPayload,
    secret_key: &[u8],
) -> Result<Vec<u8>, PlainsightError> {
    let shared_secret = kem::decapsulate(&payload.kem_ciphertext, secret_key)?;
    let key = cipher::derive_key(shared_secret.as_slice())?;
    cipher::decrypt(&payload.ciphertext, &payload.iv, &key)
}

/// Decrypt `payload` with `secret_key`, returning the message text.
///
/// # Errors
/// As [`decrypt_bytes`], plus `InvalidUtf8` if the authenticated plaintext
/// is not UTF-8.
pub fn decrypt_message(
    payload: &EncryptedPayload,
    secret_key: &[u8],
) -> Result<String, PlainsightError> {
    let plaintext = decrypt_bytes(payload, secret_key)?;
    String::from_utf8(plaintext).map_err(|_| PlainsightError::InvalidUtf8)
}
