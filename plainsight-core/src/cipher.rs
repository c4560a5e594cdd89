//! Symmetric layer — HKDF-SHA256 key derivation + AES-256-GCM.
//!
//! ```text
//! key        = HKDF-SHA256(salt = 0^32, ikm = shared_secret, info = "plainsight-aes-key", L = 32)
//! ciphertext = AES-256-GCM(key, iv, plaintext) || tag(16)
//! ```
//!
//! The zero salt and info label are wire constants (see [`crate::constants`]).
//! A fresh 12-byte IV is sampled for every call; there is no counter.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use hkdf::Hkdf;
use rand_core::{CryptoRngCore, OsRng};
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::{HKDF_INFO, HKDF_SALT, NONCE_LENGTH, SYMMETRIC_KEY_LENGTH};
use crate::errors::PlainsightError;

/// 256-bit AES-GCM key derived from a KEM shared secret. Zeroized on drop.
pub struct SymmetricKey(Zeroizing<[u8; SYMMETRIC_KEY_LENGTH]>);

impl SymmetricKey {
    fn cipher(&self) -> Aes256Gcm {
        Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(self.0.as_slice()))
    }

    #[cfg(test)]
    fn as_bytes(&self) -> &[u8; SYMMETRIC_KEY_LENGTH] {
        &self.0
    }
}

impl std::fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SymmetricKey(<redacted>)")
    }
}

/// Derive the AES-256 key from a KEM shared secret.
///
/// # Errors
/// `PlainsightError::Encryption` if HKDF refuses the output length
/// (cannot happen for 32 bytes).
pub fn derive_key(shared_secret: &[u8]) -> Result<SymmetricKey, PlainsightError> {
    let hk = Hkdf::<Sha256>::new(Some(&HKDF_SALT), shared_secret);
    let mut okm = Zeroizing::new([0u8; SYMMETRIC_KEY_LENGTH]);
    hk.expand(HKDF_INFO, okm.as_mut_slice())
        .map_err(|_| PlainsightError::Encryption("HKDF expand failed".into()))?;
    Ok(SymmetricKey(okm))
}

/// Encrypt with a fresh IV from the OS CSPRNG.
///
/// Returns `(iv, ciphertext || tag)`.
///
/// # Errors
/// `PlainsightError::Encryption` if AES-GCM rejects the input length.
pub fn encrypt(
    plaintext: &[u8],
    key: &SymmetricKey,
) -> Result<([u8; NONCE_LENGTH], Vec<u8>), PlainsightError> {
    encrypt_with_rng(plaintext, key, &mut OsRng)
}

/// Encrypt with a fresh IV sampled from `rng`.
///
/// # Errors
/// `PlainsightError::Encryption` if AES-GCM rejects the input length.
pub fn encrypt_with_rng<R: CryptoRngCore>(
    plaintext: &[u8],
    key: &SymmetricKey,
    rng: &mut R,
) -> Result<([u8; NONCE_LENGTH], Vec<u8>), PlainsightError> {
    let mut iv = [0u8; NONCE_LENGTH];
    rng.fill_bytes(&mut iv);

    let ciphertext = key
        .cipher()
        .encrypt(Nonce::from_slice(&iv), plaintext)
        .map_err(|_| PlainsightError::Encryption("AES-GCM encryption failed".into()))?;

    tracing::trace!(plaintext_len = plaintext.len(), "sealed AES-GCM payload");
    Ok((iv, ciphertext))
}

/// Verify the tag and decrypt.
///
/// # Errors
/// `PlainsightError::AuthenticationFailure` on any tag mismatch. No
/// partial plaintext is released.
pub fn decrypt(
    ciphertext: &[u8],
    iv: &[u8; NONCE_LENGTH],
    key: &SymmetricKey,
) -> Result<Vec<u8>, PlainsightError> {
    key.cipher()
        .decrypt(Nonce::from_slice(iv), ciphertext)
        .map_err(|_| {
            tracing::warn!(
                ciphertext_len = ciphertext.len(),
                "AES-GCM authentication failed"
            );
            PlainsightError::AuthenticationFailure
        })
}
