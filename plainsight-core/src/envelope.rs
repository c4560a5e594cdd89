//! Binary envelope — fixed-offset framing of one encrypted message.
//!
//! ```text
//! offset  length  field
//! 0       1088    ML-KEM-768 ciphertext
//! 1088    12      AES-GCM IV
//! 1100    4       ciphertext length (u32, big-endian)
//! 1104    N       AES-GCM ciphertext || tag
//! ```
//!
//! There is no version tag. The 1088/12 widths are tied to ML-KEM-768 and
//! AES-GCM; changing either algorithm needs a new, versioned format, and a
//! reader of this format cannot tell the difference.

use crate::constants::{
    CIPHERTEXT_LENGTH_OFFSET, ENVELOPE_HEADER_LENGTH, IV_OFFSET, KEM_CIPHERTEXT_LENGTH,
    NONCE_LENGTH,
};
use crate::errors::PlainsightError;

/// One hybrid-encrypted message, ready to be framed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedPayload {
    /// ML-KEM-768 ciphertext.
    pub kem_ciphertext: [u8; KEM_CIPHERTEXT_LENGTH],
    /// AES-GCM IV.
    pub iv: [u8; NONCE_LENGTH],
    /// AES-GCM ciphertext with the 16-byte tag appended.
    pub ciphertext: Vec<u8>,
}

impl EncryptedPayload {
    /// Length of the serialized envelope.
    pub fn serialized_len(&self) -> usize {
        ENVELOPE_HEADER_LENGTH + self.ciphertext.len()
    }
}

/// Frame `payload` into envelope bytes.
///
/// # Errors
/// `PayloadTooLarge` if the ciphertext length does not fit the u32 field.
pub fn serialize(payload: &EncryptedPayload) -> Result<Vec<u8>, PlainsightError> {
    let len = u32::try_from(payload.ciphertext.len()).map_err(|_| {
        PlainsightError::PayloadTooLarge {
            size: payload.ciphertext.len(),
            capacity: i64::from(u32::MAX),
        }
    })?;

    let mut out = Vec::with_capacity(payload.serialized_len());
    out.extend_from_slice(&payload.kem_ciphertext);
    out.extend_from_slice(&payload.iv);
    out.extend_from_slice(&len.to_be_bytes());
    out.extend_from_slice(&payload.ciphertext);
    Ok(out)
}

/// Parse envelope bytes.
///
/// Bytes past the declared ciphertext are ignored.
///
/// # Errors
/// `TruncatedEnvelope` if `bytes` is shorter than the 1104-byte header or
/// than the header plus the declared ciphertext length.
pub fn deserialize(bytes: &[u8]) -> Result<EncryptedPayload, PlainsightError> {
    if bytes.len() < ENVELOPE_HEADER_LENGTH {
        return Err(PlainsightError::TruncatedEnvelope {
            needed: ENVELOPE_HEADER_LENGTH,
            actual: bytes.len(),
        });
    }

    let mut len_field = [0u8; 4];
    len_field.copy_from_slice(&bytes[CIPHERTEXT_LENGTH_OFFSET..ENVELOPE_HEADER_LENGTH]);
    let declared = u32::from_be_bytes(len_field) as usize;

    let end = ENVELOPE_HEADER_LENGTH.saturating_add(declared);
    if bytes.len() < end {
        return Err(PlainsightError::TruncatedEnvelope {
            needed: end,
            actual: bytes.len(),
        });
    }

    let mut kem_ciphertext = [0u8; KEM_CIPHERTEXT_LENGTH];
    kem_ciphertext.copy_from_slice(&bytes[..IV_OFFSET]);
    let mut iv = [0u8; NONCE_LENGTH];
    iv.copy_from_slice(&bytes[IV_OFFSET..CIPHERTEXT_LENGTH_OFFSET]);

    Ok(EncryptedPayload {
        kem_ciphertext,
        iv,
        ciphertext: bytes[ENVELOPE_HEADER_LENGTH..end].to_vec(),
    })
}
