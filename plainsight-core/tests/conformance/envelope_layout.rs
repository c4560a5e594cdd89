//! Conformance: Envelope Layout
//!
//! - kem_ciphertext at 0..1088, iv at 1088..1100
//! - ciphertext length at 1100..1104, u32 big-endian
//! - ciphertext || tag from 1104
//! - short input is TRUNCATED_ENVELOPE, never a panic

use plainsight_core::constants::{
    CIPHERTEXT_LENGTH_OFFSET, ENVELOPE_HEADER_LENGTH, IV_OFFSET, KEM_CIPHERTEXT_LENGTH,
    TAG_LENGTH,
};
use plainsight_core::envelope::{deserialize, serialize};
use plainsight_core::{encrypt_message, generate_keypair, PlainsightError};

#[test]
fn conformance_envelope_offsets_from_real_encryption() {
    let bob = generate_keypair();
    let payload = encrypt_message("layout check", bob.public_key()).unwrap();
    let bytes = serialize(&payload).unwrap();

    assert_eq!(bytes.len(), ENVELOPE_HEADER_LENGTH + 12 + TAG_LENGTH);
    assert_eq!(&bytes[..IV_OFFSET], &payload.kem_ciphertext[..]);
    assert_eq!(&bytes[IV_OFFSET..CIPHERTEXT_LENGTH_OFFSET], &payload.iv[..]);
    assert_eq!(
        &bytes[CIPHERTEXT_LENGTH_OFFSET..ENVELOPE_HEADER_LENGTH],
        &((12 + TAG_LENGTH) as u32).to_be_bytes()
    );
    assert_eq!(&bytes[ENVELOPE_HEADER_LENGTH..], &payload.ciphertext[..]);
}

#[test]
fn conformance_envelope_constants() {
    assert_eq!(KEM_CIPHERTEXT_LENGTH, 1088);
    assert_eq!(IV_OFFSET, 1088);
    assert_eq!(CIPHERTEXT_LENGTH_OFFSET, 1100);
    assert_eq!(ENVELOPE_HEADER_LENGTH, 1104);
}

#[test]
fn conformance_envelope_roundtrip_preserves_fields() {
    let bob = generate_keypair();
    let payload = encrypt_message("", bob.public_key()).unwrap();
    let parsed = deserialize(&serialize(&payload).unwrap()).unwrap();
    assert_eq!(parsed, payload);
    assert_eq!(parsed.ciphertext.len(), TAG_LENGTH);
}

#[test]
fn conformance_envelope_truncation_at_every_header_length() {
    let bytes = vec![0u8; ENVELOPE_HEADER_LENGTH];
    for len in [0, 1, 1087, 1088, 1099, 1100, 1103] {
        match deserialize(&bytes[..len]) {
            Err(PlainsightError::TruncatedEnvelope { needed, actual }) => {
                assert_eq!(needed, ENVELOPE_HEADER_LENGTH);
                assert_eq!(actual, len);
            }
            other => panic!("length {len}: expected TruncatedEnvelope, got {other:?}"),
        }
    }
}

#[test]
fn conformance_envelope_zero_length_ciphertext_parses() {
    // Structurally valid; rejection happens at authentication.
    let bytes = vec![0u8; ENVELOPE_HEADER_LENGTH];
    let parsed = deserialize(&bytes).unwrap();
    assert!(parsed.ciphertext.is_empty());
}

#[test]
fn conformance_envelope_declared_length_beyond_input() {
    let mut bytes = vec![0u8; ENVELOPE_HEADER_LENGTH + 10];
    bytes[CIPHERTEXT_LENGTH_OFFSET..ENVELOPE_HEADER_LENGTH].copy_from_slice(&11u32.to_be_bytes());
    let err = deserialize(&bytes).unwrap_err();
    assert_eq!(err.code(), "TRUNCATED_ENVELOPE");
}
