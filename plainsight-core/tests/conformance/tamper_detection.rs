//! Conformance: Tamper Detection
//!
//! Any change to the KEM ciphertext, IV, ciphertext or tag of a concealed
//! envelope MUST fail with AUTHENTICATION_FAILURE. No partial plaintext is
//! ever returned.

use plainsight_core::constants::{ENVELOPE_HEADER_LENGTH, IV_OFFSET};
use plainsight_core::envelope::{deserialize, serialize};
use plainsight_core::{decrypt_message, encrypt_message, generate_keypair, PlainsightError};

fn assert_rejected(bytes: &[u8], secret_key: &[u8], what: &str) {
    let payload = deserialize(bytes).unwrap();
    match decrypt_message(&payload, secret_key) {
        Err(PlainsightError::AuthenticationFailure) => {}
        other => panic!("{what}: expected AuthenticationFailure, got {other:?}"),
    }
}

#[test]
fn conformance_tamper_each_region() {
    let bob = generate_keypair();
    let payload = encrypt_message("tamper me", bob.public_key()).unwrap();
    let clean = serialize(&payload).unwrap();
    let last = clean.len() - 1;

    let positions = [
        (0, "kem ciphertext first byte"),
        (IV_OFFSET - 1, "kem ciphertext last byte"),
        (IV_OFFSET, "iv first byte"),
        (IV_OFFSET + 11, "iv last byte"),
        (ENVELOPE_HEADER_LENGTH, "ciphertext first byte"),
        (last, "tag last byte"),
    ];
    for (pos, what) in positions {
        let mut bytes = clean.clone();
        bytes[pos] ^= 0x01;
        assert_rejected(&bytes, bob.secret_key(), what);
    }
}

#[test]
fn conformance_tamper_every_ciphertext_bit() {
    let bob = generate_keypair();
    let payload = encrypt_message("ab", bob.public_key()).unwrap();
    let clean = serialize(&payload).unwrap();

    for pos in ENVELOPE_HEADER_LENGTH..clean.len() {
        for bit in 0..8 {
            let mut bytes = clean.clone();
            bytes[pos] ^= 1 << bit;
            assert_rejected(&bytes, bob.secret_key(), &format!("byte {pos} bit {bit}"));
        }
    }
}

#[test]
fn conformance_tamper_truncated_tag() {
    let bob = generate_keypair();
    let mut payload = encrypt_message("short tag", bob.public_key()).unwrap();
    payload.ciphertext.truncate(payload.ciphertext.len() - 1);
    let bytes = serialize(&payload).unwrap();
    assert_rejected(&bytes, bob.secret_key(), "truncated tag");
}

#[test]
fn conformance_tamper_wrong_recipient() {
    let bob = generate_keypair();
    let eve = generate_keypair();
    let bytes = serialize(&encrypt_message("private", bob.public_key()).unwrap()).unwrap();
    assert_rejected(&bytes, eve.secret_key(), "wrong recipient");
}
