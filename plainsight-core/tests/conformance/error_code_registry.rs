//! Conformance: Error Code Registry
//!
//! Asserts the exact code list and order, uniqueness, and that every
//! `PlainsightError` variant maps to a registered code.

use plainsight_core::errors::{is_valid_error_code, ERROR_CODES};
use plainsight_core::PlainsightError;

#[test]
fn conformance_error_registry_exact_list() {
    let expected: [&str; 14] = [
        // Key and ciphertext shape
        "INVALID_PUBLIC_KEY",
        "INVALID_SECRET_KEY",
        "INVALID_CIPHERTEXT",
        // Cryptographic
        "AUTHENTICATION_FAILURE",
        "ENCRYPTION_FAILED",
        // Envelope and stego
        "TRUNCATED_ENVELOPE",
        "PAYLOAD_TOO_LARGE",
        "NO_HIDDEN_DATA",
        "INVALID_PIXEL_BUFFER",
        "INVALID_UTF8",
        // Collaborators
        "ENCODING_FAILED",
        "KEY_STORE_FAILED",
        "IMAGE_LOAD_FAILURE",
        "IMAGE_RENDER_FAILURE",
    ];
    assert_eq!(ERROR_CODES, expected, "ERROR_CODES drifted");
}

#[test]
fn conformance_error_registry_unique() {
    let mut seen = std::collections::HashSet::new();
    for code in &ERROR_CODES {
        assert!(seen.insert(code), "duplicate error code: {code}");
    }
}

#[test]
fn conformance_error_registry_screaming_snake() {
    for code in &ERROR_CODES {
        assert!(
            code.chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_'),
            "not SCREAMING_SNAKE_CASE: {code}"
        );
    }
}

#[test]
fn conformance_every_variant_has_registered_code() {
    let variants = [
        PlainsightError::InvalidPublicKey {
            expected: 1184,
            actual: 0,
        },
        PlainsightError::InvalidSecretKey {
            expected: 2400,
            actual: 0,
        },
        PlainsightError::InvalidCiphertext {
            expected: 1088,
            actual: 0,
        },
        PlainsightError::AuthenticationFailure,
        PlainsightError::Encryption("x".into()),
        PlainsightError::TruncatedEnvelope {
            needed: 1104,
            actual: 0,
        },
        PlainsightError::PayloadTooLarge {
            size: 1,
            capacity: 0,
        },
        PlainsightError::NoHiddenData,
        PlainsightError::InvalidPixelBuffer {
            width: 1,
            height: 1,
            expected: 4,
            actual: 0,
        },
        PlainsightError::InvalidUtf8,
        PlainsightError::Encoding("x".into()),
        PlainsightError::KeyStore("x".into()),
        PlainsightError::ImageLoadFailure("x".into()),
        PlainsightError::ImageRenderFailure("x".into()),
    ];
    assert_eq!(variants.len(), ERROR_CODES.len());
    for (variant, code) in variants.iter().zip(ERROR_CODES) {
        assert_eq!(variant.code(), code);
        assert!(is_valid_error_code(variant.code()));
    }
}

#[test]
fn conformance_error_registry_digits_allowed_after_letters() {
    assert!(ERROR_CODES.contains(&"INVALID_UTF8"));
    for code in &ERROR_CODES {
        let first = code.chars().next().unwrap();
        assert!(first.is_ascii_uppercase(), "code must start with a letter: {code}");
    }
}

#[test]
fn conformance_unknown_codes_rejected() {
    assert!(!is_valid_error_code(""));
    assert!(!is_valid_error_code("invalid_public_key"));
    assert!(!is_valid_error_code("INTEGRITY_FAILED"));
}

#[test]
fn conformance_payload_too_large_message() {
    let err = PlainsightError::PayloadTooLarge {
        size: 1200,
        capacity: 1121,
    };
    assert_eq!(
        err.to_string(),
        "Data too large: 1200 bytes, capacity: 1121 bytes"
    );
}
