//! Protocol constants — sizes and labels that define the wire contract.
//!
//! Every value here is part of the interoperability surface: the envelope
//! offsets, the HKDF salt and info label, and the stego header width MUST
//! match byte-for-byte between implementations. None of them are tunable.

/// ML-KEM-768 encapsulation (public) key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 1184;

/// ML-KEM-768 decapsulation (secret) key length in bytes.
pub const SECRET_KEY_LENGTH: usize = 2400;

/// ML-KEM-768 ciphertext length in bytes.
pub const KEM_CIPHERTEXT_LENGTH: usize = 1088;

/// ML-KEM shared secret length in bytes.
pub const SHARED_SECRET_LENGTH: usize = 32;

/// AES-256-GCM key length in bytes.
pub const SYMMETRIC_KEY_LENGTH: usize = 32;

/// AES-GCM nonce (IV) length in bytes.
pub const NONCE_LENGTH: usize = 12;

/// AES-GCM authentication tag length in bytes (appended to ciphertext).
pub const TAG_LENGTH: usize = 16;

/// HKDF-SHA256 salt. All zeros: derived-key secrecy rests on the shared
/// secret alone.
pub const HKDF_SALT: [u8; 32] = [0u8; 32];

/// HKDF-SHA256 info label for the AES key.
pub const HKDF_INFO: &[u8] = b"plainsight-aes-key";

/// Width of the big-endian ciphertext length field in the envelope.
pub const CIPHERTEXT_LENGTH_FIELD: usize = 4;

/// Envelope offset of the IV.
pub const IV_OFFSET: usize = KEM_CIPHERTEXT_LENGTH;

/// Envelope offset of the ciphertext length field.
pub const CIPHERTEXT_LENGTH_OFFSET: usize = IV_OFFSET + NONCE_LENGTH;

/// Fixed envelope prefix (KEM ciphertext + IV + length field): 1104 bytes.
pub const ENVELOPE_HEADER_LENGTH: usize = CIPHERTEXT_LENGTH_OFFSET + CIPHERTEXT_LENGTH_FIELD;

/// Big-endian length header written ahead of the stego payload.
pub const STEGO_LENGTH_HEADER: usize = 4;

/// Interleaved RGBA channels per pixel.
pub const CHANNELS_PER_PIXEL: usize = 4;

/// Channels per pixel that carry payload bits (alpha excluded).
pub const PAYLOAD_CHANNELS_PER_PIXEL: usize = 3;

/// Fixed key under which the key pair is persisted.
pub const KEY_STORAGE_KEY: &str = "pq-stego-keypair";
