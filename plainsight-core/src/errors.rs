//! Error types for plainsight-core.
//!
//! One enum covers the crypto pipeline, the envelope codec, the stego codec
//! and the collaborator boundaries (key store, image I/O). Every variant has
//! a stable machine-readable code for presentation layers.

/// Unified error type for all plainsight-core operations.
#[derive(Debug, thiserror::Error)]
pub enum PlainsightError {
    /// Public key is not an ML-KEM-768 encapsulation key.
    #[error("Invalid public key: expected {expected} bytes, got {actual}")]
    InvalidPublicKey { expected: usize, actual: usize },

    /// Secret key is not an ML-KEM-768 decapsulation key.
    #[error("Invalid secret key: expected {expected} bytes, got {actual}")]
    InvalidSecretKey { expected: usize, actual: usize },

    /// KEM ciphertext has the wrong length.
    #[error("Invalid ciphertext: expected {expected} bytes, got {actual}")]
    InvalidCiphertext { expected: usize, actual: usize },

    /// AES-GCM tag check failed: tampered data, wrong key or wrong nonce.
    #[error("Authentication failed: message was tampered with or key is wrong")]
    AuthenticationFailure,

    /// Symmetric encryption or key derivation could not run.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Envelope bytes end before the declared fields do.
    #[error("Truncated envelope: need {needed} bytes, got {actual}")]
    TruncatedEnvelope { needed: usize, actual: usize },

    /// Data does not fit the carrier (or a length field).
    #[error("Data too large: {size} bytes, capacity: {capacity} bytes")]
    PayloadTooLarge { size: usize, capacity: i64 },

    /// Carrier length header is zero or exceeds what the carrier can hold.
    #[error("No hidden data found or data corrupted")]
    NoHiddenData,

    /// Pixel buffer length is not `4 * width * height`.
    #[error("Invalid pixel buffer: {width}x{height} needs {expected} bytes, got {actual}")]
    InvalidPixelBuffer {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// Decrypted bytes are not valid UTF-8 text.
    #[error("Decrypted message is not valid UTF-8")]
    InvalidUtf8,

    /// Encoding error (base64, JSON).
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Key persistence failed.
    #[error("Key store error: {0}")]
    KeyStore(String),

    /// Carrier image could not be decoded.
    #[error("Failed to load image: {0}")]
    ImageLoadFailure(String),

    /// Pixel buffer could not be encoded or written.
    #[error("Failed to render image: {0}")]
    ImageRenderFailure(String),
}

impl PlainsightError {
    /// Stable code for this error, one of [`ERROR_CODES`].
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidPublicKey { .. } => "INVALID_PUBLIC_KEY",
            Self::InvalidSecretKey { .. } => "INVALID_SECRET_KEY",
            Self::InvalidCiphertext { .. } => "INVALID_CIPHERTEXT",
            Self::AuthenticationFailure => "AUTHENTICATION_FAILURE",
            Self::Encryption(_) => "ENCRYPTION_FAILED",
            Self::TruncatedEnvelope { .. } => "TRUNCATED_ENVELOPE",
            Self::PayloadTooLarge { .. } => "PAYLOAD_TOO_LARGE",
            Self::NoHiddenData => "NO_HIDDEN_DATA",
            Self::InvalidPixelBuffer { .. } => "INVALID_PIXEL_BUFFER",
            Self::InvalidUtf8 => "INVALID_UTF8",
            Self::Encoding(_) => "ENCODING_FAILED",
            Self::KeyStore(_) => "KEY_STORE_FAILED",
            Self::ImageLoadFailure(_) => "IMAGE_LOAD_FAILURE",
            Self::ImageRenderFailure(_) => "IMAGE_RENDER_FAILURE",
        }
    }

    /// `true` for the key/ciphertext length family (`InvalidKeyLength`).
    pub fn is_invalid_key_length(&self) -> bool {
        matches!(
            self,
            Self::InvalidPublicKey { .. }
                | Self::InvalidSecretKey { .. }
                | Self::InvalidCiphertext { .. }
        )
    }
}

/// Canonical error code registry, in declaration order of [`PlainsightError`].
pub const ERROR_CODES: [&str; 14] = [
    "INVALID_PUBLIC_KEY",
    "INVALID_SECRET_KEY",
    "INVALID_CIPHERTEXT",
    "AUTHENTICATION_FAILURE",
    "ENCRYPTION_FAILED",
    "TRUNCATED_ENVELOPE",
    "PAYLOAD_TOO_LARGE",
    "NO_HIDDEN_DATA",
    "INVALID_PIXEL_BUFFER",
    "INVALID_UTF8",
    "ENCODING_FAILED",
    "KEY_STORE_FAILED",
    "IMAGE_LOAD_FAILURE",
    "IMAGE_RENDER_FAILURE",
];

/// Returns `true` if the given string is a code from [`ERROR_CODES`].
pub fn is_valid_error_code(code: &str) -> bool {
    ERROR_CODES.contains(&code)
}
