//! Plainsight Core — post-quantum encrypted messages hidden in images.
//!
//! A message is encrypted for a recipient's ML-KEM-768 public key, framed
//! into a fixed-layout binary envelope, and written into the least
//! significant bits of an RGBA carrier's color channels. The recipient
//! extracts the envelope and decrypts it with the matching secret key.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`constants`] | Key, nonce, tag and envelope sizes |
//! | [`errors`] | Error enum and stable error codes |
//! | [`encoding`] | Base64 |
//! | [`kem`] | ML-KEM-768 keygen, encapsulate, decapsulate |
//! | [`cipher`] | HKDF-SHA256 key derivation, AES-256-GCM |
//! | [`envelope`] | Envelope serialize / deserialize |
//! | [`crypto`] | Hybrid encrypt / decrypt of a message |
//! | [`stego`] | LSB capacity, embed, extract |
//! | [`pipeline`] | conceal / reveal |
//! | [`keystore`] | Key pair persistence |
//! | `image_io` | PNG in/out (feature `image-io`) |
//!
//! # Example
//!
//! ```
//! use plainsight_core::{conceal, generate_keypair, reveal, PixelBuffer};
//!
//! let bob = generate_keypair();
//! let mut carrier = PixelBuffer::filled(64, 64, 0x80)?;
//! conceal(&mut carrier, "meet at dawn", bob.public_key())?;
//! assert_eq!(reveal(&carrier, bob.secret_key())?, "meet at dawn");
//! # Ok::<(), plainsight_core::PlainsightError>(())
//! ```

/// Protocol constants.
pub mod constants;

/// Error types and the error code registry.
pub mod errors;

/// Encoding utilities: base64.
pub mod encoding;

/// ML-KEM-768 key encapsulation.
pub mod kem;

/// HKDF-SHA256 and AES-256-GCM.
pub mod cipher;

/// Binary envelope framing.
pub mod envelope;

/// Hybrid message encryption.
pub mod crypto;

/// LSB steganography codec.
pub mod stego;

/// End-to-end conceal / reveal.
pub mod pipeline;

/// Key pair persistence.
pub mod keystore;

/// PNG decode / encode of carriers.
/// Requires the `image-io` feature.
#[cfg(feature = "image-io")]
pub mod image_io;

pub use crypto::{decrypt_message, encrypt_message};
pub use envelope::EncryptedPayload;
pub use errors::PlainsightError;
pub use kem::{generate_keypair, KeyPair};
pub use keystore::{FileKeyStore, KeyStore, MemoryKeyStore};
pub use pipeline::{conceal, required_capacity, reveal};
pub use stego::PixelBuffer;
