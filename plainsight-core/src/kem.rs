//! Key exchange — ML-KEM-768 (FIPS 203) key encapsulation.
//!
//! Key pairs are long-lived identities; each message gets a fresh
//! encapsulation. Randomness is passed in as a [`CryptoRngCore`] so tests
//! can pin it; the convenience functions draw from `OsRng`.
//!
//! Decapsulating a well-formed ciphertext that was made for a different key
//! does NOT fail: ML-KEM's implicit rejection returns a deterministic but
//! unrelated secret, and the AES-GCM tag check downstream catches it.

use kem::{Decapsulate, Encapsulate};
use ml_kem::array::Array;
use ml_kem::kem::{DecapsulationKey, EncapsulationKey};
use ml_kem::{EncodedSizeUser, KemCore, MlKem768, MlKem768Params};
use rand_core::{CryptoRngCore, OsRng};
use zeroize::Zeroizing;

use crate::constants::{
    KEM_CIPHERTEXT_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH, SHARED_SECRET_LENGTH,
};
use crate::errors::PlainsightError;

/// 32-byte KEM shared secret, zeroized on drop.
pub type SharedSecret = Zeroizing<[u8; SHARED_SECRET_LENGTH]>;

/// ML-KEM-768 key pair.
///
/// 1184-byte public (encapsulation) key and 2400-byte secret
/// (decapsulation) key. Both are immutable once built; the secret is
/// zeroized on drop.
#[derive(Clone)]
pub struct KeyPair {
    public_key: Vec<u8>,
    secret_key: Zeroizing<Vec<u8>>,
}

impl KeyPair {
    /// Rebuild a key pair from stored bytes.
    ///
    /// # Errors
    /// `InvalidPublicKey` / `InvalidSecretKey` if either length is wrong.
    pub fn from_bytes(public_key: Vec<u8>, secret_key: Vec<u8>) -> Result<Self, PlainsightError> {
        let secret_key = Zeroizing::new(secret_key);
        check_public_key(&public_key)?;
        check_secret_key(&secret_key)?;
        Ok(Self {
            public_key,
            secret_key,
        })
    }

    /// Encapsulation key bytes. Safe to share.
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Decapsulation key bytes.
    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.public_key == other.public_key && *self.secret_key == *other.secret_key
    }
}

impl Eq for KeyPair {}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key_len", &self.public_key.len())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Result of encapsulating against a public key.
pub struct EncapsulationResult {
    /// KEM ciphertext, always exactly 1088 bytes.
    pub cipher_text: [u8; KEM_CIPHERTEXT_LENGTH],
    /// Shared secret the recipient will recover by decapsulating.
    pub shared_secret: SharedSecret,
}

/// Generate a fresh ML-KEM-768 key pair from the OS CSPRNG.
pub fn generate_keypair() -> KeyPair {
    generate_keypair_with_rng(&mut OsRng)
}

/// Generate an ML-KEM-768 key pair from the supplied CSPRNG.
pub fn generate_keypair_with_rng<R: CryptoRngCore>(rng: &mut R) -> KeyPair {
    let (dk, ek) = MlKem768::generate(rng);
    tracing::debug!("generated ML-KEM-768 key pair");
    KeyPair {
        public_key: ek.as_bytes().to_vec(),
        secret_key: Zeroizing::new(dk.as_bytes().to_vec()),
    }
}

/// Encapsulate a fresh shared secret for `public_key` using the OS CSPRNG.
///
/// # Errors
/// `InvalidPublicKey` if `public_key` is not 1184 bytes.
pub fn encapsulate(public_key: &[u8]) -> Result<EncapsulationResult, PlainsightError> {
    encapsulate_with_rng(public_key, &mut OsRng)
}

/// Encapsulate a fresh shared secret for `public_key` using `rng`.
///
/// # Errors
/// `InvalidPublicKey` if `public_key` is not 1184 bytes.
pub fn encapsulate_with_rng<R: CryptoRngCore>(
    public_key: &[u8],
    rng: &mut R,
) -> Result<EncapsulationResult, PlainsightError> {
    check_public_key(public_key)?;
    let encoded = Array::try_from(public_key).map_err(|_| PlainsightError::InvalidPublicKey {
        expected: PUBLIC_KEY_LENGTH,
        actual: public_key.len(),
    })?;
    let ek = EncapsulationKey::<MlKem768Params>::from_bytes(&encoded);

    let (ct, ss) = ek
        .encapsulate(rng)
        .map_err(|_| PlainsightError::Encryption("ML-KEM encapsulation failed".into()))?;

    let mut cipher_text = [0u8; KEM_CIPHERTEXT_LENGTH];
    cipher_text.copy_from_slice(ct.as_slice());
    let mut shared_secret = Zeroizing::new([0u8; SHARED_SECRET_LENGTH]);
    shared_secret.copy_from_slice(ss.as_slice());

    Ok(EncapsulationResult {
        cipher_text,
        shared_secret,
    })
}

/// Recover the shared secret from `cipher_text` with `secret_key`.
///
/// # Errors
/// `InvalidCiphertext` if `cipher_text` is not 1088 bytes,
/// `InvalidSecretKey` if `secret_key` is not 2400 bytes.
pub fn decapsulate(cipher_text: &[u8], secret_key: &[u8]) -> Result<SharedSecret, PlainsightError> {
    if cipher_text.len() != KEM_CIPHERTEXT_LENGTH {
        return Err(PlainsightError::InvalidCiphertext {
            expected: KEM_CIPHERTEXT_LENGTH,
            actual: cipher_text.len(),
        });
    }
    check_secret_key(secret_key)?;

    let encoded_dk = Array::try_from(secret_key).map_err(|_| PlainsightError::InvalidSecretKey {
        expected: SECRET_KEY_LENGTH,
        actual: secret_key.len(),
    })?;
    let dk = DecapsulationKey::<MlKem768Params>::from_bytes(&encoded_dk);
    let ct = Array::try_from(cipher_text).map_err(|_| PlainsightError::InvalidCiphertext {
        expected: KEM_CIPHERTEXT_LENGTH,
        actual: cipher_text.len(),
    })?;

    let ss = dk
        .decapsulate(&ct)
        .map_err(|_| PlainsightError::Encryption("ML-KEM decapsulation failed".into()))?;

    let mut shared_secret = Zeroizing::new([0u8; SHARED_SECRET_LENGTH]);
    shared_secret.copy_from_slice(ss.as_slice());
    Ok(shared_secret)
}

fn check_public_key(public_key: &[u8]) -> Result<(), PlainsightError> {
    if public_key.len() != PUBLIC_KEY_LENGTH {
        return Err(PlainsightError::InvalidPublicKey {
            expected: PUBLIC_KEY_LENGTH,
            actual: public_key.len(),
        });
    }
    Ok(())
}

fn check_secret_key(secret_key: &[u8]) -> Result<(), PlainsightError> {
    if secret_key.len() != SECRET_KEY_LENGTH {
        return Err(PlainsightError::InvalidSecretKey {
            expected: SECRET_KEY_LENGTH,
            actual: secret_key.len(),
        });
    }
    Ok(())
}
