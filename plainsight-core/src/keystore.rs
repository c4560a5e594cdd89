//! Key persistence for the local identity key pair.
//!
//! The stored value is JSON with standard padded base64 fields:
//!
//! ```json
//! { "publicKey": "<base64>", "secretKey": "<base64>" }
//! ```
//!
//! `load` never fails: a missing, malformed, undecodable or wrong-length
//! record reads as "no key pair", so callers handle every unusable state the
//! same way.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::constants::KEY_STORAGE_KEY;
use crate::encoding::{from_base64, to_base64};
use crate::errors::PlainsightError;
use crate::kem::KeyPair;

/// Persistence backend for the local identity key pair.
pub trait KeyStore {
    /// Store `key_pair`, replacing any previous one.
    ///
    /// # Errors
    /// `PlainsightError::KeyStore` if the backend cannot be written.
    fn save(&mut self, key_pair: &KeyPair) -> Result<(), PlainsightError>;

    /// The stored key pair, or `None` if absent or unusable.
    fn load(&self) -> Option<KeyPair>;

    /// Remove the stored key pair. Clearing an empty store is not an error.
    ///
    /// # Errors
    /// `PlainsightError::KeyStore` if the backend cannot be written.
    fn clear(&mut self) -> Result<(), PlainsightError>;

    /// Whether a record exists under the storage key, usable or not.
    fn has(&self) -> bool;
}

/// JSON shape of a persisted key pair.
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct StoredKeyPair {
    pub public_key: String,
    pub secret_key: String,
}

impl StoredKeyPair {
    pub fn from_key_pair(key_pair: &KeyPair) -> Self {
        Self {
            public_key: to_base64(key_pair.public_key()),
            secret_key: to_base64(key_pair.secret_key()),
        }
    }

    /// Decode back into a key pair.
    ///
    /// # Errors
    /// `Encoding` on bad base64, `InvalidPublicKey`/`InvalidSecretKey` on
    /// wrong lengths.
    pub fn to_key_pair(&self) -> Result<KeyPair, PlainsightError> {
        KeyPair::from_bytes(from_base64(&self.public_key)?, from_base64(&self.secret_key)?)
    }
}

/// Serialize `key_pair` to the stored JSON form.
///
/// # Errors
/// `PlainsightError::Encoding` if JSON serialization fails.
pub fn encode_key_pair(key_pair: &KeyPair) -> Result<String, PlainsightError> {
    serde_json::to_string(&StoredKeyPair::from_key_pair(key_pair))
        .map_err(|e| PlainsightError::Encoding(format!("key pair JSON: {e}")))
}

/// Parse the stored JSON form. Any failure reads as `None`.
pub fn decode_key_pair(stored: &str) -> Option<KeyPair> {
    let parsed = serde_json::from_str::<StoredKeyPair>(stored)
        .map_err(|e| PlainsightError::Encoding(format!("key pair JSON: {e}")))
        .and_then(|record| record.to_key_pair());
    match parsed {
        Ok(key_pair) => Some(key_pair),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unusable stored key pair");
            None
        }
    }
}

/// In-process store, keyed like browser local storage.
#[derive(Default)]
pub struct MemoryKeyStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw value under the storage key, bypassing validation.
    pub fn insert_raw(&mut self, value: impl Into<String>) {
        self.entries.insert(KEY_STORAGE_KEY.to_string(), value.into());
    }
}

impl KeyStore for MemoryKeyStore {
    fn save(&mut self, key_pair: &KeyPair) -> Result<(), PlainsightError> {
        let json = encode_key_pair(key_pair)?;
        self.entries.insert(KEY_STORAGE_KEY.to_string(), json);
        Ok(())
    }

    fn load(&self) -> Option<KeyPair> {
        self.entries
            .get(KEY_STORAGE_KEY)
            .and_then(|stored| decode_key_pair(stored))
    }

    fn clear(&mut self) -> Result<(), PlainsightError> {
        if let Some(mut stored) = self.entries.remove(KEY_STORAGE_KEY) {
            stored.zeroize();
        }
        Ok(())
    }

    fn has(&self) -> bool {
        self.entries.contains_key(KEY_STORAGE_KEY)
    }
}

/// Store backed by `<dir>/pq-stego-keypair.json`.
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    /// Store inside `dir`. The directory is created on first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{KEY_STORAGE_KEY}.json")),
        }
    }

    /// Location of the key file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl KeyStore for FileKeyStore {
    fn save(&mut self, key_pair: &KeyPair) -> Result<(), PlainsightError> {
        let io_err = |e: std::io::Error| {
            PlainsightError::KeyStore(format!("{}: {e}", self.path.display()))
        };
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        let mut json = encode_key_pair(key_pair)?;
        let written = write_private(&self.path, json.as_bytes()).map_err(io_err);
        json.zeroize();
        written?;

        tracing::debug!(path = %self.path.display(), "saved key pair");
        Ok(())
    }

    fn load(&self) -> Option<KeyPair> {
        let mut stored = match fs::read_to_string(&self.path) {
            Ok(stored) => stored,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "cannot read key file");
                return None;
            }
        };
        let key_pair = decode_key_pair(&stored);
        stored.zeroize();
        key_pair
    }

    fn clear(&mut self) -> Result<(), PlainsightError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PlainsightError::KeyStore(format!(
                "{}: {e}",
                self.path.display()
            ))),
        }
    }

    fn has(&self) -> bool {
        self.path.is_file()
    }
}

/// Write `contents` so that only the owner can read it (0600 on Unix).
fn write_private(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::io::Write;

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
