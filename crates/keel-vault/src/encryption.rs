//! AES-256-GCM vault blob sealing.
//!
//! The blob carries its own KDF parameters (salt, iteration count, digest)
//! next to the nonce and ciphertext, versioned so sealed vaults survive
//! future changes to the defaults.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use keel_crypto::{kdf, Digest};

use crate::config::{VaultConfig, VAULT_BLOB_VERSION};
use crate::error::VaultError;

/// Salt length in bytes.
pub const SALT_LEN: usize = 32;

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// AES-256 key length in bytes.
const KEY_LEN: usize = 32;

/// PBKDF2 parameters a blob was sealed with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    /// Random per-vault salt.
    pub salt: Vec<u8>,
    /// Iteration count.
    pub iterations: u32,
    /// Hash driving the HMAC.
    pub digest: Digest,
}

/// The encrypted, persisted representation of the vault secrets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultBlob {
    /// Blob format version.
    pub version: u32,
    /// Parameters for re-deriving the encryption key.
    pub kdf: KdfParams,
    /// AES-GCM nonce.
    pub nonce: Vec<u8>,
    /// Ciphertext plus authentication tag.
    pub ciphertext: Vec<u8>,
}

impl VaultBlob {
    /// Serialize for the storage collaborator.
    pub fn to_bytes(&self) -> Result<Vec<u8>, VaultError> {
        serde_json::to_vec(self).map_err(|e| VaultError::Serialization(e.to_string()))
    }

    /// Parse a blob previously produced by [`to_bytes`](Self::to_bytes).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, VaultError> {
        serde_json::from_slice(bytes).map_err(|e| VaultError::CorruptedBlob(e.to_string()))
    }
}

/// Encrypt `plaintext` under a password with a fresh salt and nonce.
pub fn seal(
    plaintext: &[u8],
    password: &str,
    config: &VaultConfig,
) -> Result<VaultBlob, VaultError> {
    let mut salt = vec![0u8; SALT_LEN];
    let mut nonce_bytes = vec![0u8; NONCE_LEN];
    rand::rngs::OsRng.fill_bytes(&mut salt);
    rand::rngs::OsRng.fill_bytes(&mut nonce_bytes);

    let key = kdf::derive(
        password.as_bytes(),
        &salt,
        config.iterations,
        KEY_LEN,
        config.digest,
    )?;
    let cipher =
        Aes256Gcm::new_from_slice(&key).map_err(|e| VaultError::Encryption(e.to_string()))?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| VaultError::Encryption(e.to_string()))?;

    Ok(VaultBlob {
        version: VAULT_BLOB_VERSION,
        kdf: KdfParams {
            salt,
            iterations: config.iterations,
            digest: config.digest,
        },
        nonce: nonce_bytes,
        ciphertext,
    })
}

/// Decrypt a blob with the password it was sealed under.
///
/// The key is re-derived from the blob's own KDF parameters. A failed
/// authentication check (wrong password or tampered ciphertext) returns
/// [`VaultError::IncorrectPassword`].
pub fn open(blob: &VaultBlob, password: &str) -> Result<Vec<u8>, VaultError> {
    if blob.version != VAULT_BLOB_VERSION {
        return Err(VaultError::CorruptedBlob(format!(
            "unsupported blob version: {}",
            blob.version
        )));
    }
    if blob.nonce.len() != NONCE_LEN {
        return Err(VaultError::CorruptedBlob(format!(
            "bad nonce length: {}",
            blob.nonce.len()
        )));
    }

    let key = kdf::derive(
        password.as_bytes(),
        &blob.kdf.salt,
        blob.kdf.iterations,
        KEY_LEN,
        blob.kdf.digest,
    )?;
    let cipher =
        Aes256Gcm::new_from_slice(&key).map_err(|e| VaultError::Encryption(e.to_string()))?;
    let nonce = Nonce::from_slice(&blob.nonce);

    cipher
        .decrypt(nonce, blob.ciphertext.as_ref())
        .map_err(|_| VaultError::IncorrectPassword)
}
