//! Digest selection for PBKDF2-HMAC.

use serde::{Deserialize, Serialize};

/// Hash function driving the HMAC inside PBKDF2.
///
/// Serialized by name (lowercase) so it can travel inside persisted vault
/// parameters.
///
/// # Examples
///
/// ```
/// use keel_crypto::Digest;
/// assert_eq!(Digest::Sha256.output_len(), 32);
/// assert_eq!(Digest::Sha512.output_len(), 64);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Digest {
    /// HMAC-SHA-256, 32-byte blocks.
    Sha256,
    /// HMAC-SHA-512, 64-byte blocks.
    Sha512,
}

impl Digest {
    /// Output block length in bytes: 32 for SHA-256, 64 for SHA-512.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}
