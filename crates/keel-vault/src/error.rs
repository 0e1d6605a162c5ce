//! Vault error types.

use keel_crypto::CryptoError;
use thiserror::Error;

/// Errors from mnemonic handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MnemonicError {
    /// Entropy length is not a supported BIP-39 size (16–32 bytes in 4-byte steps).
    #[error("invalid entropy length: {0} bytes")]
    InvalidEntropyLength(usize),

    /// Phrase failed word-list, word-count, or checksum validation.
    #[error("invalid mnemonic: {0}")]
    InvalidPhrase(String),

    /// Account index collides with the hardened-index range.
    #[error("invalid account index: {0}")]
    InvalidAccountIndex(u32),
}

/// Errors from hierarchical-deterministic key derivation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyDerivationError {
    /// Master seed must be exactly 64 bytes.
    #[error("invalid seed length: {0} bytes, expected 64")]
    InvalidSeedLength(usize),

    /// Path segment does not parse as `m / index ['] ...`.
    #[error("invalid path segment: {0:?}")]
    InvalidPathSegment(String),

    /// Raw child index collides with the hardened-index bit.
    #[error("child index out of range: {0}")]
    IndexOverflow(u32),

    /// Derived scalar fell outside the curve order (statistically negligible).
    #[error("derived child key is unusable")]
    UnusableChildKey,
}

/// Errors from account bookkeeping.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// No account matches the lookup.
    #[error("account not found: {0}")]
    NotFound(String),

    /// An account with the same public key already exists.
    #[error("account must be unique")]
    MustBeUnique,

    /// Selection index past the end of the account list.
    #[error("account index out of range: {index} >= {len}")]
    IndexOutOfRange {
        /// Requested position.
        index: usize,
        /// Number of accounts.
        len: usize,
    },

    /// The operation needs raw private key material a hardware device never exposes.
    #[error("hardware account does not support this operation: {0}")]
    HardwareUnsupported(String),
}

/// Errors from the vault/guard state machine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VaultError {
    /// No vault blob exists yet; run setup first.
    #[error("vault is not configured")]
    NotConfigured,

    /// A vault blob already exists; reset before setting up again.
    #[error("vault is already configured")]
    AlreadyConfigured,

    /// Secret material requested while the vault is locked.
    #[error("vault is locked")]
    Locked,

    /// Password failed the blob's authentication check.
    #[error("incorrect password")]
    IncorrectPassword,

    /// Persisted blob is malformed or from an unsupported version.
    #[error("corrupted vault blob: {0}")]
    CorruptedBlob(String),

    /// Storage collaborator failure.
    #[error("storage: {0}")]
    Storage(String),

    /// Blob envelope (de)serialization failure.
    #[error("serialization: {0}")]
    Serialization(String),

    /// Cipher-level failure other than authentication.
    #[error("encryption: {0}")]
    Encryption(String),

    /// Key-derivation primitive failure.
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    /// Mnemonic failure.
    #[error(transparent)]
    Mnemonic(#[from] MnemonicError),

    /// HD derivation failure.
    #[error(transparent)]
    KeyDerivation(#[from] KeyDerivationError),

    /// Account bookkeeping failure.
    #[error(transparent)]
    Account(#[from] AccountError),
}
