//! Crypto error types.

use thiserror::Error;

/// Errors from the key-derivation primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Requested derived-key length exceeds the PBKDF2 allocation cap.
    #[error("requested key length {requested} exceeds maximum {max}")]
    KeyLengthTooLarge {
        /// Requested output length in bytes.
        requested: usize,
        /// Maximum supported output length in bytes.
        max: usize,
    },

    /// Input string is not valid hexadecimal.
    #[error("invalid hex input: {0}")]
    InvalidHex(String),
}
