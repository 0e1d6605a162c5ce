//! Text-to-bytes conversion at the API boundary.
//!
//! Crypto entry points take raw byte slices; callers that start from text
//! convert here. UTF-8 and hexadecimal are the two encodings the published
//! test vectors are written in.

use crate::error::CryptoError;

/// Supported text encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// The string's UTF-8 bytes, verbatim.
    Utf8,
    /// Hexadecimal digits, two per output byte.
    Hex,
}

impl Encoding {
    /// Decode `text` into bytes.
    ///
    /// UTF-8 never fails; hex rejects odd-length or non-hex input with
    /// [`CryptoError::InvalidHex`].
    pub fn decode(&self, text: &str) -> Result<Vec<u8>, CryptoError> {
        match self {
            Self::Utf8 => Ok(text.as_bytes().to_vec()),
            Self::Hex => hex::decode(text).map_err(|e| CryptoError::InvalidHex(e.to_string())),
        }
    }
}
