//! The 64-byte master seed.

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// A 64-byte BIP-39 master seed.
///
/// Root of every derived account key. Secret material is zeroized on drop
/// to prevent leaking key material in freed memory.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Seed {
    bytes: [u8; 64],
}

impl Seed {
    /// Create a seed from raw bytes.
    pub fn from_bytes(bytes: [u8; 64]) -> Self {
        Self { bytes }
    }

    /// Get the raw seed bytes. Handle with care.
    pub fn as_bytes(&self) -> &[u8; 64] {
        &self.bytes
    }
}

impl Clone for Seed {
    fn clone(&self) -> Self {
        Self { bytes: self.bytes }
    }
}

impl PartialEq for Seed {
    fn eq(&self, other: &Self) -> bool {
        self.bytes == other.bytes
    }
}

impl Eq for Seed {}

impl fmt::Debug for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Seed").field("bytes", &"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_bytes_roundtrip() {
        let bytes = [42u8; 64];
        let seed = Seed::from_bytes(bytes);
        assert_eq!(seed.as_bytes(), &bytes);
    }

    #[test]
    fn debug_hides_bytes() {
        let seed = Seed::from_bytes([0xAB; 64]);
        let debug = format!("{seed:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains("ab"));
        assert!(!debug.contains("171"));
    }

    #[test]
    fn clone_preserves_bytes() {
        let seed = Seed::from_bytes([7u8; 64]);
        let cloned = seed.clone();
        assert_eq!(seed, cloned);
    }
}
