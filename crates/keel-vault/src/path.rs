//! Typed BIP-32 derivation paths.
//!
//! A path is a sequence of child numbers walked from the master key, e.g.
//! `m/44'/632'/0'/0/5`. An apostrophe marks a hardened segment.

use std::fmt;
use std::str::FromStr;

use crate::error::KeyDerivationError;

/// Raw index values at or above this collide with the hardened-index bit.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

/// One segment of a derivation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChildNumber {
    /// Raw index, always below [`HARDENED_OFFSET`].
    pub index: u32,
    /// Whether the segment derives through the hardened branch.
    pub hardened: bool,
}

impl ChildNumber {
    /// A normal (non-hardened) child number.
    pub fn normal(index: u32) -> Result<Self, KeyDerivationError> {
        if index >= HARDENED_OFFSET {
            return Err(KeyDerivationError::IndexOverflow(index));
        }
        Ok(Self { index, hardened: false })
    }

    /// A hardened child number.
    pub fn hardened(index: u32) -> Result<Self, KeyDerivationError> {
        if index >= HARDENED_OFFSET {
            return Err(KeyDerivationError::IndexOverflow(index));
        }
        Ok(Self { index, hardened: true })
    }

    /// The 32-bit value serialized into the derivation HMAC.
    pub fn to_wire(&self) -> u32 {
        if self.hardened {
            self.index | HARDENED_OFFSET
        } else {
            self.index
        }
    }
}

impl fmt::Display for ChildNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hardened {
            write!(f, "{}'", self.index)
        } else {
            write!(f, "{}", self.index)
        }
    }
}

/// A full derivation path from the master key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DerivationPath(Vec<ChildNumber>);

impl DerivationPath {
    /// Build a path from segments.
    pub fn new(segments: Vec<ChildNumber>) -> Self {
        Self(segments)
    }

    /// The segments in derivation order.
    pub fn segments(&self) -> &[ChildNumber] {
        &self.0
    }
}

impl FromStr for DerivationPath {
    type Err = KeyDerivationError;

    /// Parse `m/44'/632'/0'/0/5` syntax. The leading `m` (or `M`) is
    /// required; an empty tail (`m` alone) is the master key itself.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split('/');
        match parts.next() {
            Some("m") | Some("M") => {}
            _ => return Err(KeyDerivationError::InvalidPathSegment(s.to_string())),
        }

        let mut segments = Vec::new();
        for part in parts {
            let (digits, hardened) = match part.strip_suffix('\'') {
                Some(d) => (d, true),
                None => (part, false),
            };
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(KeyDerivationError::InvalidPathSegment(part.to_string()));
            }
            let index: u32 = digits
                .parse()
                .map_err(|_| KeyDerivationError::IndexOverflow(u32::MAX))?;
            if index >= HARDENED_OFFSET {
                return Err(KeyDerivationError::IndexOverflow(index));
            }
            segments.push(ChildNumber { index, hardened });
        }
        Ok(Self(segments))
    }
}

impl fmt::Display for DerivationPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "m")?;
        for segment in &self.0 {
            write!(f, "/{segment}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_typical_account_path() {
        let path: DerivationPath = "m/44'/632'/0'/0/5".parse().unwrap();
        let segs = path.segments();
        assert_eq!(segs.len(), 5);
        assert_eq!(segs[0], ChildNumber { index: 44, hardened: true });
        assert_eq!(segs[1], ChildNumber { index: 632, hardened: true });
        assert_eq!(segs[3], ChildNumber { index: 0, hardened: false });
        assert_eq!(segs[4], ChildNumber { index: 5, hardened: false });
    }

    #[test]
    fn parse_master_only() {
        let path: DerivationPath = "m".parse().unwrap();
        assert!(path.segments().is_empty());
    }

    #[test]
    fn display_roundtrip() {
        let text = "m/44'/632'/0'/0/55";
        let path: DerivationPath = text.parse().unwrap();
        assert_eq!(path.to_string(), text);
    }

    #[test]
    fn missing_master_prefix_rejected() {
        let err = "44'/0".parse::<DerivationPath>().unwrap_err();
        assert!(matches!(err, KeyDerivationError::InvalidPathSegment(_)));
    }

    #[test]
    fn garbage_segment_rejected() {
        for bad in ["m/abc", "m/", "m/1x", "m/'", "m//1"] {
            let err = bad.parse::<DerivationPath>().unwrap_err();
            assert!(
                matches!(err, KeyDerivationError::InvalidPathSegment(_)),
                "expected parse failure for {bad:?}"
            );
        }
    }

    #[test]
    fn reserved_index_rejected() {
        let err = "m/2147483648".parse::<DerivationPath>().unwrap_err();
        assert_eq!(err, KeyDerivationError::IndexOverflow(0x8000_0000));
    }

    #[test]
    fn oversized_index_rejected() {
        let err = "m/99999999999".parse::<DerivationPath>().unwrap_err();
        assert!(matches!(err, KeyDerivationError::IndexOverflow(_)));
    }

    #[test]
    fn child_number_constructors_guard_range() {
        assert!(ChildNumber::normal(0x7FFF_FFFF).is_ok());
        assert!(ChildNumber::normal(0x8000_0000).is_err());
        assert!(ChildNumber::hardened(0x8000_0000).is_err());
    }

    #[test]
    fn wire_value_sets_hardened_bit() {
        let n = ChildNumber::hardened(44).unwrap();
        assert_eq!(n.to_wire(), 44 | 0x8000_0000);
        let n = ChildNumber::normal(44).unwrap();
        assert_eq!(n.to_wire(), 44);
    }
}
