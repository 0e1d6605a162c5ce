//! BIP-32 hierarchical-deterministic keys over secp256k1.
//!
//! The master key is taken from HMAC-SHA-512 of the 64-byte seed; children
//! derive by scalar tweak-addition. Hardened segments mix the parent private
//! key into the derivation HMAC, non-hardened segments the compressed parent
//! public key. The same (seed, path) pair always yields the same key.

use std::fmt;

use secp256k1::{PublicKey, Scalar, Secp256k1, SecretKey};

use keel_crypto::hash::hmac_sha512;

use crate::error::KeyDerivationError;
use crate::path::{ChildNumber, DerivationPath};
use crate::seed::Seed;

/// HMAC key fixed by BIP-32 for master-key generation.
const MASTER_HMAC_KEY: &[u8] = b"Bitcoin seed";

/// A private key with its compressed public counterpart.
///
/// Ephemeral output of derivation; never persisted by this crate.
#[derive(Clone, PartialEq, Eq)]
pub struct KeyPair {
    private_key: [u8; 32],
    public_key: [u8; 33],
}

impl KeyPair {
    /// Raw 32-byte private scalar. Handle with care.
    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    /// Compressed SEC1 public key (33 bytes, 0x02/0x03 prefix).
    pub fn public_key(&self) -> &[u8; 33] {
        &self.public_key
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &hex::encode(self.public_key))
            .finish_non_exhaustive()
    }
}

/// An extended private key: the secret scalar plus its chain code.
pub struct ExtendedKey {
    secret_key: SecretKey,
    chain_code: [u8; 32],
}

impl ExtendedKey {
    /// Construct the root extended key from a 64-byte master seed.
    ///
    /// Fails with [`KeyDerivationError::InvalidSeedLength`] for any other
    /// length.
    pub fn from_master_seed(seed: &Seed) -> Result<Self, KeyDerivationError> {
        Self::from_seed_bytes(seed.as_bytes())
    }

    /// As [`from_master_seed`](Self::from_master_seed), from raw bytes.
    pub fn from_seed_bytes(seed: &[u8]) -> Result<Self, KeyDerivationError> {
        if seed.len() != 64 {
            return Err(KeyDerivationError::InvalidSeedLength(seed.len()));
        }
        let i = hmac_sha512(MASTER_HMAC_KEY, seed);
        let secret_key =
            SecretKey::from_slice(&i[..32]).map_err(|_| KeyDerivationError::UnusableChildKey)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        Ok(Self { secret_key, chain_code })
    }

    /// Derive the key at `path`, walking segment by segment from this key.
    pub fn derive(&self, path: &DerivationPath) -> Result<Self, KeyDerivationError> {
        let mut key = Self {
            secret_key: self.secret_key,
            chain_code: self.chain_code,
        };
        for segment in path.segments() {
            key = key.derive_child(*segment)?;
        }
        Ok(key)
    }

    /// Derive one child.
    ///
    /// `I = HMAC-SHA512(chain_code, data || ser32(n))` where `data` is
    /// `0x00 || ser256(k_par)` for hardened children and the compressed
    /// parent public key otherwise; the child scalar is
    /// `parse256(I_L) + k_par (mod n)`.
    pub fn derive_child(&self, child: ChildNumber) -> Result<Self, KeyDerivationError> {
        let mut data = Vec::with_capacity(37);
        if child.hardened {
            data.push(0x00);
            data.extend_from_slice(&self.secret_key.secret_bytes());
        } else {
            let secp = Secp256k1::new();
            let public = PublicKey::from_secret_key(&secp, &self.secret_key);
            data.extend_from_slice(&public.serialize());
        }
        data.extend_from_slice(&child.to_wire().to_be_bytes());

        let i = hmac_sha512(&self.chain_code, &data);
        let il: [u8; 32] = i[..32].try_into().expect("HMAC-SHA512 output is 64 bytes");

        // I_L >= n or a zero child scalar invalidates this index.
        let tweak =
            Scalar::from_be_bytes(il).map_err(|_| KeyDerivationError::UnusableChildKey)?;
        let secret_key = self
            .secret_key
            .add_tweak(&tweak)
            .map_err(|_| KeyDerivationError::UnusableChildKey)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&i[32..]);
        Ok(Self { secret_key, chain_code })
    }

    /// The private/public key pair at this node.
    pub fn key_pair(&self) -> KeyPair {
        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &self.secret_key);
        KeyPair {
            private_key: self.secret_key.secret_bytes(),
            public_key: public.serialize(),
        }
    }

    /// The chain code at this node.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("secret_key", &"[REDACTED]")
            .field("chain_code", &hex::encode(self.chain_code))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mnemonic::{account_path, mnemonic_to_seed, parse_phrase};

    const VECTOR_PHRASE: &str = "insect harsh unable fog damp together skin eager clutch pyramid \
                                 travel budget flat flag ten bone whisper carbon addict siren \
                                 elegant legend mandate cover";

    fn vector_seed() -> Seed {
        let mnemonic = parse_phrase(VECTOR_PHRASE).unwrap();
        mnemonic_to_seed(&mnemonic, "")
    }

    fn vector_keys(index: u32) -> KeyPair {
        let root = ExtendedKey::from_master_seed(&vector_seed()).unwrap();
        let child = root.derive(&account_path(index).unwrap()).unwrap();
        child.key_pair()
    }

    #[test]
    fn account_zero_matches_vector() {
        let kp = vector_keys(0);
        assert_eq!(
            hex::encode(kp.private_key()),
            "20cbb3e05d1be2385e5e795db63fa436b47ebfbc15b25a1193d8f8ef8f699f5b"
        );
        assert_eq!(
            hex::encode(kp.public_key()),
            "030087d0aac1660e043807c2fa28e0d7193c1a7eaefa9d84104192a0ce90e4626e"
        );
    }

    #[test]
    fn account_one_matches_vector() {
        let kp = vector_keys(1);
        assert_eq!(
            hex::encode(kp.private_key()),
            "bc34c1499276cdd920bf004cfc209ea13781868409c4861fede0edcb1a484124"
        );
        assert_eq!(
            hex::encode(kp.public_key()),
            "0288a73c45888665af33bc5148ae90aed9bf02b5dc99e9b4b15a3270ba9ea883c5"
        );
    }

    #[test]
    fn account_fifty_five_matches_vector() {
        let kp = vector_keys(55);
        assert_eq!(
            hex::encode(kp.private_key()),
            "38f7eee62d803325fca53521a767781777ce9dfd5b3c469aeb5c52cab9c38fa5"
        );
        assert_eq!(
            hex::encode(kp.public_key()),
            "0319fcfecfb3750e378cf1d26516772cce2a9fc969bd3b50df2d1fddb4083f0600"
        );
    }

    #[test]
    fn wrong_seed_length_rejected() {
        for len in [0usize, 16, 32, 63, 65] {
            let err = ExtendedKey::from_seed_bytes(&vec![1u8; len]).unwrap_err();
            assert_eq!(err, KeyDerivationError::InvalidSeedLength(len));
        }
    }

    #[test]
    fn derivation_is_deterministic() {
        let a = vector_keys(7);
        let b = vector_keys(7);
        assert_eq!(a, b);
    }

    #[test]
    fn indices_produce_distinct_keys() {
        let a = vector_keys(0);
        let b = vector_keys(1);
        assert_ne!(a.private_key(), b.private_key());
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn stepwise_equals_full_path() {
        let root = ExtendedKey::from_master_seed(&vector_seed()).unwrap();
        let path = account_path(3).unwrap();

        let direct = root.derive(&path).unwrap().key_pair();

        let mut key = root.derive(&DerivationPath::default()).unwrap();
        for segment in path.segments() {
            key = key.derive_child(*segment).unwrap();
        }
        assert_eq!(key.key_pair(), direct);
    }

    #[test]
    fn hardened_and_normal_children_differ() {
        let root = ExtendedKey::from_master_seed(&vector_seed()).unwrap();
        let normal = root
            .derive_child(ChildNumber { index: 0, hardened: false })
            .unwrap();
        let hardened = root
            .derive_child(ChildNumber { index: 0, hardened: true })
            .unwrap();
        assert_ne!(normal.key_pair(), hardened.key_pair());
    }

    #[test]
    fn empty_path_returns_master() {
        let root = ExtendedKey::from_master_seed(&vector_seed()).unwrap();
        let derived = root.derive(&DerivationPath::default()).unwrap();
        assert_eq!(root.key_pair(), derived.key_pair());
    }

    #[test]
    fn debug_redacts_secret() {
        let root = ExtendedKey::from_master_seed(&vector_seed()).unwrap();
        let debug = format!("{root:?}");
        assert!(debug.contains("REDACTED"));
        let private_hex = hex::encode(root.key_pair().private_key());
        assert!(!debug.contains(&private_hex));
    }
}
