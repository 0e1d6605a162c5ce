//! BIP-39 mnemonic handling and account derivation paths.
//!
//! Entropy↔word-list conversion rides on the `bip39` crate; the
//! mnemonic→seed stretch runs through this workspace's own PBKDF2 so the
//! whole core shares one key-derivation primitive.

use bip39::{Language, Mnemonic};
use keel_crypto::{kdf, Digest};

use crate::error::MnemonicError;
use crate::path::{ChildNumber, DerivationPath, HARDENED_OFFSET};
use crate::seed::Seed;

/// SLIP-44 coin type of the target chain.
pub const COIN_TYPE: u32 = 632;

/// PBKDF2 iteration count fixed by BIP-39 for the seed stretch.
const SEED_ITERATIONS: u32 = 2048;

/// BIP-39 salt prefix; the optional passphrase is appended to it.
const SEED_SALT_PREFIX: &str = "mnemonic";

/// Entropy lengths (bytes) with a defined word count: 12–24 words.
const SUPPORTED_ENTROPY_LENS: [usize; 5] = [16, 20, 24, 28, 32];

/// Convert raw entropy into a checksummed English mnemonic.
///
/// Fails with [`MnemonicError::InvalidEntropyLength`] unless the entropy is
/// 128–256 bits in 32-bit increments.
pub fn entropy_to_mnemonic(entropy: &[u8]) -> Result<Mnemonic, MnemonicError> {
    if !SUPPORTED_ENTROPY_LENS.contains(&entropy.len()) {
        return Err(MnemonicError::InvalidEntropyLength(entropy.len()));
    }
    Ok(Mnemonic::from_entropy_in(Language::English, entropy)
        .expect("supported entropy length always produces valid mnemonic"))
}

/// Parse a phrase back into a validated mnemonic.
///
/// Normalizes whitespace and converts to lowercase before parsing; word-list,
/// word-count, and checksum violations all surface as
/// [`MnemonicError::InvalidPhrase`].
pub fn parse_phrase(phrase: &str) -> Result<Mnemonic, MnemonicError> {
    let normalized = phrase
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();
    Mnemonic::parse_in(Language::English, &normalized)
        .map_err(|e| MnemonicError::InvalidPhrase(e.to_string()))
}

/// Recover the raw entropy a phrase encodes. Inverse of [`entropy_to_mnemonic`].
pub fn mnemonic_to_entropy(phrase: &str) -> Result<Vec<u8>, MnemonicError> {
    Ok(parse_phrase(phrase)?.to_entropy())
}

/// Stretch a mnemonic (and optional passphrase) into the 64-byte master seed.
///
/// PBKDF2-HMAC-SHA-512 with 2048 iterations; the password is the normalized
/// phrase, the salt is `"mnemonic"` plus the passphrase. Deterministic.
pub fn mnemonic_to_seed(mnemonic: &Mnemonic, passphrase: &str) -> Seed {
    let phrase = mnemonic.to_string();
    let salt = format!("{SEED_SALT_PREFIX}{passphrase}");
    let stretched = kdf::derive(
        phrase.as_bytes(),
        salt.as_bytes(),
        SEED_ITERATIONS,
        64,
        Digest::Sha512,
    )
    .expect("64-byte seed is far below the KDF output cap");

    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&stretched);
    Seed::from_bytes(bytes)
}

/// Build the BIP-44 derivation path for an account index:
/// `m/44'/632'/0'/0/{index}`.
///
/// Indices at or above 2^31 collide with the hardened bit and fail with
/// [`MnemonicError::InvalidAccountIndex`].
pub fn account_path(account_index: u32) -> Result<DerivationPath, MnemonicError> {
    if account_index >= HARDENED_OFFSET {
        return Err(MnemonicError::InvalidAccountIndex(account_index));
    }
    let purpose = ChildNumber { index: 44, hardened: true };
    let coin = ChildNumber { index: COIN_TYPE, hardened: true };
    let account = ChildNumber { index: 0, hardened: true };
    let change = ChildNumber { index: 0, hardened: false };
    let address = ChildNumber { index: account_index, hardened: false };
    Ok(DerivationPath::new(vec![purpose, coin, account, change, address]))
}

#[cfg(test)]
mod tests {
    use super::*;

    const VECTOR_ENTROPY: &str = "750d2bb12d2373c772a2272c95e39e0ec588b077b8cafa844c0d64b478ff21c1";
    const VECTOR_PHRASE: &str = "insect harsh unable fog damp together skin eager clutch pyramid \
                                 travel budget flat flag ten bone whisper carbon addict siren \
                                 elegant legend mandate cover";
    const VECTOR_SEED: &str = "9de4324c250bc7f98aac98eb10e13f523fd68df6dbe4fd36b552a80de07ffaa9\
                               1aaa521f88d4502e98719002462e4fb4f348196a695ac78ad8afa3ebf0e03dd4";

    #[test]
    fn entropy_vector_produces_expected_words() {
        let entropy = hex::decode(VECTOR_ENTROPY).unwrap();
        let mnemonic = entropy_to_mnemonic(&entropy).unwrap();
        let expected = VECTOR_PHRASE.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(mnemonic.to_string(), expected);
    }

    #[test]
    fn phrase_vector_produces_expected_seed() {
        let mnemonic = parse_phrase(VECTOR_PHRASE).unwrap();
        let seed = mnemonic_to_seed(&mnemonic, "");
        assert_eq!(hex::encode(seed.as_bytes()), VECTOR_SEED);
    }

    #[test]
    fn roundtrip_all_supported_lengths() {
        for len in SUPPORTED_ENTROPY_LENS {
            let entropy: Vec<u8> = (0..len as u8).collect();
            let mnemonic = entropy_to_mnemonic(&entropy).unwrap();
            let recovered = mnemonic_to_entropy(&mnemonic.to_string()).unwrap();
            assert_eq!(recovered, entropy, "roundtrip failed for {len}-byte entropy");
        }
    }

    #[test]
    fn unsupported_entropy_length_rejected() {
        for len in [0usize, 4, 15, 17, 33, 64] {
            let entropy = vec![0u8; len];
            let err = entropy_to_mnemonic(&entropy).unwrap_err();
            assert_eq!(err, MnemonicError::InvalidEntropyLength(len));
        }
    }

    /// BIP-39 reference vector: all-zero entropy with the "TREZOR" passphrase.
    #[test]
    fn passphrase_changes_seed() {
        let mnemonic = entropy_to_mnemonic(&[0u8; 16]).unwrap();
        let seed = mnemonic_to_seed(&mnemonic, "TREZOR");
        assert_eq!(
            hex::encode(seed.as_bytes()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e53495531f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );

        let bare = mnemonic_to_seed(&mnemonic, "");
        assert_ne!(bare.as_bytes(), seed.as_bytes());
    }

    #[test]
    fn whitespace_and_case_normalized() {
        let messy = format!("  {}  ", VECTOR_PHRASE.to_uppercase().replace(' ', "   "));
        let entropy = mnemonic_to_entropy(&messy).unwrap();
        assert_eq!(hex::encode(entropy), VECTOR_ENTROPY);
    }

    #[test]
    fn invalid_word_rejected() {
        let err = parse_phrase("abandon abandon abandon invalidword").unwrap_err();
        assert!(matches!(err, MnemonicError::InvalidPhrase(_)));
    }

    #[test]
    fn bad_checksum_rejected() {
        // 23 valid words + a wrong final word fails the checksum.
        let mut phrase = vec!["abandon"; 23].join(" ");
        phrase.push_str(" zoo");
        let err = parse_phrase(&phrase).unwrap_err();
        assert!(matches!(err, MnemonicError::InvalidPhrase(_)));
    }

    #[test]
    fn account_path_layout() {
        let path = account_path(5).unwrap();
        assert_eq!(path.to_string(), "m/44'/632'/0'/0/5");
    }

    #[test]
    fn account_path_index_zero() {
        let path = account_path(0).unwrap();
        assert_eq!(path.to_string(), "m/44'/632'/0'/0/0");
    }

    #[test]
    fn account_path_rejects_hardened_range() {
        let err = account_path(0x8000_0000).unwrap_err();
        assert_eq!(err, MnemonicError::InvalidAccountIndex(0x8000_0000));
        assert!(account_path(0x7FFF_FFFF).is_ok());
    }

    #[test]
    fn seed_is_deterministic() {
        let mnemonic = parse_phrase(VECTOR_PHRASE).unwrap();
        let a = mnemonic_to_seed(&mnemonic, "x");
        let b = mnemonic_to_seed(&mnemonic, "x");
        assert_eq!(a, b);
    }
}
