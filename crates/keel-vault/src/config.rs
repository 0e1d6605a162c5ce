//! Tunable vault parameters.

use keel_crypto::Digest;

/// Storage key the encrypted vault blob is persisted under.
pub const VAULT_STORAGE_KEY: &str = "vault";

/// Current vault blob format version.
pub const VAULT_BLOB_VERSION: u32 = 1;

/// Default PBKDF2 iteration count for the password-derived vault key.
///
/// Higher counts slow brute-force attacks and unlocking in equal measure.
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// KDF parameters applied when sealing a new vault blob.
///
/// The chosen values are stamped into every blob alongside its salt, so
/// changing these defaults later never breaks an existing vault: a blob is
/// always opened with the parameters it was sealed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VaultConfig {
    /// PBKDF2 iteration count.
    pub iterations: u32,
    /// Hash driving the PBKDF2 HMAC.
    pub digest: Digest,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_KDF_ITERATIONS,
            digest: Digest::Sha512,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_iterations() {
        let cfg = VaultConfig::default();
        assert_eq!(cfg.iterations, DEFAULT_KDF_ITERATIONS);
    }

    #[test]
    fn default_digest_is_sha512() {
        let cfg = VaultConfig::default();
        assert_eq!(cfg.digest, Digest::Sha512);
    }

    #[test]
    fn config_is_clone_and_debug() {
        let cfg = VaultConfig { iterations: 10, ..VaultConfig::default() };
        let cfg2 = cfg.clone();
        let debug = format!("{cfg2:?}");
        assert!(debug.contains("VaultConfig"));
        assert!(debug.contains("10"));
    }
}
