//! # keel-vault — secret management for the Keel wallet.
//!
//! Owns the lifecycle of the wallet's master seed: a BIP-39 mnemonic is
//! stretched into a 64-byte seed, sealed into an encrypted vault blob under
//! a password-derived key, and persisted through an injected storage
//! collaborator. While unlocked, the guard holds the one live seed in
//! memory and derives per-account secp256k1 key pairs on demand.
//!
//! # Modules
//!
//! - [`error`] — error enums per concern
//! - [`seed`] — zeroized 64-byte master seed
//! - [`mnemonic`] — entropy↔mnemonic conversion, seed stretch, account paths
//! - [`path`] — typed BIP-32 derivation paths
//! - [`hdkey`] — BIP-32 extended keys over secp256k1
//! - [`storage`] — async key-value storage trait + in-memory impl
//! - [`encryption`] — AES-256-GCM vault blob with versioned KDF parameters
//! - [`config`] — tunable vault parameters
//! - [`guard`] — the lock/unlock state machine
//! - [`account`] — account bookkeeping over the guard

pub mod account;
pub mod config;
pub mod encryption;
pub mod error;
pub mod guard;
pub mod hdkey;
pub mod mnemonic;
pub mod path;
pub mod seed;
pub mod storage;

// Re-exports for convenient access
pub use account::{Account, AccountBook, AccountKind};
pub use config::VaultConfig;
pub use encryption::{KdfParams, VaultBlob};
pub use error::{AccountError, KeyDerivationError, MnemonicError, VaultError};
pub use guard::{Guard, GuardState};
pub use hdkey::{ExtendedKey, KeyPair};
pub use path::{ChildNumber, DerivationPath};
pub use seed::Seed;
pub use storage::{MemoryStorage, VaultStorage};
