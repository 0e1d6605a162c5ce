//! # keel-crypto — key-stretching primitives for the Keel wallet core.
//!
//! Provides the PBKDF2-HMAC key derivation function used to turn a user
//! password into a symmetric vault key, plus the small parameter types it
//! needs: digest selection and text-to-bytes encoding.
//!
//! # Modules
//!
//! - [`error`] — `CryptoError` enum
//! - [`digest`] — `Digest` hash selector (SHA-256 / SHA-512)
//! - [`encoding`] — `Encoding` text-to-bytes conversion (UTF-8 / hex)
//! - [`hash`] — HMAC helpers
//! - [`kdf`] — PBKDF2-HMAC derivation

pub mod digest;
pub mod encoding;
pub mod error;
pub mod hash;
pub mod kdf;

// Re-exports for convenient access
pub use digest::Digest;
pub use encoding::Encoding;
pub use error::CryptoError;
pub use kdf::{derive, MAX_KEY_LEN};
