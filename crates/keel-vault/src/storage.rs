//! Persistent storage collaborator.
//!
//! The vault blob lives in an opaque async key-value store injected into
//! the guard. Backends (browser storage, files, databases) implement
//! [`VaultStorage`]; the crate ships [`MemoryStorage`] for tests and
//! embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::VaultError;

/// Async key-value store for the encrypted vault blob.
///
/// Implementations map their own failures into [`VaultError::Storage`].
#[async_trait]
pub trait VaultStorage: Send + Sync {
    /// Read the value under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, VaultError>;

    /// Write `value` under `key`, replacing any previous value.
    async fn set(&self, key: &str, value: &[u8]) -> Result<(), VaultError>;

    /// Remove everything. Used by factory reset.
    async fn clear(&self) -> Result<(), VaultError>;
}

/// In-memory [`VaultStorage`] backed by a `HashMap`.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RwLock<HashMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

#[async_trait]
impl VaultStorage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, VaultError> {
        Ok(self.entries.read().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<(), VaultError> {
        self.entries.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    async fn clear(&self) -> Result<(), VaultError> {
        self.entries.write().clear();
        Ok(())
    }
}
