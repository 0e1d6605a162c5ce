//! The vault/guard state machine.
//!
//! A guard owns at most one live [`Seed`], and only while unlocked. The
//! encrypted vault blob lives in the injected storage collaborator; the
//! guard is the only component that interprets it.
//!
//! ```text
//! NotConfigured --setup_vault--> Unlocked <--unlock/logout--> Locked
//!        ^                                                      |
//!        +----------------------- reset -----------------------+
//! ```
//!
//! Operations take `&mut self`, so concurrent mutation against one guard is
//! ruled out at compile time; callers wanting shared access serialize
//! behind their own lock.

use std::fmt;

use bip39::Mnemonic;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::{VaultConfig, VAULT_STORAGE_KEY};
use crate::encryption::{self, VaultBlob};
use crate::error::VaultError;
use crate::hdkey::{ExtendedKey, KeyPair};
use crate::mnemonic;
use crate::seed::Seed;
use crate::storage::VaultStorage;

/// Lifecycle state of the vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    /// No vault blob exists in storage.
    NotConfigured,
    /// A blob exists; no seed in memory.
    Locked,
    /// The seed is decrypted and held in memory.
    Unlocked,
}

/// Plaintext sealed inside the vault blob.
///
/// Carries the stretched seed (so unlocking skips the 2048-iteration
/// mnemonic stretch) and the original entropy (so the exact phrase can be
/// rebuilt for backup export).
#[derive(Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
struct VaultPayload {
    seed: Vec<u8>,
    entropy: Vec<u8>,
}

/// Owns the vault lifecycle: setup, lock, unlock, logout.
///
/// Composes the mnemonic controller, the PBKDF2 primitive, and the storage
/// collaborator. Exactly one decrypted seed exists in memory, and only
/// while the state is [`GuardState::Unlocked`].
pub struct Guard<S: VaultStorage> {
    storage: S,
    config: VaultConfig,
    state: GuardState,
    seed: Option<Seed>,
}

impl<S: VaultStorage> Guard<S> {
    /// Create a guard over `storage` with default parameters.
    ///
    /// The guard starts as `NotConfigured`; call [`sync`](Self::sync) to
    /// pick up a previously persisted vault.
    pub fn new(storage: S) -> Self {
        Self::with_config(storage, VaultConfig::default())
    }

    /// Create a guard with explicit vault parameters.
    pub fn with_config(storage: S, config: VaultConfig) -> Self {
        Self {
            storage,
            config,
            state: GuardState::NotConfigured,
            seed: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GuardState {
        self.state
    }

    /// Tear the guard down, dropping any held seed and returning the
    /// storage collaborator.
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Whether the seed is currently decrypted in memory.
    pub fn is_enabled(&self) -> bool {
        self.state == GuardState::Unlocked
    }

    /// Whether a vault has been set up (locked or unlocked).
    pub fn is_ready(&self) -> bool {
        self.state != GuardState::NotConfigured
    }

    /// Align the state with persisted storage.
    ///
    /// A present blob means `Locked` (an already-unlocked guard stays
    /// unlocked); an absent blob means `NotConfigured` and drops any held
    /// seed. Idempotent, safe to call any number of times.
    pub async fn sync(&mut self) -> Result<(), VaultError> {
        let present = self.storage.get(VAULT_STORAGE_KEY).await?.is_some();
        match (present, self.state) {
            (true, GuardState::NotConfigured) => {
                debug!("vault blob found, guard locked");
                self.state = GuardState::Locked;
            }
            (true, _) => {}
            (false, _) => {
                self.seed = None;
                self.state = GuardState::NotConfigured;
            }
        }
        Ok(())
    }

    /// Create the vault from a mnemonic and password.
    ///
    /// Only valid while `NotConfigured`; an existing vault is never
    /// overwritten, reset explicitly first. On success the blob is
    /// persisted with a single write and the guard is left `Unlocked`
    /// holding the seed. On any failure nothing is persisted and the state
    /// stays `NotConfigured`.
    pub async fn setup_vault(
        &mut self,
        mnemonic: &Mnemonic,
        password: &str,
    ) -> Result<(), VaultError> {
        if self.state != GuardState::NotConfigured {
            return Err(VaultError::AlreadyConfigured);
        }

        let seed = mnemonic::mnemonic_to_seed(mnemonic, "");
        let payload = VaultPayload {
            seed: seed.as_bytes().to_vec(),
            entropy: mnemonic.to_entropy(),
        };
        let payload_json = Zeroizing::new(
            serde_json::to_vec(&payload).map_err(|e| VaultError::Serialization(e.to_string()))?,
        );

        let blob = encryption::seal(&payload_json, password, &self.config)?;
        self.storage
            .set(VAULT_STORAGE_KEY, &blob.to_bytes()?)
            .await?;

        self.seed = Some(seed);
        self.state = GuardState::Unlocked;
        info!(iterations = self.config.iterations, "vault configured");
        Ok(())
    }

    /// Decrypt the vault blob and load the seed into memory.
    ///
    /// A wrong password fails with [`VaultError::IncorrectPassword`] and
    /// leaves the state and secrets untouched. Unlocking an already
    /// unlocked guard is a no-op.
    pub async fn unlock(&mut self, password: &str) -> Result<(), VaultError> {
        match self.state {
            GuardState::NotConfigured => return Err(VaultError::NotConfigured),
            GuardState::Unlocked => return Ok(()),
            GuardState::Locked => {}
        }

        let payload = self.open_payload(password).await?;
        let seed_bytes: [u8; 64] = payload
            .seed
            .as_slice()
            .try_into()
            .map_err(|_| VaultError::CorruptedBlob(format!("bad seed length: {}", payload.seed.len())))?;

        self.seed = Some(Seed::from_bytes(seed_bytes));
        self.state = GuardState::Unlocked;
        debug!("vault unlocked");
        Ok(())
    }

    /// Drop the in-memory seed and return to `Locked`.
    ///
    /// No-op when already locked; the persisted blob is untouched. The
    /// seed's memory is zeroized on drop.
    pub fn logout(&mut self) {
        if self.state == GuardState::Unlocked {
            self.seed = None;
            self.state = GuardState::Locked;
            debug!("vault locked");
        }
    }

    /// Alias for [`logout`](Self::logout).
    pub fn lock(&mut self) {
        self.logout();
    }

    /// Factory reset: clear storage, drop secrets, back to `NotConfigured`.
    pub async fn reset(&mut self) -> Result<(), VaultError> {
        self.storage.clear().await?;
        self.seed = None;
        self.state = GuardState::NotConfigured;
        info!("vault reset");
        Ok(())
    }

    /// Re-seal the vault blob under a new password.
    ///
    /// Verifies `old` against the existing blob (failing with
    /// [`VaultError::IncorrectPassword`]), then persists a replacement
    /// sealed with a fresh salt and nonce. Lock state is unchanged.
    pub async fn change_password(&mut self, old: &str, new: &str) -> Result<(), VaultError> {
        if self.state == GuardState::NotConfigured {
            return Err(VaultError::NotConfigured);
        }

        let payload = self.open_payload(old).await?;
        let payload_json = Zeroizing::new(
            serde_json::to_vec(&payload).map_err(|e| VaultError::Serialization(e.to_string()))?,
        );
        let blob = encryption::seal(&payload_json, new, &self.config)?;
        self.storage
            .set(VAULT_STORAGE_KEY, &blob.to_bytes()?)
            .await?;
        info!("vault password changed");
        Ok(())
    }

    /// Rebuild the backup phrase from the sealed entropy.
    ///
    /// Requires a configured vault and the correct password; works whether
    /// locked or unlocked, without touching the lock state.
    pub async fn reveal_mnemonic(&self, password: &str) -> Result<Mnemonic, VaultError> {
        if self.state == GuardState::NotConfigured {
            return Err(VaultError::NotConfigured);
        }
        let payload = self.open_payload(password).await?;
        Ok(mnemonic::entropy_to_mnemonic(&payload.entropy)?)
    }

    /// The decrypted seed. Only available while `Unlocked`.
    pub fn seed(&self) -> Result<&Seed, VaultError> {
        match self.state {
            GuardState::Unlocked => self.seed.as_ref().ok_or(VaultError::Locked),
            GuardState::Locked => Err(VaultError::Locked),
            GuardState::NotConfigured => Err(VaultError::NotConfigured),
        }
    }

    /// Derive the key pair for an account index from the unlocked seed.
    pub fn derive_account(&self, account_index: u32) -> Result<KeyPair, VaultError> {
        let seed = self.seed()?;
        let path = mnemonic::account_path(account_index)?;
        let root = ExtendedKey::from_master_seed(seed)?;
        Ok(root.derive(&path)?.key_pair())
    }

    async fn open_payload(&self, password: &str) -> Result<VaultPayload, VaultError> {
        let bytes = self
            .storage
            .get(VAULT_STORAGE_KEY)
            .await?
            .ok_or(VaultError::NotConfigured)?;
        let blob = VaultBlob::from_bytes(&bytes)?;
        let payload_json = Zeroizing::new(encryption::open(&blob, password)?);
        serde_json::from_slice(&payload_json).map_err(|e| VaultError::CorruptedBlob(e.to_string()))
    }
}

impl<S: VaultStorage> fmt::Debug for Guard<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("state", &self.state)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
