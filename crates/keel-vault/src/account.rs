//! Account bookkeeping over the guard.
//!
//! An account names a derivation index (seed accounts) or an externally
//! held key (hardware accounts). The book keeps the ordered list plus the
//! current selection; key material itself always comes from the guard, so
//! the book stores only public data.

use std::fmt;

use crate::error::{AccountError, VaultError};
use crate::guard::Guard;
use crate::hdkey::KeyPair;
use crate::storage::VaultStorage;

/// Where an account's private key lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKind {
    /// Derived from the vault seed at a BIP-44 account index.
    Seed {
        /// Account index under the wallet's derivation path.
        index: u32,
    },
    /// Held by a hardware device; only the public key is known here.
    Hardware {
        /// Device-side slot index.
        index: u32,
    },
}

/// A single wallet account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// User-facing label.
    pub name: String,
    /// Key provenance.
    pub kind: AccountKind,
    /// Compressed secp256k1 public key.
    pub public_key: [u8; 33],
}

impl Account {
    /// Build a seed account by deriving its public key from the unlocked guard.
    pub fn from_seed<S: VaultStorage>(
        name: impl Into<String>,
        index: u32,
        guard: &Guard<S>,
    ) -> Result<Self, VaultError> {
        let key_pair = guard.derive_account(index)?;
        Ok(Self {
            name: name.into(),
            kind: AccountKind::Seed { index },
            public_key: *key_pair.public_key(),
        })
    }

    /// Build a hardware account from a device-provided public key.
    pub fn from_hardware(name: impl Into<String>, index: u32, public_key: [u8; 33]) -> Self {
        Self {
            name: name.into(),
            kind: AccountKind::Hardware { index },
            public_key,
        }
    }
}

/// Ordered account list with a current selection.
#[derive(Default)]
pub struct AccountBook {
    accounts: Vec<Account>,
    selected: usize,
}

impl AccountBook {
    /// An empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Whether the book holds no accounts.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Append an account. Public keys must be unique across the book.
    pub fn add(&mut self, account: Account) -> Result<(), AccountError> {
        if self.accounts.iter().any(|a| a.public_key == account.public_key) {
            return Err(AccountError::MustBeUnique);
        }
        self.accounts.push(account);
        Ok(())
    }

    /// Remove the account at `pos`. The selection is clamped back into range.
    pub fn remove(&mut self, pos: usize) -> Result<Account, AccountError> {
        if pos >= self.accounts.len() {
            return Err(AccountError::NotFound(format!("position {pos}")));
        }
        let removed = self.accounts.remove(pos);
        if self.selected >= self.accounts.len() && !self.accounts.is_empty() {
            self.selected = self.accounts.len() - 1;
        }
        Ok(removed)
    }

    /// Select the account at `pos`.
    pub fn select(&mut self, pos: usize) -> Result<(), AccountError> {
        if pos >= self.accounts.len() {
            return Err(AccountError::IndexOutOfRange {
                index: pos,
                len: self.accounts.len(),
            });
        }
        self.selected = pos;
        Ok(())
    }

    /// The currently selected account, if any exist.
    pub fn selected(&self) -> Option<&Account> {
        self.accounts.get(self.selected)
    }

    /// The account at `pos`.
    pub fn get(&self, pos: usize) -> Result<&Account, AccountError> {
        self.accounts
            .get(pos)
            .ok_or_else(|| AccountError::NotFound(format!("position {pos}")))
    }

    /// Look an account up by its public key.
    pub fn find_by_public_key(&self, public_key: &[u8; 33]) -> Result<&Account, AccountError> {
        self.accounts
            .iter()
            .find(|a| &a.public_key == public_key)
            .ok_or_else(|| AccountError::NotFound(format!("public key {}", hex::encode(public_key))))
    }

    /// The key pair for the account at `pos`.
    ///
    /// Seed accounts derive through the unlocked guard. Hardware accounts
    /// never expose raw private key material, so the request fails with
    /// [`AccountError::HardwareUnsupported`].
    pub fn key_pair<S: VaultStorage>(
        &self,
        pos: usize,
        guard: &Guard<S>,
    ) -> Result<KeyPair, VaultError> {
        let account = self.get(pos)?;
        match account.kind {
            AccountKind::Seed { index } => guard.derive_account(index),
            AccountKind::Hardware { .. } => {
                Err(AccountError::HardwareUnsupported("raw private key access".into()).into())
            }
        }
    }
}

impl fmt::Debug for AccountBook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccountBook")
            .field("accounts", &self.accounts.len())
            .field("selected", &self.selected)
            .finish()
    }
}
