//! Account storage seam and an in-memory implementation.
//!
//! A real host backs this with its ledger; the in-memory store serialises
//! writers per address through version numbers, which is all the engine
//! relies on.

use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use ledger_tictactoe::Pubkey;
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, instrument, warn};

/// A stored account.
#[derive(Debug, Clone, PartialEq, Eq, Getters, new)]
pub struct Account {
    /// Identity that paid for the allocation.
    owner: Pubkey,
    /// Raw account bytes.
    data: Vec<u8>,
    /// Incremented on every successful write; 0 right after allocation.
    version: u64,
}

/// Account storage failure.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum StoreError {
    /// An account already exists at the address.
    #[display("Account {address} is already in use")]
    AccountInUse {
        /// Requested address.
        address: Pubkey,
    },
    /// No account exists at the address.
    #[display("Account {address} not found")]
    AccountNotFound {
        /// Requested address.
        address: Pubkey,
    },
    /// The account changed since it was loaded.
    #[display("Account {address} is at version {actual}, expected {expected}")]
    VersionConflict {
        /// Account address.
        address: Pubkey,
        /// Version the writer loaded.
        expected: u64,
        /// Version currently stored.
        actual: u64,
    },
    /// Written data does not match the allocated size.
    #[display("Account {address} holds {expected} bytes, write had {actual}")]
    SpaceMismatch {
        /// Account address.
        address: Pubkey,
        /// Allocated size.
        expected: usize,
        /// Size of the rejected write.
        actual: usize,
    },
    /// The store lock was poisoned by a panicking writer.
    #[display("Account store lock poisoned")]
    Poisoned,
}

/// Addressable fixed-size byte records.
pub trait AccountStore {
    /// Creates a zeroed account of `space` bytes.
    fn allocate(&self, address: Pubkey, owner: Pubkey, space: usize) -> Result<(), StoreError>;

    /// Returns a snapshot of the account.
    fn load(&self, address: Pubkey) -> Result<Account, StoreError>;

    /// Replaces the account data if it is still at `expected_version`.
    ///
    /// Returns the new version.
    fn compare_and_persist(
        &self,
        address: Pubkey,
        expected_version: u64,
        data: Vec<u8>,
    ) -> Result<u64, StoreError>;
}

/// Process-local [`AccountStore`].
#[derive(Debug, Default)]
pub struct InMemoryStore {
    accounts: Mutex<HashMap<Pubkey, Account>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of allocated accounts.
    #[instrument(skip(self))]
    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.accounts.lock().map_err(|_| StoreError::Poisoned)?.len())
    }

    /// Returns true if nothing has been allocated.
    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

impl AccountStore for InMemoryStore {
    #[instrument(skip_all, fields(address = %address, owner = %owner, space = space))]
    fn allocate(&self, address: Pubkey, owner: Pubkey, space: usize) -> Result<(), StoreError> {
        let mut accounts = self.accounts.lock().map_err(|_| StoreError::Poisoned)?;
        if accounts.contains_key(&address) {
            warn!("Allocation refused, address in use");
            return Err(StoreError::AccountInUse { address });
        }
        accounts.insert(address, Account::new(owner, vec![0; space], 0));
        debug!("Account allocated");
        Ok(())
    }

    #[instrument(skip_all, fields(address = %address))]
    fn load(&self, address: Pubkey) -> Result<Account, StoreError> {
        let accounts = self.accounts.lock().map_err(|_| StoreError::Poisoned)?;
        accounts
            .get(&address)
            .cloned()
            .ok_or(StoreError::AccountNotFound { address })
    }

    #[instrument(skip_all, fields(address = %address, expected_version = expected_version, len = data.len()))]
    fn compare_and_persist(
        &self,
        address: Pubkey,
        expected_version: u64,
        data: Vec<u8>,
    ) -> Result<u64, StoreError> {
        let mut accounts = self.accounts.lock().map_err(|_| StoreError::Poisoned)?;
        let account = accounts
            .get_mut(&address)
            .ok_or(StoreError::AccountNotFound { address })?;

        if account.version != expected_version {
            warn!(
                expected = expected_version,
                actual = account.version,
                "Stale write rejected"
            );
            return Err(StoreError::VersionConflict {
                address,
                expected: expected_version,
                actual: account.version,
            });
        }
        if account.data.len() != data.len() {
            return Err(StoreError::SpaceMismatch {
                address,
                expected: account.data.len(),
                actual: data.len(),
            });
        }

        account.data = data;
        account.version += 1;
        debug!(version = account.version, "Account persisted");
        Ok(account.version)
    }
}
