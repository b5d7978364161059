//! In-process [`AccountStore`] used when no database is configured and in
//! tests.
//!
//! The uniqueness check and the insert happen under one lock, giving the same
//! single-winner guarantee as the database constraints.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{AccountKey, AccountStore, AccountStoreError};
use crate::domain::{Account, EmailAddress, Username};

/// Accounts keyed by username.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: Mutex<HashMap<Username, Account>>,
}

impl InMemoryAccountStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Username, Account>>, AccountStoreError> {
        self.accounts
            .lock()
            .map_err(|_| AccountStoreError::query("account store lock poisoned"))
    }

    /// Number of stored accounts.
    ///
    /// # Errors
    ///
    /// Fails only if a previous holder of the lock panicked.
    pub fn len(&self) -> Result<usize, AccountStoreError> {
        Ok(self.lock()?.len())
    }

    /// Whether the store holds no accounts.
    ///
    /// # Errors
    ///
    /// Fails only if a previous holder of the lock panicked.
    pub fn is_empty(&self) -> Result<bool, AccountStoreError> {
        Ok(self.lock()?.is_empty())
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountStoreError> {
        Ok(self
            .lock()?
            .values()
            .find(|account| account.email() == email)
            .cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountStoreError> {
        Ok(self.lock()?.get(username).cloned())
    }

    async fn insert(&self, account: &Account) -> Result<Account, AccountStoreError> {
        let mut accounts = self.lock()?;
        if accounts
            .values()
            .any(|existing| existing.email() == account.email())
        {
            return Err(AccountStoreError::conflict(AccountKey::Email));
        }
        if accounts.contains_key(account.username()) {
            return Err(AccountStoreError::conflict(AccountKey::Username));
        }
        accounts.insert(account.username().clone(), account.clone());
        Ok(account.clone())
    }

    async fn delete_by_username(&self, username: &Username) -> Result<u64, AccountStoreError> {
        Ok(u64::from(self.lock()?.remove(username).is_some()))
    }
}
