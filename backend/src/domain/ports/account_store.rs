//! Driven port for account persistence.
//!
//! Adapters must enforce uniqueness of both email and username and report a
//! collision as [`AccountStoreError::Conflict`]; the service relies on that
//! rather than on its own look-ups when two signups race.

use std::fmt;

use async_trait::async_trait;

use crate::domain::{Account, EmailAddress, Username};

use super::define_port_error;

/// Unique key that an insert collided with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountKey {
    Email,
    Username,
}

impl fmt::Display for AccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Email => f.write_str("email"),
            Self::Username => f.write_str("username"),
        }
    }
}

define_port_error! {
    /// Errors raised by account store adapters.
    pub enum AccountStoreError {
        /// Insert would duplicate an existing email or username.
        Conflict { key: AccountKey } => "account with this {key} already exists",
        /// Store connection could not be established.
        Connection { message: String } => "account store connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "account store query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Fetch the account registered with `email`.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountStoreError>;

    /// Fetch the account registered under `username`.
    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountStoreError>;

    /// Persist a new account and return it as stored.
    async fn insert(&self, account: &Account) -> Result<Account, AccountStoreError>;

    /// Delete the account registered under `username`, returning how many
    /// rows were removed (`0` or `1`).
    async fn delete_by_username(&self, username: &Username) -> Result<u64, AccountStoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_message_names_the_key() {
        let err = AccountStoreError::conflict(AccountKey::Email);
        assert_eq!(err.to_string(), "account with this email already exists");
    }

    #[test]
    fn query_constructor_accepts_str() {
        let err = AccountStoreError::query("syntax error");
        assert_eq!(
            err,
            AccountStoreError::Query {
                message: "syntax error".to_owned()
            }
        );
    }
}
