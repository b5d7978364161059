//! Driving port for login.
//!
//! Inbound adapters call this to check credentials without knowing which
//! store or hasher backs it, so handler tests can substitute a double.

use async_trait::async_trait;

use crate::domain::{Account, Error, LoginCredentials};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching account.
    ///
    /// An unknown email and a wrong password fail identically.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Account, Error>;
}
