//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Account, Error, Registration};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Create an account from a validated registration.
    async fn register(&self, registration: Registration) -> Result<Account, Error>;
}
