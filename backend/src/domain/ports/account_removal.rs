//! Driving port for deleting accounts.

use async_trait::async_trait;

use crate::domain::{Error, Username};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountRemovalService: Send + Sync {
    /// Delete the account registered under `username`.
    async fn remove(&self, username: &Username) -> Result<(), Error>;
}
