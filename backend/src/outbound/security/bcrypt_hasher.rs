//! bcrypt-backed [`PasswordHasher`].
//!
//! bcrypt is deliberately slow, so both hashing and verification run on
//! Tokio's blocking pool instead of an actix worker thread.

use async_trait::async_trait;
use thiserror::Error;
use tracing::warn;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHashError, PasswordHasher};
use crate::domain::{Password, PasswordHash, TraceId};

/// Rejected bcrypt work factor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("bcrypt cost must be between {min} and {max}, got {cost}", min = BcryptCost::MIN, max = BcryptCost::MAX)]
pub struct BcryptCostError {
    pub cost: u32,
}

/// bcrypt work factor, never below [`BcryptCost::MIN`].
///
/// # Examples
/// ```
/// use backend::outbound::security::BcryptCost;
///
/// assert_eq!(BcryptCost::default().get(), 10);
/// assert!(BcryptCost::new(12).is_ok());
/// assert!(BcryptCost::new(4).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BcryptCost(u32);

impl BcryptCost {
    pub const MIN: u32 = 10;
    pub const MAX: u32 = 31;

    /// Validate a work factor.
    pub const fn new(cost: u32) -> Result<Self, BcryptCostError> {
        if cost < Self::MIN || cost > Self::MAX {
            return Err(BcryptCostError { cost });
        }
        Ok(Self(cost))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl Default for BcryptCost {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

/// Password hasher using salted bcrypt.
#[derive(Debug, Clone, Copy, Default)]
pub struct BcryptPasswordHasher {
    cost: BcryptCost,
}

impl BcryptPasswordHasher {
    pub fn new(cost: BcryptCost) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> BcryptCost {
        self.cost
    }
}

async fn run_blocking<T, F>(work: F) -> Result<T, PasswordHashError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(work).await.map_err(|err| {
        warn!(?trace_id, error = %err, "bcrypt task did not complete");
        PasswordHashError::hash(err.to_string())
    })
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError> {
        let plaintext = Zeroizing::new(password.expose().to_owned());
        let cost = self.cost.get();
        let encoded = run_blocking(move || bcrypt::hash(plaintext.as_str(), cost))
            .await?
            .map_err(|err| PasswordHashError::hash(err.to_string()))?;
        Ok(PasswordHash::new(encoded))
    }

    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError> {
        let candidate = Zeroizing::new(candidate.to_owned());
        let encoded = hash.as_ref().to_owned();
        let outcome = run_blocking(move || bcrypt::verify(candidate.as_str(), &encoded)).await?;
        // A stored hash bcrypt cannot parse never matches.
        Ok(outcome.unwrap_or_else(|err| {
            warn!(error = %err, "stored password hash could not be verified");
            false
        }))
    }
}
