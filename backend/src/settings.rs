//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `RENTALS_*` environment variables and an
//! optional configuration file, in OrthoConfig's usual precedence.

use std::net::SocketAddr;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::outbound::persistence::PoolConfig;
use crate::outbound::security::{BcryptCost, BcryptCostError};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;
const DEFAULT_POOL_CONNECTION_TIMEOUT_SECS: u64 = 30;

/// Settings that failed validation after loading.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid bind address {value:?}: {source}")]
    BindAddr {
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
    #[error(transparent)]
    BcryptCost(#[from] BcryptCostError),
    #[error("pool_max_size must be at least 1")]
    PoolMaxSize,
    #[error("pool_min_idle ({min_idle}) must not exceed pool_max_size ({max_size})")]
    PoolMinIdle { min_idle: u32, max_size: u32 },
    #[error("pool_connection_timeout_secs must be at least 1")]
    PoolConnectionTimeout,
}

/// Runtime configuration for the account service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RENTALS")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// PostgreSQL connection URL. Without one, accounts live in memory.
    pub database_url: Option<String>,
    /// Maximum pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections the pool keeps open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection before failing the request.
    pub pool_connection_timeout_secs: Option<u64>,
    /// bcrypt work factor for new password hashes.
    pub bcrypt_cost: Option<u32>,
    /// Apply pending migrations at startup.
    #[ortho_config(default = true)]
    pub run_migrations: bool,
}

impl AppSettings {
    /// Configured listen address, or `0.0.0.0:3000`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let value = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        value.parse().map_err(|source| SettingsError::BindAddr {
            value: value.to_owned(),
            source,
        })
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref().filter(|url| !url.trim().is_empty())
    }

    /// Configured pool size, or 10.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::PoolMaxSize`] for zero.
    pub fn pool_max_size(&self) -> Result<u32, SettingsError> {
        match self.pool_max_size.unwrap_or(DEFAULT_POOL_MAX_SIZE) {
            0 => Err(SettingsError::PoolMaxSize),
            size => Ok(size),
        }
    }

    /// Pool settings for `database_url`.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for a zero pool size or timeout, or an idle
    /// floor above the pool size.
    pub fn pool_config(&self, database_url: &str) -> Result<PoolConfig, SettingsError> {
        let max_size = self.pool_max_size()?;
        if let Some(min_idle) = self.pool_min_idle.filter(|idle| *idle > max_size) {
            return Err(SettingsError::PoolMinIdle { min_idle, max_size });
        }
        let timeout = match self
            .pool_connection_timeout_secs
            .unwrap_or(DEFAULT_POOL_CONNECTION_TIMEOUT_SECS)
        {
            0 => return Err(SettingsError::PoolConnectionTimeout),
            secs => Duration::from_secs(secs),
        };
        Ok(PoolConfig::new(database_url)
            .with_max_size(max_size)
            .with_min_idle(self.pool_min_idle)
            .with_connection_timeout(timeout))
    }

    /// Configured bcrypt cost, or the minimum of 10.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::BcryptCost`] for costs below 10 or above 31.
    pub fn bcrypt_cost(&self) -> Result<BcryptCost, SettingsError> {
        match self.bcrypt_cost {
            Some(cost) => Ok(BcryptCost::new(cost)?),
            None => Ok(BcryptCost::default()),
        }
    }
}
