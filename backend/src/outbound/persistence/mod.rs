//! Account persistence adapters.
//!
//! - [`DieselAccountStore`]: PostgreSQL via `diesel-async` and a `bb8` pool.
//! - [`InMemoryAccountStore`]: process-local fallback used when no database
//!   is configured, and in tests.
//!
//! Diesel row structs and schema definitions stay private to this module;
//! only domain types cross the port.
//!
//! ```ignore
//! use backend::outbound::persistence::{DbPool, DieselAccountStore, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/rentals")).await?;
//! let store = DieselAccountStore::new(pool);
//! ```

mod diesel_account_store;
mod diesel_error_mapping;
mod memory_account_store;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_account_store::DieselAccountStore;
pub use memory_account_store::InMemoryAccountStore;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
