//! Shared helpers for backend integration tests.

pub mod embedded_postgres;

pub use embedded_postgres::{handle_cluster_setup_failure, provision_database};
