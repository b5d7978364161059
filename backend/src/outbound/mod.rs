//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: account stores (PostgreSQL via Diesel, or in-memory)
//! - **security**: bcrypt password hashing
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod security;
