//! HTTP inbound adapter exposing the account REST endpoints.

pub mod accounts;
pub mod error;
pub mod health;
pub mod state;

pub use error::ApiResult;
