//! Account service for the rentals listing application.
//!
//! Layout follows a hexagonal split: [`domain`] holds the account types,
//! validation rules and use-cases; [`inbound`] exposes them over HTTP;
//! [`outbound`] implements the storage and hashing ports.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
