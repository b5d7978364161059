//! Domain primitives, aggregates and use-cases.
//!
//! Purpose: define strongly typed account entities used by the HTTP and
//! persistence adapters, and the services that operate on them. Types are
//! immutable once built and validate their own invariants.
//!
//! Public surface:
//! - Account, AccountParts, AccountId: the stored account aggregate.
//! - Username, EmailAddress, Role, PhoneNumber: validated account fields.
//! - Password, PasswordHash: plaintext under policy, and its one-way hash.
//! - Registration, LoginCredentials: validated signup and login inputs.
//! - AccountService: implements the driving ports in [`ports`].
//! - Error, ErrorCode: transport-agnostic error payload.

pub mod account;
pub mod account_service;
pub mod auth;
pub mod error;
pub mod password;
pub mod ports;
pub mod registration;
pub mod trace_id;

pub use self::account::{
    Account, AccountId, AccountParts, AccountValidationError, EmailAddress, PhoneNumber, Role,
    Username,
};
pub use self::account_service::{AccountError, AccountService};
pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::error::{Error, ErrorCode};
pub use self::password::{PASSWORD_MIN_LENGTH, Password, PasswordHash, PasswordPolicyViolation};
pub use self::registration::{
    Registration, RegistrationField, RegistrationParts, RegistrationValidationError,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::invalid_request("User not found"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
