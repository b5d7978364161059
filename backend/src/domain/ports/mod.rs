//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`AccountStore`, `PasswordHasher`) are implemented by
//! outbound adapters; driving ports (`SignupService`, `LoginService`,
//! `AccountRemovalService`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod account_removal;
mod account_store;
mod login_service;
mod password_hasher;
mod signup_service;

#[cfg(test)]
pub use account_removal::MockAccountRemovalService;
pub use account_removal::AccountRemovalService;
#[cfg(test)]
pub use account_store::MockAccountStore;
pub use account_store::{AccountKey, AccountStore, AccountStoreError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use signup_service::MockSignupService;
pub use signup_service::SignupService;
