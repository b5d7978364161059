//! Diesel and pool error mapping for the account store.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{AccountKey, AccountStoreError};

use super::pool::PoolError;

/// Unique constraint guarding `accounts.email`.
pub(crate) const EMAIL_CONSTRAINT: &str = "accounts_email_key";
/// Unique constraint guarding `accounts.username`.
pub(crate) const USERNAME_CONSTRAINT: &str = "accounts_username_key";

pub(crate) fn map_pool_error(error: PoolError) -> AccountStoreError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            AccountStoreError::connection(message)
        }
    }
}

fn conflicting_key(constraint: Option<&str>) -> AccountKey {
    match constraint {
        Some(USERNAME_CONSTRAINT) => AccountKey::Username,
        _ => AccountKey::Email,
    }
}

/// Map Diesel failures. Unique violations become
/// [`AccountStoreError::Conflict`] naming the key from the constraint.
pub(crate) fn map_diesel_error(error: DieselError) -> AccountStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            AccountStoreError::conflict(conflicting_key(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            AccountStoreError::connection("database connection error")
        }
        DieselError::NotFound => AccountStoreError::query("record not found"),
        DieselError::QueryBuilderError(_) => AccountStoreError::query("database query error"),
        _ => AccountStoreError::query("database error"),
    }
}
