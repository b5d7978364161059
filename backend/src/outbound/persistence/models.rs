//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; the store converts them to and
//! from [`Account`].

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Account, AccountId, AccountParts, AccountValidationError, EmailAddress, PasswordHash,
    PhoneNumber, Username,
};

use super::schema::accounts;

/// Row read back from the `accounts` table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = accounts)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct AccountRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub phone: String,
    pub whatsapp_number: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable form of a new account.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = accounts)]
pub(crate) struct NewAccountRow<'a> {
    pub id: Uuid,
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub phone: &'a str,
    pub whatsapp_number: &'a str,
    pub created_at: DateTime<Utc>,
}

impl<'a> From<&'a Account> for NewAccountRow<'a> {
    fn from(account: &'a Account) -> Self {
        Self {
            id: *account.id().as_uuid(),
            username: account.username().as_ref(),
            email: account.email().as_ref(),
            password_hash: account.password_hash().as_ref(),
            role: account.role().as_str(),
            phone: account.phone().as_ref(),
            whatsapp_number: account.whatsapp_number().as_ref(),
            created_at: account.created_at(),
        }
    }
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountValidationError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Self::new(AccountParts {
            id: AccountId::from_uuid(row.id),
            username: Username::new(&row.username)?,
            email: EmailAddress::new(&row.email)?,
            password_hash: PasswordHash::new(row.password_hash),
            role: row.role.parse()?,
            phone: PhoneNumber::new(row.phone)?,
            whatsapp_number: PhoneNumber::new(row.whatsapp_number)?,
            created_at: row.created_at,
        }))
    }
}
