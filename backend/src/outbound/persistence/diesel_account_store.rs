//! PostgreSQL-backed [`AccountStore`] using Diesel.
//!
//! Uniqueness is enforced by the `accounts` table constraints, so concurrent
//! inserts for the same email or username resolve to exactly one winner and
//! the loser sees [`AccountStoreError::Conflict`].

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{AccountStore, AccountStoreError};
use crate::domain::{Account, EmailAddress, Username};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{AccountRow, NewAccountRow};
use super::pool::DbPool;
use super::schema::accounts;

/// Diesel implementation of the account store port.
#[derive(Clone)]
pub struct DieselAccountStore {
    pool: DbPool,
}

impl DieselAccountStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn row_to_account(row: AccountRow) -> Result<Account, AccountStoreError> {
    let id = row.id;
    Account::try_from(row).map_err(|err| {
        warn!(account_id = %id, error = %err, "stored account failed validation");
        AccountStoreError::query(format!("stored account {id} is invalid: {err}"))
    })
}

#[async_trait]
impl AccountStore for DieselAccountStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<Account>, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        accounts::table
            .filter(accounts::email.eq(email.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        accounts::table
            .filter(accounts::username.eq(username.as_ref()))
            .select(AccountRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?
            .map(row_to_account)
            .transpose()
    }

    async fn insert(&self, account: &Account) -> Result<Account, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(accounts::table)
            .values(NewAccountRow::from(account))
            .returning(AccountRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        row_to_account(row)
    }

    async fn delete_by_username(&self, username: &Username) -> Result<u64, AccountStoreError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted =
            diesel::delete(accounts::table.filter(accounts::username.eq(username.as_ref())))
                .execute(&mut conn)
                .await
                .map_err(map_diesel_error)?;
        u64::try_from(deleted)
            .map_err(|_| AccountStoreError::query("deleted row count out of range"))
    }
}
