//! Account use-cases: signup, login and removal.
//!
//! [`AccountService`] implements the driving ports on top of an
//! [`AccountStore`] and a [`PasswordHasher`]. Outcomes are expressed as
//! [`AccountError`] and converted to the shared [`Error`] payload at the port
//! boundary, so adapters never need to know which store or hasher failed.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use thiserror::Error as ThisError;
use tracing::{debug, error, info};

use crate::domain::ports::{
    AccountRemovalService, AccountStore, AccountStoreError, LoginService, PasswordHashError,
    PasswordHasher, SignupService,
};
use crate::domain::{
    Account, AccountId, AccountParts, Error, LoginCredentials, Registration, Username,
};

/// Message returned for both unknown emails and wrong passwords.
pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid credentials";

/// Failures raised by the account use-cases.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum AccountError {
    #[error("User already exists")]
    DuplicateAccount,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User not found")]
    AccountNotFound,
    #[error("password hashing failed: {0}")]
    HashFailure(#[from] PasswordHashError),
    #[error("account store failed: {0}")]
    StoreFailure(AccountStoreError),
}

impl From<AccountStoreError> for AccountError {
    fn from(err: AccountStoreError) -> Self {
        match err {
            AccountStoreError::Conflict { .. } => Self::DuplicateAccount,
            other => Self::StoreFailure(other),
        }
    }
}

impl From<AccountError> for Error {
    fn from(err: AccountError) -> Self {
        let message = err.to_string();
        match err {
            AccountError::DuplicateAccount => {
                Self::invalid_request(message).with_details(json!({ "code": "duplicate_account" }))
            }
            AccountError::InvalidCredentials => Self::invalid_request(message)
                .with_details(json!({ "code": "invalid_credentials" })),
            AccountError::AccountNotFound => {
                Self::invalid_request(message).with_details(json!({ "code": "account_not_found" }))
            }
            AccountError::HashFailure(_) | AccountError::StoreFailure(_) => Self::internal(message),
        }
    }
}

/// Account service implementing [`SignupService`], [`LoginService`] and
/// [`AccountRemovalService`].
pub struct AccountService<S: ?Sized, H: ?Sized> {
    store: Arc<S>,
    hasher: Arc<H>,
}

impl<S: ?Sized, H: ?Sized> Clone for AccountService<S, H> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            hasher: Arc::clone(&self.hasher),
        }
    }
}

impl<S: ?Sized, H: ?Sized> AccountService<S, H> {
    /// Create a service over the given store and hasher.
    pub fn new(store: Arc<S>, hasher: Arc<H>) -> Self {
        Self { store, hasher }
    }
}

impl<S, H> AccountService<S, H>
where
    S: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn create_account(&self, registration: Registration) -> Result<Account, AccountError> {
        // Early look-ups give the common case a clean answer; the store's
        // unique keys still decide concurrent signups.
        if self
            .store
            .find_by_email(registration.email())
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateAccount);
        }
        if self
            .store
            .find_by_username(registration.username())
            .await?
            .is_some()
        {
            return Err(AccountError::DuplicateAccount);
        }

        let password_hash = self.hasher.hash(registration.password()).await?;
        let account = Account::new(AccountParts {
            id: AccountId::random(),
            username: registration.username().clone(),
            email: registration.email().clone(),
            password_hash,
            role: registration.role(),
            phone: registration.phone().clone(),
            whatsapp_number: registration.whatsapp_number().clone(),
            created_at: Utc::now(),
        });
        Ok(self.store.insert(&account).await?)
    }

    async fn check_credentials(
        &self,
        credentials: &LoginCredentials,
    ) -> Result<Account, AccountError> {
        let Some(account) = self.store.find_by_email(credentials.email()).await? else {
            return Err(AccountError::InvalidCredentials);
        };
        if self
            .hasher
            .verify(credentials.password(), account.password_hash())
            .await?
        {
            Ok(account)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }

    async fn delete_account(&self, username: &Username) -> Result<(), AccountError> {
        match self.store.delete_by_username(username).await? {
            0 => Err(AccountError::AccountNotFound),
            _ => Ok(()),
        }
    }
}

fn log_failure(operation: &'static str, err: &AccountError) {
    match err {
        AccountError::HashFailure(_) | AccountError::StoreFailure(_) => {
            error!(operation, error = %err, "account operation failed");
        }
        _ => debug!(operation, reason = %err, "account operation rejected"),
    }
}

#[async_trait]
impl<S, H> SignupService for AccountService<S, H>
where
    S: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn register(&self, registration: Registration) -> Result<Account, Error> {
        match self.create_account(registration).await {
            Ok(account) => {
                info!(account_id = %account.id(), role = %account.role(), "account created");
                Ok(account)
            }
            Err(err) => {
                log_failure("signup", &err);
                Err(err.into())
            }
        }
    }
}

#[async_trait]
impl<S, H> LoginService for AccountService<S, H>
where
    S: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Account, Error> {
        match self.check_credentials(credentials).await {
            Ok(account) => {
                info!(account_id = %account.id(), "account logged in");
                Ok(account)
            }
            Err(err) => {
                log_failure("login", &err);
                Err(err.into())
            }
        }
    }
}

#[async_trait]
impl<S, H> AccountRemovalService for AccountService<S, H>
where
    S: AccountStore + ?Sized,
    H: PasswordHasher + ?Sized,
{
    async fn remove(&self, username: &Username) -> Result<(), Error> {
        match self.delete_account(username).await {
            Ok(()) => {
                info!(%username, "account deleted");
                Ok(())
            }
            Err(err) => {
                log_failure("delete", &err);
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    //! Service behaviour against mocked ports.
    use super::*;
    use crate::domain::ports::{AccountKey, MockAccountStore, MockPasswordHasher};
    use crate::domain::{
        EmailAddress, ErrorCode, PasswordHash, PhoneNumber, RegistrationParts, Role,
    };
    use rstest::{fixture, rstest};

    const STORED_HASH: &str = "$2b$10$storedhashstoredhashstoredhashstoredhashstoredhashsto";

    #[fixture]
    fn registration() -> Registration {
        Registration::try_from_parts(RegistrationParts {
            username: "alice",
            email: "a@x.com",
            password: "Passw0rd",
            role: "customer",
            phone: "+919876543210",
            whatsapp_number: "+919876543210",
        })
        .expect("valid registration")
    }

    fn stored_account() -> Account {
        Account::new(AccountParts {
            id: AccountId::random(),
            username: Username::new("alice").expect("username"),
            email: EmailAddress::new("a@x.com").expect("email"),
            password_hash: PasswordHash::new(STORED_HASH),
            role: Role::Customer,
            phone: PhoneNumber::new("+919876543210").expect("phone"),
            whatsapp_number: PhoneNumber::new("+919876543210").expect("phone"),
            created_at: Utc::now(),
        })
    }

    fn credentials(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("a@x.com", password).expect("credentials")
    }

    fn service(
        store: MockAccountStore,
        hasher: MockPasswordHasher,
    ) -> AccountService<MockAccountStore, MockPasswordHasher> {
        AccountService::new(Arc::new(store), Arc::new(hasher))
    }

    fn details_code(err: &Error) -> Option<&str> {
        err.details()
            .and_then(|details| details.get("code"))
            .and_then(serde_json::Value::as_str)
    }

    #[rstest]
    #[tokio::test]
    async fn register_hashes_password_and_inserts(registration: Registration) {
        let mut store = MockAccountStore::new();
        store.expect_find_by_email().times(1).returning(|_| Ok(None));
        store
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        store
            .expect_insert()
            .times(1)
            .withf(|account| {
                account.username().as_ref() == "alice"
                    && account.password_hash().as_ref() == STORED_HASH
            })
            .returning(|account| Ok(account.clone()));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .times(1)
            .withf(|password| password.expose() == "Passw0rd")
            .returning(|_| Ok(PasswordHash::new(STORED_HASH)));

        let account = service(store, hasher)
            .register(registration)
            .await
            .expect("signup succeeds");
        assert_eq!(account.email().as_ref(), "a@x.com");
        assert_eq!(account.role(), Role::Customer);
        assert_ne!(account.password_hash().as_ref(), "Passw0rd");
    }

    #[rstest]
    #[case(true, false)]
    #[case(false, true)]
    #[tokio::test]
    async fn register_rejects_existing_email_or_username(
        registration: Registration,
        #[case] email_taken: bool,
        #[case] username_taken: bool,
    ) {
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_email()
            .returning(move |_| Ok(email_taken.then(stored_account)));
        store
            .expect_find_by_username()
            .returning(move |_| Ok(username_taken.then(stored_account)));
        store.expect_insert().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let err = service(store, hasher)
            .register(registration)
            .await
            .expect_err("duplicate must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), "User already exists");
        assert_eq!(details_code(&err), Some("duplicate_account"));
    }

    #[rstest]
    #[tokio::test]
    async fn register_maps_insert_conflict_to_duplicate(registration: Registration) {
        let mut store = MockAccountStore::new();
        store.expect_find_by_email().returning(|_| Ok(None));
        store.expect_find_by_username().returning(|_| Ok(None));
        store
            .expect_insert()
            .returning(|_| Err(AccountStoreError::conflict(AccountKey::Username)));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Ok(PasswordHash::new(STORED_HASH)));

        let err = service(store, hasher)
            .register(registration)
            .await
            .expect_err("conflict must fail");
        assert_eq!(err.message(), "User already exists");
    }

    #[rstest]
    #[tokio::test]
    async fn register_surfaces_store_outage_as_internal(registration: Registration) {
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_email()
            .returning(|_| Err(AccountStoreError::connection("refused")));
        let hasher = MockPasswordHasher::new();

        let err = service(store, hasher)
            .register(registration)
            .await
            .expect_err("outage must fail");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.details().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn register_surfaces_hash_failure_as_internal(registration: Registration) {
        let mut store = MockAccountStore::new();
        store.expect_find_by_email().returning(|_| Ok(None));
        store.expect_find_by_username().returning(|_| Ok(None));
        store.expect_insert().never();
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .returning(|_| Err(PasswordHashError::hash("worker panicked")));

        let err = service(store, hasher)
            .register(registration)
            .await
            .expect_err("hash failure must fail");
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn authenticate_returns_account_for_matching_password() {
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_email()
            .withf(|email| email.as_ref() == "a@x.com")
            .returning(|_| Ok(Some(stored_account())));
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .withf(|candidate, hash| candidate == "Passw0rd" && hash.as_ref() == STORED_HASH)
            .returning(|_, _| Ok(true));

        let account = service(store, hasher)
            .authenticate(&credentials("Passw0rd"))
            .await
            .expect("login succeeds");
        assert_eq!(account.username().as_ref(), "alice");
    }

    #[rstest]
    #[case::unknown_email(false)]
    #[case::wrong_password(true)]
    #[tokio::test]
    async fn authenticate_failures_are_indistinguishable(#[case] account_exists: bool) {
        let mut store = MockAccountStore::new();
        store
            .expect_find_by_email()
            .returning(move |_| Ok(account_exists.then(stored_account)));
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_verify().returning(|_, _| Ok(false));

        let err = service(store, hasher)
            .authenticate(&credentials("wrongpass1"))
            .await
            .expect_err("login must fail");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        assert_eq!(err.message(), INVALID_CREDENTIALS_MESSAGE);
        assert_eq!(details_code(&err), Some("invalid_credentials"));
    }

    #[rstest]
    #[case(1, None)]
    #[case(0, Some("User not found"))]
    #[tokio::test]
    async fn remove_reports_missing_accounts(
        #[case] deleted: u64,
        #[case] expected_message: Option<&str>,
    ) {
        let mut store = MockAccountStore::new();
        store
            .expect_delete_by_username()
            .withf(|username| username.as_ref() == "alice")
            .times(1)
            .returning(move |_| Ok(deleted));
        let hasher = MockPasswordHasher::new();
        let username = Username::new("alice").expect("username");

        let result = service(store, hasher).remove(&username).await;
        match (expected_message, result) {
            (None, Ok(())) => {}
            (Some(message), Err(err)) => {
                assert_eq!(err.message(), message);
                assert_eq!(details_code(&err), Some("account_not_found"));
            }
            (expected, actual) => panic!("expected {expected:?}, got {actual:?}"),
        }
    }

    #[tokio::test]
    async fn remove_surfaces_query_failure_as_internal() {
        let mut store = MockAccountStore::new();
        store
            .expect_delete_by_username()
            .returning(|_| Err(AccountStoreError::query("deadlock detected")));
        let username = Username::new("alice").expect("username");

        let err = service(store, MockPasswordHasher::new())
            .remove(&username)
            .await
            .expect_err("query failure must fail");
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert!(err.message().contains("deadlock detected"));
    }
}
