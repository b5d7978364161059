//! `DieselAccountStore` against embedded PostgreSQL.
//!
//! Duplicate detection relies on the `accounts` unique constraints, so these
//! tests drive the real schema rather than the in-memory store.

use backend::domain::ports::{AccountKey, AccountStore, AccountStoreError};
use backend::domain::{
    Account, AccountId, AccountParts, EmailAddress, PasswordHash, PhoneNumber, Role, Username,
};
use backend::outbound::persistence::{DbPool, DieselAccountStore, PoolConfig};
use chrono::Utc;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;

mod support;

use support::{handle_cluster_setup_failure, provision_database};

/// Fields drop in order: pool, then runtime, then the database.
struct StoreContext {
    store: DieselAccountStore,
    runtime: Runtime,
    _database: TemporaryDatabase,
}

fn setup_store() -> Result<StoreContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let database = provision_database(&runtime)?;
    let config = PoolConfig::new(database.url().to_string()).with_max_size(2);
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;
    Ok(StoreContext {
        store: DieselAccountStore::new(pool),
        runtime,
        _database: database,
    })
}

#[fixture]
fn context() -> Option<StoreContext> {
    match setup_store() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn account(username: &str, email: &str) -> Account {
    Account::new(AccountParts {
        id: AccountId::random(),
        username: Username::new(username).expect("username"),
        email: EmailAddress::new(email).expect("email"),
        password_hash: PasswordHash::new("$2b$10$abcdefghijklmnopqrstuv"),
        role: Role::Landlord,
        phone: PhoneNumber::new("+919876543210").expect("phone"),
        whatsapp_number: PhoneNumber::new("+919876543211").expect("whatsapp"),
        created_at: Utc::now(),
    })
}

#[rstest]
fn inserted_account_is_found_by_both_keys(context: Option<StoreContext>) {
    let Some(ctx) = context else { return };
    let alice = account("alice", "a@x.com");

    let stored = ctx
        .runtime
        .block_on(ctx.store.insert(&alice))
        .expect("insert");
    assert_eq!(stored.id(), alice.id());
    assert_eq!(stored.role(), Role::Landlord);

    let by_email = ctx
        .runtime
        .block_on(ctx.store.find_by_email(alice.email()))
        .expect("find by email")
        .expect("account by email");
    let by_username = ctx
        .runtime
        .block_on(ctx.store.find_by_username(alice.username()))
        .expect("find by username")
        .expect("account by username");
    assert_eq!(by_email.id(), alice.id());
    assert_eq!(by_username.id(), alice.id());
    assert_eq!(by_email.password_hash(), alice.password_hash());
    assert_eq!(by_username.whatsapp_number().as_ref(), "+919876543211");
}

#[rstest]
#[case::same_email("bob", "a@x.com", AccountKey::Email)]
#[case::same_username("alice", "other@x.com", AccountKey::Username)]
fn second_insert_on_a_taken_key_conflicts(
    context: Option<StoreContext>,
    #[case] username: &str,
    #[case] email: &str,
    #[case] key: AccountKey,
) {
    let Some(ctx) = context else { return };
    ctx.runtime
        .block_on(ctx.store.insert(&account("alice", "a@x.com")))
        .expect("first insert");

    let err = ctx
        .runtime
        .block_on(ctx.store.insert(&account(username, email)))
        .expect_err("duplicate insert");

    assert_eq!(err, AccountStoreError::Conflict { key });
    let other = EmailAddress::new("other@x.com").expect("email");
    let leftover = ctx
        .runtime
        .block_on(ctx.store.find_by_email(&other))
        .expect("find");
    assert!(leftover.is_none());
}

#[rstest]
fn delete_reports_affected_rows(context: Option<StoreContext>) {
    let Some(ctx) = context else { return };
    let alice = account("alice", "a@x.com");
    ctx.runtime
        .block_on(ctx.store.insert(&alice))
        .expect("insert");

    let missing = Username::new("nobody").expect("username");
    assert_eq!(
        ctx.runtime
            .block_on(ctx.store.delete_by_username(&missing))
            .expect("delete missing"),
        0
    );

    assert_eq!(
        ctx.runtime
            .block_on(ctx.store.delete_by_username(alice.username()))
            .expect("delete"),
        1
    );
    assert!(
        ctx.runtime
            .block_on(ctx.store.find_by_username(alice.username()))
            .expect("find")
            .is_none()
    );
    assert_eq!(
        ctx.runtime
            .block_on(ctx.store.delete_by_username(alice.username()))
            .expect("delete again"),
        0
    );
}
