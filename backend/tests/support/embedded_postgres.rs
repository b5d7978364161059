//! Embedded PostgreSQL for integration tests.
//!
//! One cluster is shared per test binary. Each test gets its own temporary
//! database with the account migrations applied through the same
//! [`run_pending_migrations`] the server uses at startup.
//!
//! Set `SKIP_TEST_CLUSTER=1` to skip suites in environments where the cluster
//! cannot start.

use std::fmt::Display;

use backend::outbound::persistence::run_pending_migrations;
use pg_embedded_setup_unpriv::TemporaryDatabase;
use pg_embedded_setup_unpriv::test_support::shared_cluster_handle;
use tokio::runtime::Runtime;
use uuid::Uuid;

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip when `SKIP_TEST_CLUSTER` is truthy, otherwise fail loudly.
#[expect(
    clippy::print_stderr,
    reason = "skipped suites must leave a marker in the test output"
)]
pub fn handle_cluster_setup_failure<T>(reason: impl Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

/// Create a fresh, migrated database on the shared cluster.
///
/// Must be called outside a Tokio runtime; migrations run on `runtime`.
pub fn provision_database(runtime: &Runtime) -> Result<TemporaryDatabase, String> {
    let cluster = shared_cluster_handle().map_err(|err| format!("start cluster: {err:?}"))?;
    let database = cluster
        .temporary_database(format!("test_{}", Uuid::new_v4()))
        .map_err(|err| format!("create database: {err:?}"))?;
    let url = database.url().to_string();
    runtime
        .block_on(run_pending_migrations(&url))
        .map_err(|err| format!("migrate {url}: {err}"))?;
    Ok(database)
}
