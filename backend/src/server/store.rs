//! Account store selection from settings.

use std::sync::Arc;

use tracing::{info, warn};

use backend::domain::ports::AccountStore;
use backend::outbound::persistence::{
    DbPool, DieselAccountStore, InMemoryAccountStore, run_pending_migrations,
};
use backend::settings::AppSettings;

/// Build the account store: PostgreSQL when a database URL is configured,
/// otherwise a process-local store that forgets everything on restart.
///
/// # Errors
/// Returns [`std::io::Error`] when migrations fail or the pool cannot be built.
pub async fn build_account_store(settings: &AppSettings) -> std::io::Result<Arc<dyn AccountStore>> {
    let Some(database_url) = settings.database_url() else {
        warn!("no database configured; accounts are kept in memory and lost on restart");
        return Ok(Arc::new(InMemoryAccountStore::default()));
    };

    if settings.run_migrations {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
    }

    let config = settings.pool_config(database_url).map_err(std::io::Error::other)?;
    let (max_size, min_idle, timeout) = (
        config.max_size(),
        config.min_idle(),
        config.connection_timeout(),
    );
    let pool = DbPool::new(config).await.map_err(std::io::Error::other)?;
    info!(
        max_size,
        min_idle = ?min_idle,
        connection_timeout_secs = timeout.as_secs(),
        "database pool ready"
    );
    Ok(Arc::new(DieselAccountStore::new(pool)))
}
