//! Backend entry-point: loads settings, wires the account service and serves
//! the REST endpoints.

use std::ffi::OsString;
use std::sync::Arc;

use actix_web::web;
use ortho_config::OrthoConfig;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::domain::AccountService;
use backend::inbound::http::health::HealthState;
use backend::inbound::http::state::HttpState;
use backend::outbound::security::BcryptPasswordHasher;
use backend::settings::AppSettings;

mod server;

use server::{ServerConfig, build_account_store, create_server};

fn load_settings() -> std::io::Result<AppSettings> {
    AppSettings::load_from_iter(std::env::args_os().collect::<Vec<OsString>>())
        .map_err(|err| std::io::Error::other(format!("failed to load settings: {err}")))
}

#[cfg(feature = "metrics")]
fn make_metrics() -> std::io::Result<actix_web_prom::PrometheusMetrics> {
    PrometheusMetricsBuilder::new("rentals")
        .endpoint("/metrics")
        .build()
        .map_err(|err| std::io::Error::other(format!("configure Prometheus metrics: {err}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings()?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    let cost = settings.bcrypt_cost().map_err(std::io::Error::other)?;

    let store = build_account_store(&settings).await?;
    let hasher = Arc::new(BcryptPasswordHasher::new(cost));
    let service = Arc::new(AccountService::new(store, hasher));
    let http_state = HttpState::from_service(service);

    #[cfg(not(feature = "metrics"))]
    let config = ServerConfig::new(bind_addr, http_state);
    #[cfg(feature = "metrics")]
    let config = ServerConfig::new(bind_addr, http_state, make_metrics()?);

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, bcrypt_cost = cost.get(), "account service listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
