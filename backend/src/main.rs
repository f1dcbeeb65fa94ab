//! Backend entry-point: loads settings, prepares storage and serves the API.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use avmoto_crm::inbound::http::health::{HealthState, RecordStore};
use avmoto_crm::inbound::http::session_config::{BuildMode, session_settings_from_env};
use avmoto_crm::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use avmoto_crm::settings::AppSettings;

use server::{LoginAccount, ServerConfig, create_server};

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

    let settings = AppSettings::load().map_err(|e| std::io::Error::other(e.to_string()))?;
    let session = session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
        LoginAccount {
            email: settings.login_email().to_owned(),
            password: settings.login_password().to_owned(),
        },
    );
    let (config, store) = match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .map_err(std::io::Error::other)?;
            let pool = DbPool::new(
                PoolConfig::new(url).with_max_size(settings.db_max_connections()),
            )
            .await
            .map_err(std::io::Error::other)?;
            (config.with_db_pool(pool), RecordStore::Postgres)
        }
        None => {
            warn!("no database configured; records are kept in memory");
            (config, RecordStore::Memory)
        }
    };

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(Some(server::build_prometheus()?));

    let health_state = web::Data::new(HealthState::new(store));
    let server = create_server(health_state.clone(), config)?;
    info!(%bind_addr, ?store, "listening");
    let result = server.await;
    health_state.mark_unhealthy();
    result
}
