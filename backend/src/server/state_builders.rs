//! Builders wiring the HTTP state over the configured storage backend.

use std::sync::Arc;

use actix_web::web;
use mockable::{Clock, DefaultClock};
use tracing::{info, warn};

use avmoto_crm::domain::ports::{FixtureLoginService, LoginService};
use avmoto_crm::domain::UserRole;
use avmoto_crm::inbound::http::state::{HttpState, StoreAdapters};
use avmoto_crm::outbound::memory::MemoryStore;
use avmoto_crm::outbound::persistence::{
    DbPool, DieselCustomerProfileSource, DieselCustomerRepository, DieselCustomerSearch,
    DieselJobRepository, DieselUserRoleRepository,
};

use super::ServerConfig;
use super::config::LoginAccount;

fn build_login(account: &LoginAccount) -> FixtureLoginService {
    let user_id = FixtureLoginService::default().user_id();
    FixtureLoginService::new(account.email.as_str(), account.password.as_str(), user_id)
}

fn diesel_state(pool: &DbPool, login: Arc<dyn LoginService>, clock: Arc<dyn Clock>) -> HttpState {
    HttpState::from_adapters(
        login,
        StoreAdapters {
            customers: Arc::new(DieselCustomerRepository::new(pool.clone())),
            jobs: Arc::new(DieselJobRepository::new(pool.clone())),
            search: Arc::new(DieselCustomerSearch::new(pool.clone())),
            profiles: Arc::new(DieselCustomerProfileSource::new(pool.clone())),
            roles: Arc::new(DieselUserRoleRepository::new(pool.clone())),
        },
        clock,
    )
}

/// In-memory backend. The bundled account is seeded as admin so a local run
/// can exercise every screen.
fn memory_state(login: &FixtureLoginService, clock: Arc<dyn Clock>) -> HttpState {
    let store = Arc::new(MemoryStore::new(Arc::clone(&clock)));
    if let Err(error) = store.seed_role(login.user_id(), UserRole::Admin) {
        warn!(%error, "could not seed admin role for the bundled account");
    }
    HttpState::from_adapters(
        Arc::new(login.clone()),
        StoreAdapters {
            customers: store.clone(),
            jobs: store.clone(),
            search: store.clone(),
            profiles: store.clone(),
            roles: store,
        },
        clock,
    )
}

/// Build HTTP state from the server configuration.
///
/// Uses the Diesel adapters when a pool is configured and the in-memory
/// store otherwise.
pub(super) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let login = build_login(&config.login);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL storage");
            diesel_state(pool, Arc::new(login), clock)
        }
        None => {
            info!("no database configured; records are kept in memory");
            memory_state(&login, clock)
        }
    };
    web::Data::new(state)
}
