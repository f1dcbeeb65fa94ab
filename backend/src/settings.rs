//! Process settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `AVMOTO_*` environment variables and
//! configuration files, in that order of precedence.

use std::net::{AddrParseError, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::domain::ports::FixtureLoginService;
use crate::outbound::persistence::DEFAULT_MAX_CONNECTIONS;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Settings controlling the listener, storage and the bundled sign-in account.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "AVMOTO")]
pub struct AppSettings {
    /// Listener address, e.g. `127.0.0.1:8080`.
    pub bind_addr: Option<String>,
    /// PostgreSQL URL. Without one, records live in process memory.
    pub database_url: Option<String>,
    /// Email accepted by the bundled login service.
    pub login_email: Option<String>,
    /// Password accepted by the bundled login service.
    pub login_password: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Parsed listener address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.bind_addr
            .as_deref()
            .unwrap_or(DEFAULT_BIND_ADDR)
            .parse()
    }

    /// Database URL with blank values treated as unset.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    pub fn login_email(&self) -> &str {
        self.login_email
            .as_deref()
            .unwrap_or(FixtureLoginService::DEFAULT_EMAIL)
    }

    pub fn login_password(&self) -> &str {
        self.login_password
            .as_deref()
            .unwrap_or(FixtureLoginService::DEFAULT_PASSWORD)
    }

    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS)
    }
}
