//! Liveness and readiness probes.
//!
//! Both probes answer with `Cache-Control: no-store` and a small JSON body
//! naming the record store the process was started with, so an operator can
//! tell a database-backed instance from one holding records in memory.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Backing store selected at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RecordStore {
    Postgres,
    Memory,
}

/// Probe payload.
#[derive(Debug, Serialize, ToSchema)]
pub struct ProbeResponse {
    #[schema(example = "ready")]
    pub status: &'static str,
    pub store: RecordStore,
}

/// Readiness and liveness flags shared with the probe handlers.
pub struct HealthState {
    store: RecordStore,
    ready: AtomicBool,
    live: AtomicBool,
}

impl HealthState {
    /// Alive but not yet ready.
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }

    pub fn store(&self) -> RecordStore {
        self.store
    }

    /// Called once migrations have run and the listener is bound.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fails both probes so traffic drains during shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
        self.ready.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    fn respond(&self, ok: bool, up: &'static str, down: &'static str) -> HttpResponse {
        let (mut builder, status) = if ok {
            (HttpResponse::Ok(), up)
        } else {
            (HttpResponse::ServiceUnavailable(), down)
        };
        builder
            .insert_header((header::CACHE_CONTROL, "no-store"))
            .json(ProbeResponse {
                status,
                store: self.store,
            })
    }
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Accepting requests", body = ProbeResponse),
        (status = 503, description = "Starting up or draining", body = ProbeResponse)
    )
)]
#[get("/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_ready(), "ready", "not_ready")
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Process is alive", body = ProbeResponse),
        (status = 503, description = "Process is shutting down", body = ProbeResponse)
    )
)]
#[get("/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    state.respond(state.is_alive(), "alive", "shutting_down")
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use super::*;

    #[rstest]
    #[case("/health/ready", false, true, StatusCode::SERVICE_UNAVAILABLE, "not_ready")]
    #[case("/health/ready", true, true, StatusCode::OK, "ready")]
    #[case("/health/ready", true, false, StatusCode::SERVICE_UNAVAILABLE, "not_ready")]
    #[case("/health/live", true, true, StatusCode::OK, "alive")]
    #[case("/health/live", true, false, StatusCode::SERVICE_UNAVAILABLE, "shutting_down")]
    #[actix_web::test]
    async fn probes_follow_state(
        #[case] path: &str,
        #[case] ready_flag: bool,
        #[case] alive: bool,
        #[case] expected: StatusCode,
        #[case] status: &str,
    ) {
        let state = web::Data::new(HealthState::new(RecordStore::Memory));
        if ready_flag {
            state.mark_ready();
        }
        if !alive {
            state.mark_unhealthy();
        }
        let app =
            test::init_service(App::new().app_data(state).service(ready).service(live)).await;

        let res = test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await;

        assert_eq!(res.status(), expected);
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], status);
        assert_eq!(body["store"], "memory");
    }

    #[actix_web::test]
    async fn probe_names_the_postgres_store() {
        let state = web::Data::new(HealthState::new(RecordStore::Postgres));
        state.mark_ready();
        let app = test::init_service(App::new().app_data(state).service(ready)).await;

        let body: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;

        assert_eq!(body["store"], "postgres");
    }
}
