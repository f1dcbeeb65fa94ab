//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{http::StatusCode, test};
use serde_json::json;

use crate::domain::ports::FixtureLoginService;
use crate::domain::{UserId, UserRole};
use crate::inbound::http::state::{HttpState, StoreAdapters};
use crate::outbound::memory::MemoryStore;
use crate::test_support::clock_in_year;

/// Build a session middleware configured for tests.
///
/// Generates a fresh key per invocation, names the cookie `session` and
/// disables the `Secure` flag for plain HTTP test requests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// HTTP state over one in-memory store, plus handles for seeding it.
pub struct MemoryBackend {
    pub state: HttpState,
    pub store: Arc<MemoryStore>,
    pub user_id: UserId,
}

/// Wire every use-case over a fresh [`MemoryStore`].
///
/// The fixture account (`admin@avmoto.test` / `password`) is granted `role`
/// when one is given. Model years are checked against 2025.
pub fn memory_backend(role: Option<UserRole>) -> MemoryBackend {
    let clock = clock_in_year(2025);
    let store = Arc::new(MemoryStore::new(Arc::clone(&clock)));
    let login = FixtureLoginService::default();
    let user_id = login.user_id();
    if let Some(role) = role {
        store.seed_role(user_id, role).expect("seed role");
    }

    let state = HttpState::from_adapters(
        Arc::new(login),
        StoreAdapters {
            customers: store.clone(),
            jobs: store.clone(),
            search: store.clone(),
            profiles: store.clone(),
            roles: store.clone(),
        },
        clock,
    );
    MemoryBackend {
        state,
        store,
        user_id,
    }
}

/// Sign in with the fixture account and return the session cookie.
pub async fn login_cookie<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let request = test::TestRequest::post()
        .uri("/api/v1/login")
        .set_json(json!({
            "email": FixtureLoginService::DEFAULT_EMAIL,
            "password": FixtureLoginService::DEFAULT_PASSWORD,
        }))
        .to_request();
    let response = test::call_service(app, request).await;
    assert_eq!(response.status(), StatusCode::OK, "fixture login succeeds");
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie set")
        .into_owned()
}
