//! End-to-end workflow through the JSON API over the in-memory store.
//!
//! Registers a customer with a lower-case plate, records a job against the
//! unit, reads the profile back and deletes the job as an admin.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};

use avmoto_crm::Trace;
use avmoto_crm::domain::UserRole;
use avmoto_crm::domain::ports::FixtureLoginService;
use avmoto_crm::inbound::http::customers::{
    create_customer, get_profile, list_units, search_customers,
};
use avmoto_crm::inbound::http::jobs::{create_job, delete_job};
use avmoto_crm::inbound::http::state::{HttpState, StoreAdapters};
use avmoto_crm::inbound::http::users::{current_user, login};
use avmoto_crm::outbound::memory::MemoryStore;

fn memory_state(role: Option<UserRole>) -> HttpState {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let store = Arc::new(MemoryStore::new(Arc::clone(&clock)));
    let login_service = FixtureLoginService::default();
    if let Some(role) = role {
        store.seed_role(login_service.user_id(), role).expect("seed role");
    }
    HttpState::from_adapters(
        Arc::new(login_service),
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

macro_rules! crm_app {
    ($role:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(memory_state($role)))
                .wrap(Trace)
                .service(
                    web::scope("/api/v1")
                        .wrap(
                            SessionMiddleware::builder(
                                CookieSessionStore::default(),
                                Key::generate(),
                            )
                            .cookie_name("session".to_owned())
                            .cookie_secure(false)
                            .build(),
                        )
                        .service(login)
                        .service(current_user)
                        .service(create_customer)
                        .service(search_customers)
                        .service(list_units)
                        .service(get_profile)
                        .service(create_job)
                        .service(delete_job),
                ),
        )
        .await
    };
}

async fn sign_in<S, B>(app: &S) -> Cookie<'static>
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/login")
            .set_json(json!({
                "email": FixtureLoginService::DEFAULT_EMAIL,
                "password": FixtureLoginService::DEFAULT_PASSWORD,
            }))
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    response
        .response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .expect("session cookie")
        .into_owned()
}

async fn send<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body = test::read_body(response).await;
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("json body")
    };
    (status, value)
}

#[actix_web::test]
async fn customer_unit_and_job_round_trip() {
    let app = crm_app!(Some(UserRole::Admin));
    let cookie = sign_in(&app).await;

    let (status, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/customers")
            .cookie(cookie.clone())
            .set_json(json!({
                "firstName": "Ana",
                "lastName": "Cruz",
                "address": "12 Rizal St, Quezon City",
                "phoneNumber": "09171234567",
                "email": "a@b.com",
                "units": [
                    {"brand": "Honda", "model": "Click", "year": "2021", "plateNumber": "abc123"},
                    {"brand": "Suzuki", "model": "Raider", "year": "", "plateNumber": "zz1"}
                ]
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let customer_id = created["customerId"].as_str().expect("customer id").to_owned();

    let (status, hits) = send(
        &app,
        test::TestRequest::get()
            .uri("/api/v1/customers/search?q=abc")
            .cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits[0]["customerId"], customer_id.as_str());
    assert_eq!(hits[0]["unitSummary"], "1 motorcycle unit");

    let (_, units) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}/units"))
            .cookie(cookie.clone()),
    )
    .await;
    let unit_id = units[0]["id"].as_str().expect("unit id").to_owned();

    let (status, job) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/jobs")
            .cookie(cookie.clone())
            .set_json(json!({
                "customerId": customer_id,
                "unitId": unit_id,
                "workDate": "2024-03-05",
                "durationHours": "2",
                "remarks": "Customer waited",
                "items": [{"description": "Replace brake pads", "productsUsed": ""}]
            })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let job_id = job["jobId"].as_str().expect("job id").to_owned();

    let (status, profile) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}/profile"))
            .cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["displayName"], "Ana Cruz");
    assert_eq!(profile["units"].as_array().map(Vec::len), Some(1));
    assert_eq!(profile["units"][0]["plateNumber"], "ABC123");
    assert_eq!(profile["units"][0]["description"], "2021 Honda Click");
    assert_eq!(profile["jobs"][0]["id"], job_id.as_str());
    assert_eq!(profile["jobs"][0]["workDate"], "March 5, 2024");
    assert_eq!(profile["jobs"][0]["duration"], "2 hours");
    assert_eq!(profile["jobs"][0]["items"][0]["productsUsed"], Value::Null);
    assert_eq!(profile["canDelete"], true);

    let (status, _) = send(
        &app,
        test::TestRequest::delete()
            .uri(&format!("/api/v1/jobs/{job_id}"))
            .cookie(cookie.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, profile) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}/profile"))
            .cookie(cookie),
    )
    .await;
    assert_eq!(profile["jobs"], json!([]));
}

#[actix_web::test]
async fn errors_carry_the_response_trace_id() {
    let app = crm_app!(None);

    let response = test::call_service(
        &app,
        test::TestRequest::get().uri("/api/v1/me").to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let header = response
        .headers()
        .get("trace-id")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .expect("trace id header");
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["traceId"], header.as_str());
}

#[actix_web::test]
async fn staff_profile_hides_admin_controls() {
    let app = crm_app!(Some(UserRole::Staff));
    let cookie = sign_in(&app).await;

    let (_, created) = send(
        &app,
        test::TestRequest::post()
            .uri("/api/v1/customers")
            .cookie(cookie.clone())
            .set_json(json!({
                "firstName": "Ben",
                "lastName": "Reyes",
                "address": "3 Luna St",
                "phoneNumber": "09181234567",
                "email": "ben@example.com",
                "units": [{"brand": "Yamaha", "model": "Mio", "year": "2019", "plateNumber": "mio19"}]
            })),
    )
    .await;
    let customer_id = created["customerId"].as_str().expect("customer id");

    let (status, profile) = send(
        &app,
        test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}/profile"))
            .cookie(cookie),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["canEdit"], false);
    assert_eq!(profile["canDelete"], false);
    assert_eq!(profile["editPath"], Value::Null);
}
