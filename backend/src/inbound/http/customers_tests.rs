//! Tests for the customer handlers.

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test, web};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::UserRole;
use crate::inbound::http::test_utils::{login_cookie, memory_backend, test_session_middleware};
use crate::inbound::http::users::login;

macro_rules! customers_app {
    ($role:expr) => {{
        let backend = memory_backend($role);
        actix_test::init_service(
            App::new()
                .app_data(web::Data::new(backend.state))
                .wrap(test_session_middleware())
                .service(
                    web::scope("/api/v1")
                        .service(login)
                        .service(create_customer)
                        .service(search_customers)
                        .service(list_units)
                        .service(get_profile)
                        .service(get_customer)
                        .service(update_customer),
                ),
        )
        .await
    }};
}

fn ana_cruz_body() -> Value {
    json!({
        "firstName": "Ana",
        "lastName": "Cruz",
        "middleInitial": "Marie",
        "address": "12 Mabini St, Quezon City",
        "phoneNumber": "09171234567",
        "email": "ana@example.com",
        "units": [
            {"brand": "Honda", "model": "Click 125i", "year": "2021", "plateNumber": "abc123"},
            {"brand": "Yamaha", "model": "", "year": "", "plateNumber": ""}
        ]
    })
}

async fn register<S, B>(app: &S, cookie: &Cookie<'static>) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = actix_test::call_service(
        app,
        actix_test::TestRequest::post()
            .uri("/api/v1/customers")
            .cookie(cookie.clone())
            .set_json(ana_cruz_body())
            .to_request(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let payload: Value = actix_test::read_body_json(response).await;
    payload["customerId"]
        .as_str()
        .expect("customer id")
        .to_owned()
}

#[actix_web::test]
async fn create_drops_incomplete_rows_and_redirects_to_list() {
    let app = customers_app!(None);
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/customers")
            .cookie(cookie)
            .set_json(ana_cruz_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["unitIds"].as_array().map(Vec::len), Some(1));
    assert_eq!(payload["redirect"]["location"], "/dashboard/customers");
    assert_eq!(payload["redirect"]["delayMs"], 2000);
}

#[rstest]
#[case(json!([]), "units", "no_complete_units")]
#[case(
    json!([{"brand": "Honda", "model": "Click", "year": "1899", "plateNumber": "X1"}]),
    "units",
    "invalid_year"
)]
#[actix_web::test]
async fn create_rejects_unusable_units(
    #[case] units: Value,
    #[case] field: &str,
    #[case] code: &str,
) {
    let app = customers_app!(None);
    let cookie = login_cookie(&app).await;
    let mut body = ana_cruz_body();
    body["units"] = units;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/customers")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["details"]["field"], field);
    assert_eq!(payload["details"]["code"], code);
}

#[actix_web::test]
async fn create_reports_blank_required_field() {
    let app = customers_app!(None);
    let cookie = login_cookie(&app).await;
    let mut body = ana_cruz_body();
    body["phoneNumber"] = json!("   ");

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/customers")
            .cookie(cookie)
            .set_json(body)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["details"]["field"], "phoneNumber");
}

#[actix_web::test]
async fn create_requires_a_session() {
    let app = customers_app!(None);

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/api/v1/customers")
            .set_json(ana_cruz_body())
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("cruz", 1)]
#[case("ABC1", 1)]
#[case("c", 0)]
#[case("santos", 0)]
#[actix_web::test]
async fn search_matches_registered_customers(#[case] query: &str, #[case] hits: usize) {
    let app = customers_app!(None);
    let cookie = login_cookie(&app).await;
    let customer_id = register(&app, &cookie).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/customers/search?q={query}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload: Value = actix_test::read_body_json(response).await;
    let results = payload.as_array().expect("array");
    assert_eq!(results.len(), hits);
    if let Some(first) = results.first() {
        assert_eq!(first["customerId"], customer_id.as_str());
        assert_eq!(first["displayName"], "Ana Cruz");
        assert_eq!(first["unitSummary"], "1 motorcycle unit");
    }
}

#[actix_web::test]
async fn units_list_normalised_plate() {
    let app = customers_app!(None);
    let cookie = login_cookie(&app).await;
    let customer_id = register(&app, &cookie).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}/units"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload[0]["plateNumber"], "ABC123");
    assert_eq!(payload[0]["year"], 2021);
    assert_eq!(payload[0]["description"], "2021 Honda Click 125i (ABC123)");
}

#[actix_web::test]
async fn units_reject_malformed_identifier() {
    let app = customers_app!(None);
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/customers/not-a-uuid/units")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["details"]["field"], "id");
}

#[rstest]
#[case(Some(UserRole::Admin), true)]
#[case(Some(UserRole::Staff), false)]
#[case(None, false)]
#[actix_web::test]
async fn profile_exposes_admin_controls_by_role(
    #[case] role: Option<UserRole>,
    #[case] admin: bool,
) {
    let app = customers_app!(role);
    let cookie = login_cookie(&app).await;
    let customer_id = register(&app, &cookie).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}/profile"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["displayName"], "Ana M. Cruz");
    assert_eq!(payload["units"][0]["plateNumber"], "ABC123");
    assert_eq!(payload["jobs"], json!([]));
    assert_eq!(payload["canEdit"], admin);
    assert_eq!(payload["canDelete"], admin);
    assert_eq!(payload["editPath"].is_string(), admin);
}

#[actix_web::test]
async fn unknown_profile_is_not_found() {
    let app = customers_app!(None);
    let cookie = login_cookie(&app).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/v1/customers/9b1f0a52-5c1e-4f7e-9a40-1b2c3d4e5f60/profile")
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case(Some(UserRole::Staff))]
#[case(None)]
#[actix_web::test]
async fn edit_form_is_admin_only(#[case] role: Option<UserRole>) {
    let app = customers_app!(role);
    let cookie = login_cookie(&app).await;
    let customer_id = register(&app, &cookie).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}"))
            .cookie(cookie)
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_web::test]
async fn admin_loads_edit_form_and_saves_changes() {
    let app = customers_app!(Some(UserRole::Admin));
    let cookie = login_cookie(&app).await;
    let customer_id = register(&app, &cookie).await;

    let form = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/api/v1/customers/{customer_id}"))
            .cookie(cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(form.status(), StatusCode::OK);
    let form: Value = actix_test::read_body_json(form).await;
    assert_eq!(form["customer"]["middleInitial"], "M");
    assert_eq!(form["units"].as_array().map(Vec::len), Some(1));

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::put()
            .uri(&format!("/api/v1/customers/{customer_id}"))
            .cookie(cookie)
            .set_json(json!({
                "firstName": "Ana",
                "lastName": "Reyes",
                "middleInitial": "",
                "address": "7 Rizal Ave, Manila",
                "phoneNumber": "09181112222",
                "email": "ana.reyes@example.com"
            }))
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload: Value = actix_test::read_body_json(response).await;
    assert_eq!(payload["customer"]["displayName"], "Ana Reyes");
    assert_eq!(payload["customer"]["middleInitial"], Value::Null);
    assert_eq!(
        payload["redirect"]["location"],
        format!("/dashboard/profiles/{customer_id}")
    );
    assert_eq!(payload["redirect"]["delayMs"], 0);
}
