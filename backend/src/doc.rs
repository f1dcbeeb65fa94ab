//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every REST path of the inbound HTTP adapter together
//! with the error envelope schemas and the session cookie security scheme.
//! The document backs Swagger UI in debug builds and is exported by
//! `cargo run --bin openapi-dump`.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::inbound::http::customers_dto::{
    CreateCustomerRequest, CustomerCreatedResponse, CustomerEditResponse, CustomerResponse,
    CustomerSearchResponse, CustomerUpdatedResponse, ProfileItemResponse, ProfileJobResponse,
    ProfileResponse, ProfileUnitResponse, RedirectResponse, UnitRequest, UnitResponse,
    UpdateCustomerRequest,
};
use crate::inbound::http::health::{ProbeResponse, RecordStore};
use crate::inbound::http::jobs::{CreateJobRequest, JobCreatedResponse, JobItemRequest};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use crate::inbound::http::users::{CurrentUserResponse, LoginRequest};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "AV Moto CRM API",
        description = "Customer, motorcycle unit and service job records for the shop dashboard."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::users::logout,
        crate::inbound::http::users::current_user,
        crate::inbound::http::customers::create_customer,
        crate::inbound::http::customers::search_customers,
        crate::inbound::http::customers::list_units,
        crate::inbound::http::customers::get_profile,
        crate::inbound::http::customers::get_customer,
        crate::inbound::http::customers::update_customer,
        crate::inbound::http::jobs::create_job,
        crate::inbound::http::jobs::delete_job,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        CurrentUserResponse,
        UnitRequest,
        CreateCustomerRequest,
        UpdateCustomerRequest,
        RedirectResponse,
        CustomerCreatedResponse,
        CustomerResponse,
        UnitResponse,
        CustomerSearchResponse,
        CustomerEditResponse,
        CustomerUpdatedResponse,
        ProfileUnitResponse,
        ProfileItemResponse,
        ProfileJobResponse,
        ProfileResponse,
        JobItemRequest,
        CreateJobRequest,
        JobCreatedResponse,
        ProbeResponse,
        RecordStore,
    )),
    tags(
        (name = "users", description = "Sign-in and the current identity"),
        (name = "customers", description = "Customer intake, lookup and profiles"),
        (name = "jobs", description = "Service job recording"),
        (name = "health", description = "Readiness and liveness probes")
    )
)]
pub struct ApiDoc;
