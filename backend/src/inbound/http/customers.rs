//! Customer intake, lookup, edit and profile handlers.
//!
//! ```text
//! POST /api/v1/customers
//! GET  /api/v1/customers/search?q=cruz
//! GET  /api/v1/customers/{id}
//! PUT  /api/v1/customers/{id}
//! GET  /api/v1/customers/{id}/units
//! GET  /api/v1/customers/{id}/profile
//! ```

use actix_web::{HttpResponse, get, post, put, web};
use serde::Deserialize;
use tracing::info;

use crate::inbound::http::ApiResult;
use crate::inbound::http::customers_dto::{
    CreateCustomerRequest, CustomerCreatedResponse, CustomerEditResponse, CustomerResponse,
    CustomerSearchResponse, CustomerUpdatedResponse, ProfileResponse, SearchParams,
    UnitResponse, UpdateCustomerRequest,
};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_customer_id;

#[derive(Debug, Deserialize)]
struct CustomerPath {
    id: String,
}

/// Register a customer together with at least one complete unit.
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerCreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "createCustomer"
)]
#[post("/customers")]
pub async fn create_customer(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateCustomerRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let form = payload.into_inner().into_form();
    let outcome = state.customer_intake.submit(&actor, form.snapshot()).await?;
    info!(
        customer_id = %outcome.customer.id,
        units = outcome.units.len(),
        "customer registered"
    );
    Ok(HttpResponse::Created().json(CustomerCreatedResponse {
        customer_id: outcome.customer.id.to_string(),
        unit_ids: outcome.units.iter().map(|unit| unit.id.to_string()).collect(),
        redirect: outcome.redirect.into(),
    }))
}

/// Search customers by name, phone, email or plate.
#[utoipa::path(
    get,
    path = "/api/v1/customers/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching customers", body = [CustomerSearchResponse]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "searchCustomers"
)]
#[get("/customers/search")]
pub async fn search_customers(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<CustomerSearchResponse>>> {
    session.require_user_id()?;
    let raw = query.into_inner().q.unwrap_or_default();
    let results = state.job_intake.search_customers(&raw).await?;
    Ok(web::Json(results.iter().map(Into::into).collect()))
}

/// List a customer's units in insertion order.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/units",
    params(("id" = String, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer units", body = [UnitResponse]),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "listCustomerUnits"
)]
#[get("/customers/{id}/units")]
pub async fn list_units(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CustomerPath>,
) -> ApiResult<web::Json<Vec<UnitResponse>>> {
    session.require_user_id()?;
    let customer_id = parse_customer_id(&path.id, "id")?;
    let units = state.job_intake.units_for_customer(&customer_id).await?;
    Ok(web::Json(units.iter().map(Into::into).collect()))
}

/// Rendered customer profile with job history.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}/profile",
    params(("id" = String, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer profile", body = ProfileResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Customer not found", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "getCustomerProfile"
)]
#[get("/customers/{id}/profile")]
pub async fn get_profile(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CustomerPath>,
) -> ApiResult<web::Json<ProfileResponse>> {
    let viewer = session.require_user_id()?;
    let customer_id = parse_customer_id(&path.id, "id")?;
    let view = state.profiles.view(&viewer, &customer_id).await?;
    Ok(web::Json(view.into()))
}

/// Customer record and units for the edit form. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    params(("id" = String, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer edit form", body = CustomerEditResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Customer not found", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "getCustomer"
)]
#[get("/customers/{id}")]
pub async fn get_customer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CustomerPath>,
) -> ApiResult<web::Json<CustomerEditResponse>> {
    let viewer = session.require_user_id()?;
    let customer_id = parse_customer_id(&path.id, "id")?;
    let form = state.profiles.edit_form(&viewer, &customer_id).await?;
    Ok(web::Json(CustomerEditResponse {
        customer: CustomerResponse::from(&form.customer),
        units: form.units.iter().map(Into::into).collect(),
    }))
}

/// Save edited customer fields. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    request_body = UpdateCustomerRequest,
    params(("id" = String, Path, description = "Customer identifier")),
    responses(
        (status = 200, description = "Customer updated", body = CustomerUpdatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Customer not found", body = ErrorSchema)
    ),
    tags = ["customers"],
    operation_id = "updateCustomer"
)]
#[put("/customers/{id}")]
pub async fn update_customer(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<CustomerPath>,
    payload: web::Json<UpdateCustomerRequest>,
) -> ApiResult<web::Json<CustomerUpdatedResponse>> {
    let viewer = session.require_user_id()?;
    let customer_id = parse_customer_id(&path.id, "id")?;
    let (customer, redirect) = state
        .profiles
        .update_customer(&viewer, &customer_id, payload.into_inner().into())
        .await?;
    info!(%customer_id, "customer updated");
    Ok(web::Json(CustomerUpdatedResponse {
        customer: CustomerResponse::from(&customer),
        redirect: redirect.into(),
    }))
}

#[cfg(test)]
#[path = "customers_tests.rs"]
mod tests;
