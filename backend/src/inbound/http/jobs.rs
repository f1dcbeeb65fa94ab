//! Job recording and deletion handlers.
//!
//! ```text
//! POST   /api/v1/jobs
//! DELETE /api/v1/jobs/{id}
//! ```

use actix_web::{HttpResponse, delete, post, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::domain::ports::JobIntakeSubmission;
use crate::domain::{Error, JobItemDraft};
use crate::inbound::http::ApiResult;
use crate::inbound::http::customers_dto::RedirectResponse;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    parse_customer_id, parse_job_id, parse_optional, parse_unit_id,
};

/// One work line. Lines with a blank description are dropped.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct JobItemRequest {
    #[schema(example = "Change oil")]
    pub description: String,
    #[schema(example = "Motul 10W-40")]
    pub products_used: String,
}

/// Body of `POST /api/v1/jobs`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateJobRequest {
    pub customer_id: Option<String>,
    pub unit_id: Option<String>,
    #[schema(example = "2025-03-05")]
    pub work_date: String,
    #[schema(example = "1.5")]
    pub duration_hours: String,
    pub remarks: String,
    pub items: Vec<JobItemRequest>,
}

impl CreateJobRequest {
    fn into_submission(self) -> Result<JobIntakeSubmission, Error> {
        let customer_id =
            parse_optional(self.customer_id.as_deref(), "customerId", parse_customer_id)?;
        let unit_id = parse_optional(self.unit_id.as_deref(), "unitId", parse_unit_id)?;
        Ok(JobIntakeSubmission {
            customer_id,
            unit_id,
            work_date: self.work_date,
            duration_hours: self.duration_hours,
            remarks: self.remarks,
            items: self
                .items
                .into_iter()
                .map(|item| JobItemDraft {
                    description: item.description,
                    products_used: item.products_used,
                })
                .collect(),
        })
    }
}

/// Response of `POST /api/v1/jobs`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JobCreatedResponse {
    pub job_id: String,
    pub item_count: usize,
    pub redirect: RedirectResponse,
}

#[derive(Debug, Deserialize)]
struct JobPath {
    id: String,
}

/// Record a service job with its work items.
#[utoipa::path(
    post,
    path = "/api/v1/jobs",
    request_body = CreateJobRequest,
    responses(
        (status = 201, description = "Job recorded", body = JobCreatedResponse),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "createJob"
)]
#[post("/jobs")]
pub async fn create_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<CreateJobRequest>,
) -> ApiResult<HttpResponse> {
    let actor = session.require_user_id()?;
    let submission = payload.into_inner().into_submission()?;
    let outcome = state.job_intake.submit(&actor, submission).await?;
    Ok(HttpResponse::Created().json(JobCreatedResponse {
        job_id: outcome.job.id.to_string(),
        item_count: outcome.items.len(),
        redirect: outcome.redirect.into(),
    }))
}

/// Delete a job and its items. Admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/jobs/{id}",
    params(("id" = String, Path, description = "Job identifier")),
    responses(
        (status = 204, description = "Job deleted"),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Admin role required", body = ErrorSchema),
        (status = 404, description = "Job not found", body = ErrorSchema)
    ),
    tags = ["jobs"],
    operation_id = "deleteJob"
)]
#[delete("/jobs/{id}")]
pub async fn delete_job(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<JobPath>,
) -> ApiResult<HttpResponse> {
    let viewer = session.require_user_id()?;
    let job_id = parse_job_id(&path.id, "id")?;
    state.profiles.delete_job(&viewer, &job_id).await?;
    info!(%job_id, "job delete acknowledged");
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
#[path = "jobs_tests.rs"]
mod tests;
