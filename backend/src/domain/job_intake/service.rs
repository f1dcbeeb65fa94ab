//! Job intake service implementing [`JobIntakeCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::customer_intake::map_repository_error as map_customer_error;
use crate::domain::ports::{
    CustomerRepository, CustomerSearch, CustomerSearchError,
    JobIntakeCommand, JobIntakeOutcome, JobIntakeSubmission, JobRepository, JobRepositoryError,
};
use crate::domain::{
    CustomerId, DurationHours, Error, JobValidationError, NewJob, NewJobItem, Redirect, Unit,
    UserId, parse_work_date,
};

use super::search::{CustomerSearchResult, SearchQuery};

pub const SELECT_CUSTOMER_MESSAGE: &str = "Please select a customer";
pub const SELECT_UNIT_MESSAGE: &str = "Please select a unit";
pub const NO_JOB_ITEMS_MESSAGE: &str = "Please add at least one job item";
pub const UNIT_MISMATCH_MESSAGE: &str = "unit does not belong to customer";

fn missing(message: &str, field: &str) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": "required",
    }))
}

fn map_job_validation_error(error: JobValidationError) -> Error {
    let (field, code) = match &error {
        JobValidationError::MissingWorkDate => ("workDate", "required"),
        JobValidationError::InvalidWorkDate(_) => ("workDate", "invalid_date"),
        JobValidationError::MissingDuration => ("durationHours", "required"),
        JobValidationError::UnparseableDuration(_) => ("durationHours", "invalid_number"),
        JobValidationError::DurationTooShort => ("durationHours", "too_short"),
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field,
        "code": code,
    }))
}

fn map_search_error(error: CustomerSearchError) -> Error {
    match error {
        CustomerSearchError::Connection { message } => {
            Error::service_unavailable(format!("customer search unavailable: {message}"))
        }
        CustomerSearchError::Query { message } => {
            Error::internal(format!("customer search error: {message}"))
        }
    }
}

fn map_job_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("job store unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("job store error: {message}"))
        }
        JobRepositoryError::UnitMismatch => Error::invalid_request(UNIT_MISMATCH_MESSAGE)
            .with_details(json!({"field": "unitId", "code": "unit_mismatch"})),
    }
}

/// Turn a form snapshot into an insertable job, checking in the order the
/// form presents its sections.
fn validate(actor: &UserId, submission: JobIntakeSubmission) -> Result<NewJob, Error> {
    let customer_id = submission
        .customer_id
        .ok_or_else(|| missing(SELECT_CUSTOMER_MESSAGE, "customerId"))?;
    let unit_id = submission
        .unit_id
        .ok_or_else(|| missing(SELECT_UNIT_MESSAGE, "unitId"))?;
    let items: Vec<NewJobItem> = submission
        .items
        .iter()
        .filter_map(|item| item.to_new_item())
        .collect();
    if items.is_empty() {
        return Err(missing(NO_JOB_ITEMS_MESSAGE, "items"));
    }
    let work_date = parse_work_date(&submission.work_date).map_err(map_job_validation_error)?;
    let duration =
        DurationHours::parse(&submission.duration_hours).map_err(map_job_validation_error)?;
    let remarks = submission.remarks.trim();

    Ok(NewJob {
        customer_id,
        unit_id,
        work_date,
        duration,
        remarks: (!remarks.is_empty()).then(|| remarks.to_owned()),
        created_by: *actor,
        items,
    })
}

/// Job intake over the customer, job and search ports.
pub struct JobIntakeService<C, J, S> {
    customers: Arc<C>,
    jobs: Arc<J>,
    search: Arc<S>,
}

impl<C, J, S> JobIntakeService<C, J, S> {
    pub fn new(customers: Arc<C>, jobs: Arc<J>, search: Arc<S>) -> Self {
        Self {
            customers,
            jobs,
            search,
        }
    }
}

impl<C, J, S> Clone for JobIntakeService<C, J, S> {
    fn clone(&self) -> Self {
        Self {
            customers: Arc::clone(&self.customers),
            jobs: Arc::clone(&self.jobs),
            search: Arc::clone(&self.search),
        }
    }
}

#[async_trait]
impl<C, J, S> JobIntakeCommand for JobIntakeService<C, J, S>
where
    C: CustomerRepository,
    J: JobRepository,
    S: CustomerSearch,
{
    async fn search_customers(&self, query: &str) -> Result<Vec<CustomerSearchResult>, Error> {
        let Some(query) = SearchQuery::parse(query) else {
            return Ok(Vec::new());
        };
        self.search
            .search(query.as_str())
            .await
            .map_err(map_search_error)
    }

    async fn units_for_customer(&self, customer_id: &CustomerId) -> Result<Vec<Unit>, Error> {
        self.customers
            .units_for_customer(customer_id)
            .await
            .map_err(map_customer_error)
    }

    async fn submit(
        &self,
        actor: &UserId,
        submission: JobIntakeSubmission,
    ) -> Result<JobIntakeOutcome, Error> {
        let new_job = validate(actor, submission)?;
        let (job, items) = self
            .jobs
            .create_with_items(&new_job)
            .await
            .map_err(map_job_error)?;

        info!(job_id = %job.id, customer_id = %job.customer_id, items = items.len(), "job recorded");
        Ok(JobIntakeOutcome {
            job,
            items,
            redirect: Redirect::to_dashboard(),
        })
    }
}
