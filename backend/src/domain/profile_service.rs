//! Profile page service: aggregate view plus the admin-only edit and delete
//! actions.
//!
//! Each admin action asks the [`RoleGate`] again; no role decision is carried
//! over from the view that rendered the button.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use super::customer_intake::{map_customer_validation_error, map_repository_error};
use super::ports::{
    CustomerEditForm, CustomerProfileSource, CustomerRepository, JobRepository,
    JobRepositoryError, ProfileCommand,
};
use super::{
    Customer, CustomerFields, CustomerFieldsDraft, CustomerId, Error, JobId, ProfileView,
    Redirect, RoleGate, UserId,
};

/// Message for an unknown or unreadable customer.
pub const CUSTOMER_NOT_FOUND_MESSAGE: &str = "customer not found";
/// Message for deleting a job that no longer exists.
pub const JOB_NOT_FOUND_MESSAGE: &str = "job not found";

fn customer_not_found() -> Error {
    Error::not_found(CUSTOMER_NOT_FOUND_MESSAGE)
}

fn map_job_error(error: JobRepositoryError) -> Error {
    match error {
        JobRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("job store unavailable: {message}"))
        }
        JobRepositoryError::Query { message } => {
            Error::internal(format!("job store error: {message}"))
        }
        JobRepositoryError::UnitMismatch => Error::internal("unexpected unit check on delete"),
    }
}

/// Profile use-cases over the customer, job and profile ports.
pub struct ProfileService<C, J, P> {
    customers: Arc<C>,
    jobs: Arc<J>,
    profiles: Arc<P>,
    gate: RoleGate,
}

impl<C, J, P> ProfileService<C, J, P> {
    /// Create the service.
    pub fn new(customers: Arc<C>, jobs: Arc<J>, profiles: Arc<P>, gate: RoleGate) -> Self {
        Self {
            customers,
            jobs,
            profiles,
            gate,
        }
    }
}

#[async_trait]
impl<C, J, P> ProfileCommand for ProfileService<C, J, P>
where
    C: CustomerRepository,
    J: JobRepository,
    P: CustomerProfileSource,
{
    async fn view(&self, viewer: &UserId, customer_id: &CustomerId) -> Result<ProfileView, Error> {
        let profile = match self.profiles.fetch(customer_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => return Err(customer_not_found()),
            Err(err) => {
                // Fetch failures are shown as not found, not retried.
                warn!(%customer_id, error = %err, "profile fetch failed");
                return Err(customer_not_found());
            }
        };
        let role = self.gate.resolve(Some(viewer)).await;
        Ok(ProfileView::render(&profile, role))
    }

    async fn edit_form(
        &self,
        viewer: &UserId,
        customer_id: &CustomerId,
    ) -> Result<CustomerEditForm, Error> {
        self.gate.require_admin(viewer).await?;
        let customer = self
            .customers
            .find_by_id(customer_id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(customer_not_found)?;
        let units = self
            .customers
            .units_for_customer(customer_id)
            .await
            .map_err(map_repository_error)?;
        Ok(CustomerEditForm { customer, units })
    }

    async fn update_customer(
        &self,
        viewer: &UserId,
        customer_id: &CustomerId,
        fields: CustomerFieldsDraft,
    ) -> Result<(Customer, Redirect), Error> {
        self.gate.require_admin(viewer).await?;
        let fields = CustomerFields::try_from(fields).map_err(map_customer_validation_error)?;
        let customer = self
            .customers
            .update_fields(customer_id, &fields)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(customer_not_found)?;
        info!(%customer_id, editor = %viewer, "customer updated");
        Ok((customer, Redirect::to_profile(*customer_id)))
    }

    async fn delete_job(&self, viewer: &UserId, job_id: &JobId) -> Result<(), Error> {
        self.gate.require_admin(viewer).await?;
        let deleted = self.jobs.delete(job_id).await.map_err(map_job_error)?;
        if !deleted {
            return Err(Error::not_found(JOB_NOT_FOUND_MESSAGE));
        }
        info!(%job_id, deleted_by = %viewer, "job deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "profile_service_tests.rs"]
mod tests;
