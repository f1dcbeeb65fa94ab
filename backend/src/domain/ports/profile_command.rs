//! Driving port for the profile page and its admin actions.
//!
//! Every operation takes the caller's identity and re-checks the role itself;
//! nothing here trusts a role resolved earlier.

use async_trait::async_trait;

use crate::domain::{
    Customer, CustomerFieldsDraft, CustomerId, Error, JobId, ProfileView, Redirect, Unit, UserId,
};

/// Data backing the edit-customer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerEditForm {
    pub customer: Customer,
    pub units: Vec<Unit>,
}

/// Profile viewing and administration.
#[async_trait]
pub trait ProfileCommand: Send + Sync {
    /// Render the profile for `viewer`.
    async fn view(&self, viewer: &UserId, customer_id: &CustomerId) -> Result<ProfileView, Error>;

    /// Load the edit form. Admin only.
    async fn edit_form(
        &self,
        viewer: &UserId,
        customer_id: &CustomerId,
    ) -> Result<CustomerEditForm, Error>;

    /// Save edited customer fields. Admin only.
    async fn update_customer(
        &self,
        viewer: &UserId,
        customer_id: &CustomerId,
        fields: CustomerFieldsDraft,
    ) -> Result<(Customer, Redirect), Error>;

    /// Delete a job. Admin only.
    async fn delete_job(&self, viewer: &UserId, job_id: &JobId) -> Result<(), Error>;
}
