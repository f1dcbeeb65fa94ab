//! Driving port for the job intake workflow.
//!
//! Covers the two lookups the job form performs while the operator resolves a
//! customer and unit, plus the final submission.

use async_trait::async_trait;

use crate::domain::{
    CustomerId, CustomerSearchResult, Error, Job, JobItem, JobItemDraft, Redirect, Unit, UnitId,
    UserId,
};

/// Immutable snapshot of the job form taken at submit time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobIntakeSubmission {
    pub customer_id: Option<CustomerId>,
    pub unit_id: Option<UnitId>,
    pub work_date: String,
    pub duration_hours: String,
    pub remarks: String,
    pub items: Vec<JobItemDraft>,
}

/// Result of a successful job submission.
#[derive(Debug, Clone, PartialEq)]
pub struct JobIntakeOutcome {
    pub job: Job,
    pub items: Vec<JobItem>,
    pub redirect: Redirect,
}

/// Job intake use-case.
#[async_trait]
pub trait JobIntakeCommand: Send + Sync {
    /// Search customers; queries shorter than two characters match nothing.
    async fn search_customers(&self, query: &str) -> Result<Vec<CustomerSearchResult>, Error>;

    /// Units owned by a customer, oldest first.
    async fn units_for_customer(&self, customer_id: &CustomerId) -> Result<Vec<Unit>, Error>;

    /// Validate the snapshot and persist the job with its complete items.
    async fn submit(
        &self,
        actor: &UserId,
        submission: JobIntakeSubmission,
    ) -> Result<JobIntakeOutcome, Error>;
}
