//! Port for service jobs and their items.

use async_trait::async_trait;

use crate::domain::{Job, JobId, JobItem, NewJob};

use super::define_port_error;

define_port_error! {
    /// Errors raised by job repository adapters.
    pub enum JobRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "job repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "job repository query failed: {message}",
        /// The unit is not registered to the job's customer.
        UnitMismatch =>
            "unit does not belong to customer",
    }
}

/// Port for recording and deleting jobs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JobRepository: Send + Sync {
    /// Insert a job and all of its items as one unit of work.
    ///
    /// Fails with [`JobRepositoryError::UnitMismatch`] when the unit belongs
    /// to another customer; nothing is written in that case.
    async fn create_with_items(
        &self,
        job: &NewJob,
    ) -> Result<(Job, Vec<JobItem>), JobRepositoryError>;

    /// Physically delete a job. Its items go with it through the store's
    /// cascade.
    ///
    /// Returns `false` when no job had the given id.
    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError>;
}
