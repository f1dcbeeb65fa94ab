//! Port for the profile aggregation procedure.

use async_trait::async_trait;

use crate::domain::{CustomerId, CustomerProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by profile source adapters.
    pub enum CustomerProfileSourceError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "profile source connection failed: {message}",
        /// Aggregation failed or returned a malformed document.
        Query { message: String } =>
            "profile aggregation failed: {message}",
    }
}

/// Source of assembled customer profiles.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerProfileSource: Send + Sync {
    /// Customer, units, and jobs (newest first, items embedded).
    ///
    /// Returns `None` for an unknown customer.
    async fn fetch(
        &self,
        id: &CustomerId,
    ) -> Result<Option<CustomerProfile>, CustomerProfileSourceError>;
}
