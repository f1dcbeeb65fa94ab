//! Port for customer rows and the units they own.

use async_trait::async_trait;

use crate::domain::{Customer, CustomerFields, CustomerId, NewUnit, Unit, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by customer repository adapters.
    pub enum CustomerRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "customer repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "customer repository query failed: {message}",
    }
}

/// Port for writing customers with their units and reading them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a customer and all of its units as one unit of work.
    ///
    /// Either every row is written or none is.
    async fn create_with_units(
        &self,
        fields: &CustomerFields,
        units: &[NewUnit],
        created_by: &UserId,
    ) -> Result<(Customer, Vec<Unit>), CustomerRepositoryError>;

    /// Load one customer.
    async fn find_by_id(
        &self,
        id: &CustomerId,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;

    /// Units owned by a customer, oldest first.
    async fn units_for_customer(
        &self,
        id: &CustomerId,
    ) -> Result<Vec<Unit>, CustomerRepositoryError>;

    /// Overwrite the scalar fields of an existing customer.
    ///
    /// Returns `None` when no customer has the given id.
    async fn update_fields(
        &self,
        id: &CustomerId,
        fields: &CustomerFields,
    ) -> Result<Option<Customer>, CustomerRepositoryError>;
}
