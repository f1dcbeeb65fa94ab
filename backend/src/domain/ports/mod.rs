//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`, [`CustomerSearch`], [`CustomerProfileSource`])
//! are implemented by outbound adapters. Driving ports ([`LoginService`],
//! [`CustomerIntakeCommand`], [`JobIntakeCommand`], [`ProfileCommand`]) are
//! what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod customer_intake_command;
mod customer_profile_source;
mod customer_repository;
mod customer_search;
mod job_intake_command;
mod job_repository;
mod login_service;
mod profile_command;
mod user_role_repository;

pub use customer_intake_command::{
    CustomerIntakeCommand, CustomerIntakeOutcome, CustomerIntakeSubmission,
};
#[cfg(test)]
pub use customer_profile_source::MockCustomerProfileSource;
pub use customer_profile_source::{CustomerProfileSource, CustomerProfileSourceError};
#[cfg(test)]
pub use customer_repository::MockCustomerRepository;
pub use customer_repository::{CustomerRepository, CustomerRepositoryError};
#[cfg(test)]
pub use customer_search::MockCustomerSearch;
pub use customer_search::{CustomerSearch, CustomerSearchError};
pub use job_intake_command::{JobIntakeCommand, JobIntakeOutcome, JobIntakeSubmission};
#[cfg(test)]
pub use job_repository::MockJobRepository;
pub use job_repository::{JobRepository, JobRepositoryError};
pub use login_service::{FixtureLoginService, LoginService};
pub use profile_command::{CustomerEditForm, ProfileCommand};
#[cfg(test)]
pub use user_role_repository::MockUserRoleRepository;
pub use user_role_repository::{UserRoleRepository, UserRoleRepositoryError};
