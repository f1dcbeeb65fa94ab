//! Domain primitives, aggregates and the services behind the shop workflow.
//!
//! Purpose: define strongly typed entities for customers, their motorcycle
//! units, service jobs and staff roles, plus the intake and profile services
//! that the HTTP layer drives. Storage is reached only through
//! [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: error envelope shared by every layer.
//! - Customer, Unit, Job, JobItem: persisted entities with validated drafts.
//! - CustomerIntakeService, JobIntakeService, ProfileService: use-cases.
//! - RoleGate: per-request role resolution.

pub mod auth;
pub mod customer;
pub mod customer_intake;
pub mod delete_confirmation;
pub mod error;
pub mod job;
pub mod job_intake;
pub mod navigation;
pub mod ports;
pub mod profile;
pub mod profile_service;
pub mod role_gate;
pub mod trace_id;
pub mod unit;
pub mod user;

pub use self::auth::{LoginCredentials, LoginValidationError};
pub use self::customer::{
    Customer, CustomerField, CustomerFields, CustomerFieldsDraft, CustomerId,
    CustomerValidationError, MiddleInitial,
};
pub use self::customer_intake::{
    CustomerIntakeForm, CustomerIntakeService, NO_COMPLETE_UNITS_MESSAGE, UnitField,
};
pub use self::delete_confirmation::{DELETE_FAILED_MESSAGE, DeleteJobControl, DeletePhase};
pub use self::error::{Error, ErrorCode};
pub use self::job::{
    DurationHours, Job, JobId, JobItem, JobItemDraft, JobValidationError, MIN_DURATION_HOURS,
    NewJob, NewJobItem, format_duration, format_long_date, parse_work_date,
};
pub use self::job_intake::{
    CustomerSearchResult, ItemField, JobIntakeForm, JobIntakeService, SearchOutcome, SearchQuery,
    SearchSession, UnitFetchTicket,
};
pub use self::navigation::{Redirect, profile_path};
pub use self::profile::{CustomerProfile, ItemLine, JobCard, ProfileJob, ProfileView, UnitLine};
pub use self::profile_service::{CUSTOMER_NOT_FOUND_MESSAGE, ProfileService};
pub use self::role_gate::RoleGate;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::unit::{
    MIN_MODEL_YEAR, ModelYear, NewUnit, PlateNumber, Unit, UnitDraft, UnitId, UnitValidationError,
};
pub use self::user::{UserId, UserRole, UserRoleRecord, UserValidationError};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use avmoto_crm::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("admin role required"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
