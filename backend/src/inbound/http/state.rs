//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    CustomerIntakeCommand, CustomerProfileSource, CustomerRepository, CustomerSearch,
    JobIntakeCommand, JobRepository, LoginService, ProfileCommand, UserRoleRepository,
};
use crate::domain::{CustomerIntakeService, JobIntakeService, ProfileService, RoleGate};

/// Parameter object bundling the driving ports behind the HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub customer_intake: Arc<dyn CustomerIntakeCommand>,
    pub job_intake: Arc<dyn JobIntakeCommand>,
    pub profiles: Arc<dyn ProfileCommand>,
    pub roles: RoleGate,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub customer_intake: Arc<dyn CustomerIntakeCommand>,
    pub job_intake: Arc<dyn JobIntakeCommand>,
    pub profiles: Arc<dyn ProfileCommand>,
    /// Resolves the caller's role for display-only decisions such as the
    /// dashboard label. Mutating use-cases check roles themselves.
    pub roles: RoleGate,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            customer_intake,
            job_intake,
            profiles,
            roles,
        } = ports;
        Self {
            login,
            customer_intake,
            job_intake,
            profiles,
            roles,
        }
    }
}

/// Driven adapters behind every use-case, usually one storage backend.
pub struct StoreAdapters<C, J, S, P> {
    pub customers: Arc<C>,
    pub jobs: Arc<J>,
    pub search: Arc<S>,
    pub profiles: Arc<P>,
    pub roles: Arc<dyn UserRoleRepository>,
}

impl HttpState {
    /// Build every use-case over `adapters`.
    ///
    /// `clock` bounds the accepted model years at intake.
    pub fn from_adapters<C, J, S, P>(
        login: Arc<dyn LoginService>,
        adapters: StoreAdapters<C, J, S, P>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        C: CustomerRepository + 'static,
        J: JobRepository + 'static,
        S: CustomerSearch + 'static,
        P: CustomerProfileSource + 'static,
    {
        let StoreAdapters {
            customers,
            jobs,
            search,
            profiles,
            roles,
        } = adapters;
        let roles = RoleGate::new(roles);
        Self::new(HttpStatePorts {
            login,
            customer_intake: Arc::new(CustomerIntakeService::new(Arc::clone(&customers), clock)),
            job_intake: Arc::new(JobIntakeService::new(
                Arc::clone(&customers),
                Arc::clone(&jobs),
                search,
            )),
            profiles: Arc::new(ProfileService::new(customers, jobs, profiles, roles.clone())),
            roles,
        })
    }
}
