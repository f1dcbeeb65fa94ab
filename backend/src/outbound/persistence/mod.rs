//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! This module provides concrete implementations of the driven ports backed
//! by PostgreSQL via Diesel with async support through `diesel-async` and
//! `bb8` connection pooling.
//!
//! # Architecture
//!
//! - **Thin adapters**: repositories only translate between Diesel rows and
//!   domain types. Validation rules live in the domain.
//! - **Internal models**: row structs (`models.rs`) and the table definitions
//!   (`schema.rs`) never leave this module.
//! - **Stored procedures**: customer search and profile aggregation are SQL
//!   functions installed by the embedded migrations; the adapters call them
//!   through `sql_query`.
//! - **Strongly typed errors**: pool and Diesel failures map onto each
//!   port's `Connection` / `Query` variants.
//!
//! # Example
//!
//! ```ignore
//! use avmoto_crm::outbound::persistence::{DbPool, DieselCustomerRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/avmoto")).await?;
//! let customers = DieselCustomerRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_customer_profile_source;
mod diesel_customer_repository;
mod diesel_customer_search;
mod diesel_job_repository;
mod diesel_user_role_repository;
mod migrations;
mod models;
mod pool;
mod row_mapping;
mod schema;

pub use diesel_customer_profile_source::DieselCustomerProfileSource;
pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_customer_search::DieselCustomerSearch;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_user_role_repository::DieselUserRoleRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DEFAULT_MAX_CONNECTIONS, DbPool, PoolConfig, PoolError};
