//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Jsonb, Nullable, Text, Timestamptz};
use uuid::Uuid;

use super::schema::{customers, job_items, jobs, units, user_roles};

// ---------------------------------------------------------------------------
// Customers
// ---------------------------------------------------------------------------

/// Row struct for reading from the customers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<Uuid>,
}

/// Insertable struct for new customers; id and timestamps come from column
/// defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub(crate) struct NewCustomerRow<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub middle_initial: Option<String>,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub created_by: Uuid,
}

/// Changeset for editing a customer's scalar fields.
///
/// A cleared middle initial must be written as `NULL`, not skipped.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CustomerUpdate<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub middle_initial: Option<String>,
    pub address: &'a str,
    pub phone_number: &'a str,
    pub email: &'a str,
    pub updated_at: DateTime<Utc>,
}

/// Row returned by the `search_customers` SQL function.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct CustomerSearchRow {
    #[diesel(sql_type = diesel::sql_types::Uuid)]
    pub id: Uuid,
    #[diesel(sql_type = Text)]
    pub first_name: String,
    #[diesel(sql_type = Text)]
    pub last_name: String,
    #[diesel(sql_type = Nullable<Text>)]
    pub middle_initial: Option<String>,
    #[diesel(sql_type = Text)]
    pub address: String,
    #[diesel(sql_type = Text)]
    pub phone_number: String,
    #[diesel(sql_type = Text)]
    pub email: String,
    #[diesel(sql_type = Timestamptz)]
    pub created_at: DateTime<Utc>,
    #[diesel(sql_type = Timestamptz)]
    pub updated_at: DateTime<Utc>,
    #[diesel(sql_type = Nullable<diesel::sql_types::Uuid>)]
    pub created_by: Option<Uuid>,
    #[diesel(sql_type = BigInt)]
    pub unit_count: i64,
}

impl CustomerSearchRow {
    /// Split into the plain customer row and its unit count.
    pub fn into_parts(self) -> (CustomerRow, i64) {
        (
            CustomerRow {
                id: self.id,
                first_name: self.first_name,
                last_name: self.last_name,
                middle_initial: self.middle_initial,
                address: self.address,
                phone_number: self.phone_number,
                email: self.email,
                created_at: self.created_at,
                updated_at: self.updated_at,
                created_by: self.created_by,
            },
            self.unit_count,
        )
    }
}

/// Single-column result of the `get_customer_profile` SQL function.
#[derive(Debug, Clone, QueryableByName)]
pub(crate) struct ProfileDocumentRow {
    #[diesel(sql_type = Nullable<Jsonb>)]
    pub profile: Option<serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Row struct for reading from the units table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = units)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UnitRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for new units.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = units)]
pub(crate) struct NewUnitRow<'a> {
    pub customer_id: Uuid,
    pub brand: &'a str,
    pub model: &'a str,
    pub year: i32,
    pub plate_number: &'a str,
    pub intake_position: i32,
}

// ---------------------------------------------------------------------------
// Jobs and job items
// ---------------------------------------------------------------------------

/// Row struct for reading from the jobs table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = jobs)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub unit_id: Uuid,
    pub work_date: NaiveDate,
    pub duration_hours: f64,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
}

/// Insertable struct for new jobs.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = jobs)]
pub(crate) struct NewJobRow<'a> {
    pub customer_id: Uuid,
    pub unit_id: Uuid,
    pub work_date: NaiveDate,
    pub duration_hours: f64,
    pub remarks: Option<&'a str>,
    pub created_by: Uuid,
}

/// Row struct for reading from the job_items table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = job_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct JobItemRow {
    pub id: Uuid,
    pub job_id: Uuid,
    pub description: String,
    pub products_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for new job items.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = job_items)]
pub(crate) struct NewJobItemRow<'a> {
    pub job_id: Uuid,
    pub description: &'a str,
    pub products_used: Option<&'a str>,
    pub intake_position: i32,
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Row struct for reading from the user_roles table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = user_roles)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRoleRow {
    pub id: Uuid,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
