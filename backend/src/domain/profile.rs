//! Customer profile aggregate and its rendered view.
//!
//! The aggregate arrives from the profile source already assembled and
//! ordered. Rendering never re-sorts it: jobs appear exactly in the order the
//! source returned them (newest first for the bundled adapters).

use chrono::{DateTime, NaiveDate, Utc};

use super::navigation::profile_path;
use super::{
    Customer, CustomerId, JobId, JobItem, Unit, UnitId, UserRole, format_duration,
    format_long_date,
};

/// One job inside the profile aggregate, with its unit snapshot and items.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileJob {
    pub id: JobId,
    pub work_date: NaiveDate,
    pub duration_hours: f64,
    pub remarks: Option<String>,
    pub unit: Unit,
    pub items: Vec<JobItem>,
    pub created_at: DateTime<Utc>,
}

/// Customer with all units and all jobs.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerProfile {
    pub customer: Customer,
    pub units: Vec<Unit>,
    pub jobs: Vec<ProfileJob>,
}

/// Unit line in the profile view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitLine {
    pub id: UnitId,
    pub description: String,
    pub plate_number: String,
}

/// Work item line in the profile view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemLine {
    pub description: String,
    pub products_used: Option<String>,
}

/// Job card in the profile view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub id: JobId,
    pub work_date: String,
    pub duration: String,
    pub unit: String,
    pub items: Vec<ItemLine>,
    pub remarks: Option<String>,
    pub created_at: String,
}

/// Display-ready profile with role-dependent affordances.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileView {
    pub customer_id: CustomerId,
    pub display_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub units: Vec<UnitLine>,
    pub jobs: Vec<JobCard>,
    /// Link to the edit form, present for admins only.
    pub edit_path: Option<String>,
    /// Whether each job card carries a delete control.
    pub can_delete_jobs: bool,
}

fn format_created_at(at: DateTime<Utc>) -> String {
    at.format("%B %-d, %Y, %-I:%M %p UTC").to_string()
}

fn job_card(job: &ProfileJob) -> JobCard {
    JobCard {
        id: job.id,
        work_date: format_long_date(job.work_date),
        duration: format_duration(job.duration_hours),
        unit: job.unit.description_with_plate(),
        items: job
            .items
            .iter()
            .map(|item| ItemLine {
                description: item.description.clone(),
                products_used: item
                    .products_used
                    .clone()
                    .filter(|products| !products.trim().is_empty()),
            })
            .collect(),
        remarks: job
            .remarks
            .clone()
            .filter(|remarks| !remarks.trim().is_empty()),
        created_at: format_created_at(job.created_at),
    }
}

impl ProfileView {
    /// Render `profile` for a caller holding `role`.
    pub fn render(profile: &CustomerProfile, role: Option<UserRole>) -> Self {
        let is_admin = role.is_some_and(UserRole::is_admin);
        let fields = &profile.customer.fields;
        Self {
            customer_id: profile.customer.id,
            display_name: fields.display_name(),
            address: fields.address().to_owned(),
            phone_number: fields.phone_number().to_owned(),
            email: fields.email().to_owned(),
            units: profile
                .units
                .iter()
                .map(|unit| UnitLine {
                    id: unit.id,
                    description: unit.description(),
                    plate_number: unit.plate_number.clone(),
                })
                .collect(),
            jobs: profile.jobs.iter().map(job_card).collect(),
            edit_path: is_admin.then(|| format!("{}/edit", profile_path(profile.customer.id))),
            can_delete_jobs: is_admin,
        }
    }
}
