//! Row-to-domain conversions shared by the Diesel adapters.
//!
//! Conversions that can fail return a plain message so each adapter can wrap
//! it in its own port error.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{
    Customer, CustomerFields, CustomerFieldsDraft, CustomerId, CustomerProfile, Job, JobId,
    JobItem, ProfileJob, Unit, UnitId, UserId,
};

use super::models::{CustomerRow, JobItemRow, JobRow, UnitRow};

/// Revalidate stored customer fields through the domain constructor.
pub(crate) fn row_to_customer(row: CustomerRow) -> Result<Customer, String> {
    let fields = CustomerFields::try_from(CustomerFieldsDraft {
        first_name: row.first_name,
        last_name: row.last_name,
        middle_initial: row.middle_initial.unwrap_or_default(),
        address: row.address,
        phone_number: row.phone_number,
        email: row.email,
    })
    .map_err(|err| format!("stored customer {} is invalid: {err}", row.id))?;

    Ok(Customer {
        id: CustomerId::from_uuid(row.id),
        fields,
        created_at: row.created_at,
        updated_at: row.updated_at,
        created_by: row.created_by.map(UserId::from_uuid),
    })
}

pub(crate) fn row_to_unit(row: UnitRow) -> Unit {
    Unit {
        id: UnitId::from_uuid(row.id),
        customer_id: CustomerId::from_uuid(row.customer_id),
        brand: row.brand,
        model: row.model,
        year: row.year,
        plate_number: row.plate_number,
        created_at: row.created_at,
        updated_at: row.updated_at,
    }
}

pub(crate) fn row_to_job(row: JobRow) -> Job {
    Job {
        id: JobId::from_uuid(row.id),
        customer_id: CustomerId::from_uuid(row.customer_id),
        unit_id: UnitId::from_uuid(row.unit_id),
        work_date: row.work_date,
        duration_hours: row.duration_hours,
        remarks: row.remarks,
        created_at: row.created_at,
        updated_at: row.updated_at,
        created_by: UserId::from_uuid(row.created_by),
    }
}

pub(crate) fn row_to_job_item(row: JobItemRow) -> JobItem {
    JobItem {
        id: row.id,
        job_id: JobId::from_uuid(row.job_id),
        description: row.description,
        products_used: row.products_used,
        created_at: row.created_at,
    }
}

/// Customer object inside the profile document; keys are column names.
#[derive(Debug, Deserialize)]
struct CustomerDocument {
    id: Uuid,
    first_name: String,
    last_name: String,
    middle_initial: Option<String>,
    address: String,
    phone_number: String,
    email: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    created_by: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct JobDocument {
    id: Uuid,
    work_date: NaiveDate,
    duration_hours: f64,
    remarks: Option<String>,
    unit: Unit,
    items: Vec<JobItem>,
    created_at: DateTime<Utc>,
}

/// Shape produced by `get_customer_profile`.
#[derive(Debug, Deserialize)]
struct ProfileDocument {
    customer: CustomerDocument,
    units: Vec<Unit>,
    jobs: Vec<JobDocument>,
}

/// Decode the `jsonb` profile aggregate, keeping job order as returned.
pub(crate) fn decode_profile_document(
    document: serde_json::Value,
) -> Result<CustomerProfile, String> {
    let ProfileDocument {
        customer,
        units,
        jobs,
    } = serde_json::from_value(document).map_err(|err| format!("decode profile: {err}"))?;

    let customer = row_to_customer(CustomerRow {
        id: customer.id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        middle_initial: customer.middle_initial,
        address: customer.address,
        phone_number: customer.phone_number,
        email: customer.email,
        created_at: customer.created_at,
        updated_at: customer.updated_at,
        created_by: customer.created_by,
    })?;
    let jobs = jobs
        .into_iter()
        .map(|job| ProfileJob {
            id: JobId::from_uuid(job.id),
            work_date: job.work_date,
            duration_hours: job.duration_hours,
            remarks: job.remarks,
            unit: job.unit,
            items: job.items,
            created_at: job.created_at,
        })
        .collect();

    Ok(CustomerProfile {
        customer,
        units,
        jobs,
    })
}
