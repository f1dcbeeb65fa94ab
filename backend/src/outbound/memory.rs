//! In-process store implementing every driven port.
//!
//! Used when the server starts without a database URL and by the HTTP
//! integration tests. Each write takes the single table lock once, so a
//! customer with its units (or a job with its items) appears atomically.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{
    CustomerProfileSource, CustomerProfileSourceError, CustomerRepository,
    CustomerRepositoryError, CustomerSearch, CustomerSearchError, JobRepository,
    JobRepositoryError, UserRoleRepository, UserRoleRepositoryError,
};
use crate::domain::{
    Customer, CustomerFields, CustomerId, CustomerProfile, CustomerSearchResult, Job, JobId,
    JobItem, NewJob, NewUnit, ProfileJob, Unit, UnitId, UserId, UserRole, UserRoleRecord,
};

/// Maximum number of search matches returned, mirroring the SQL function.
const SEARCH_LIMIT: usize = 20;

#[derive(Default)]
struct Tables {
    customers: Vec<Customer>,
    units: Vec<Unit>,
    jobs: Vec<Job>,
    items: Vec<JobItem>,
    roles: HashMap<UserId, UserRoleRecord>,
}

impl Tables {
    fn units_of(&self, customer_id: &CustomerId) -> Vec<Unit> {
        let mut units: Vec<Unit> = self
            .units
            .iter()
            .filter(|unit| unit.customer_id == *customer_id)
            .cloned()
            .collect();
        units.sort_by_key(|unit| unit.created_at);
        units
    }

    fn unit(&self, id: &UnitId) -> Option<&Unit> {
        self.units.iter().find(|unit| unit.id == *id)
    }

    fn items_of(&self, job_id: &JobId) -> Vec<JobItem> {
        self.items
            .iter()
            .filter(|item| item.job_id == *job_id)
            .cloned()
            .collect()
    }

    fn matches(&self, customer: &Customer, needle: &str) -> bool {
        let fields = &customer.fields;
        let full_name = format!("{} {}", fields.first_name(), fields.last_name());
        let text_hit = [
            fields.first_name(),
            fields.last_name(),
            full_name.as_str(),
            fields.phone_number(),
            fields.email(),
        ]
        .iter()
        .any(|value| value.to_lowercase().contains(needle));
        text_hit
            || self.units.iter().any(|unit| {
                unit.customer_id == customer.id && unit.plate_number.to_lowercase().contains(needle)
            })
    }
}

/// Shared in-memory tables behind a single mutex.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl MemoryStore {
    /// Empty store stamping rows with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            clock,
        }
    }

    /// Grant `role` to `user_id`, replacing any previous row.
    pub fn seed_role(&self, user_id: UserId, role: UserRole) -> Result<(), String> {
        let now = self.clock.utc();
        let mut tables = self.lock()?;
        let created_at = tables
            .roles
            .get(&user_id)
            .map_or(now, |existing| existing.created_at);
        tables.roles.insert(
            user_id,
            UserRoleRecord {
                id: user_id,
                role,
                created_at,
                updated_at: now,
            },
        );
        debug!(%user_id, role = role.as_str(), "seeded role");
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, String> {
        self.tables
            .lock()
            .map_err(|_| "memory store lock poisoned".to_owned())
    }
}

#[async_trait]
impl CustomerRepository for MemoryStore {
    async fn create_with_units(
        &self,
        fields: &CustomerFields,
        units: &[NewUnit],
        created_by: &UserId,
    ) -> Result<(Customer, Vec<Unit>), CustomerRepositoryError> {
        let now = self.clock.utc();
        let customer = Customer {
            id: CustomerId::random(),
            fields: fields.clone(),
            created_at: now,
            updated_at: now,
            created_by: Some(*created_by),
        };
        let created_units: Vec<Unit> = units
            .iter()
            .map(|unit| Unit {
                id: UnitId::random(),
                customer_id: customer.id,
                brand: unit.brand.clone(),
                model: unit.model.clone(),
                year: unit.year.get(),
                plate_number: unit.plate_number.as_str().to_owned(),
                created_at: now,
                updated_at: now,
            })
            .collect();

        let mut tables = self.lock().map_err(CustomerRepositoryError::query)?;
        tables.customers.push(customer.clone());
        tables.units.extend(created_units.iter().cloned());
        Ok((customer, created_units))
    }

    async fn find_by_id(
        &self,
        id: &CustomerId,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let tables = self.lock().map_err(CustomerRepositoryError::query)?;
        Ok(tables.customers.iter().find(|c| c.id == *id).cloned())
    }

    async fn units_for_customer(
        &self,
        id: &CustomerId,
    ) -> Result<Vec<Unit>, CustomerRepositoryError> {
        let tables = self.lock().map_err(CustomerRepositoryError::query)?;
        Ok(tables.units_of(id))
    }

    async fn update_fields(
        &self,
        id: &CustomerId,
        fields: &CustomerFields,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.lock().map_err(CustomerRepositoryError::query)?;
        let Some(customer) = tables.customers.iter_mut().find(|c| c.id == *id) else {
            return Ok(None);
        };
        customer.fields = fields.clone();
        customer.updated_at = now;
        Ok(Some(customer.clone()))
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn create_with_items(
        &self,
        job: &NewJob,
    ) -> Result<(Job, Vec<JobItem>), JobRepositoryError> {
        let now = self.clock.utc();
        let mut tables = self.lock().map_err(JobRepositoryError::query)?;
        let owned = tables
            .unit(&job.unit_id)
            .is_some_and(|unit| unit.customer_id == job.customer_id);
        if !owned {
            return Err(JobRepositoryError::unit_mismatch());
        }

        let created = Job {
            id: JobId::random(),
            customer_id: job.customer_id,
            unit_id: job.unit_id,
            work_date: job.work_date,
            duration_hours: job.duration.get(),
            remarks: job.remarks.clone(),
            created_at: now,
            updated_at: now,
            created_by: job.created_by,
        };
        let items: Vec<JobItem> = job
            .items
            .iter()
            .map(|item| JobItem {
                id: Uuid::new_v4(),
                job_id: created.id,
                description: item.description.clone(),
                products_used: item.products_used.clone(),
                created_at: now,
            })
            .collect();

        tables.jobs.push(created.clone());
        tables.items.extend(items.iter().cloned());
        Ok((created, items))
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let mut tables = self.lock().map_err(JobRepositoryError::query)?;
        let before = tables.jobs.len();
        tables.jobs.retain(|job| job.id != *id);
        if tables.jobs.len() == before {
            return Ok(false);
        }
        tables.items.retain(|item| item.job_id != *id);
        Ok(true)
    }
}

#[async_trait]
impl CustomerSearch for MemoryStore {
    async fn search(&self, query: &str) -> Result<Vec<CustomerSearchResult>, CustomerSearchError> {
        let needle = query.to_lowercase();
        let tables = self.lock().map_err(CustomerSearchError::query)?;
        let mut hits: Vec<&Customer> = tables
            .customers
            .iter()
            .filter(|customer| tables.matches(customer, &needle))
            .collect();
        hits.sort_by(|a, b| {
            (a.fields.last_name(), a.fields.first_name(), a.id).cmp(&(
                b.fields.last_name(),
                b.fields.first_name(),
                b.id,
            ))
        });

        Ok(hits
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|customer| {
                let unit_count = tables
                    .units
                    .iter()
                    .filter(|unit| unit.customer_id == customer.id)
                    .count();
                CustomerSearchResult {
                    customer: customer.clone(),
                    unit_count: i64::try_from(unit_count).unwrap_or(i64::MAX),
                }
            })
            .collect())
    }
}

#[async_trait]
impl CustomerProfileSource for MemoryStore {
    async fn fetch(
        &self,
        id: &CustomerId,
    ) -> Result<Option<CustomerProfile>, CustomerProfileSourceError> {
        let tables = self.lock().map_err(CustomerProfileSourceError::query)?;
        let Some(customer) = tables.customers.iter().find(|c| c.id == *id).cloned() else {
            return Ok(None);
        };

        let mut jobs: Vec<&Job> = tables
            .jobs
            .iter()
            .filter(|job| job.customer_id == *id)
            .collect();
        jobs.sort_by(|a, b| {
            b.work_date
                .cmp(&a.work_date)
                .then(b.created_at.cmp(&a.created_at))
        });

        let jobs = jobs
            .into_iter()
            .map(|job| {
                let unit = tables.unit(&job.unit_id).cloned().ok_or_else(|| {
                    CustomerProfileSourceError::query(format!("job {} has no unit", job.id))
                })?;
                Ok(ProfileJob {
                    id: job.id,
                    work_date: job.work_date,
                    duration_hours: job.duration_hours,
                    remarks: job.remarks.clone(),
                    unit,
                    items: tables.items_of(&job.id),
                    created_at: job.created_at,
                })
            })
            .collect::<Result<Vec<_>, CustomerProfileSourceError>>()?;

        Ok(Some(CustomerProfile {
            units: tables.units_of(id),
            customer,
            jobs,
        }))
    }
}

#[async_trait]
impl UserRoleRepository for MemoryStore {
    async fn find(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserRoleRecord>, UserRoleRepositoryError> {
        let tables = self.lock().map_err(UserRoleRepositoryError::query)?;
        Ok(tables.roles.get(user_id).cloned())
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;
