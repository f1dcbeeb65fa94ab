//! PostgreSQL-backed `JobRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;
use uuid::Uuid;

use crate::domain::ports::{JobRepository, JobRepositoryError};
use crate::domain::{Job, JobId, JobItem, NewJob};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{JobItemRow, JobRow, NewJobItemRow, NewJobRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::{row_to_job, row_to_job_item};
use super::schema::{job_items, jobs, units};

/// Diesel-backed implementation of the job repository port.
#[derive(Clone)]
pub struct DieselJobRepository {
    pool: DbPool,
}

impl DieselJobRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> JobRepositoryError {
    map_basic_pool_error(error, |message| JobRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> JobRepositoryError {
    map_basic_diesel_error(
        error,
        JobRepositoryError::query,
        JobRepositoryError::connection,
    )
}

/// Failure inside the create transaction. Any error rolls it back.
#[derive(Debug)]
enum CreateJobError {
    Diesel(diesel::result::Error),
    UnitMismatch,
}

impl From<diesel::result::Error> for CreateJobError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

impl From<CreateJobError> for JobRepositoryError {
    fn from(error: CreateJobError) -> Self {
        match error {
            CreateJobError::Diesel(err) => map_diesel_error(err),
            CreateJobError::UnitMismatch => Self::unit_mismatch(),
        }
    }
}

#[async_trait]
impl JobRepository for DieselJobRepository {
    async fn create_with_items(
        &self,
        job: &NewJob,
    ) -> Result<(Job, Vec<JobItem>), JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let customer_id = *job.customer_id.as_uuid();
        let new_job = NewJobRow {
            customer_id,
            unit_id: *job.unit_id.as_uuid(),
            work_date: job.work_date,
            duration_hours: job.duration.get(),
            remarks: job.remarks.as_deref(),
            created_by: *job.created_by.as_uuid(),
        };

        let positions = (0..job.items.len())
            .map(i32::try_from)
            .collect::<Result<Vec<i32>, _>>()
            .map_err(|_| JobRepositoryError::query("too many items in one job"))?;

        let (job_row, item_rows) = conn
            .transaction(|conn| {
                async move {
                    let owner: Option<Uuid> = units::table
                        .filter(units::id.eq(new_job.unit_id))
                        .select(units::customer_id)
                        .for_share()
                        .first(conn)
                        .await
                        .optional()?;
                    if owner != Some(customer_id) {
                        return Err(CreateJobError::UnitMismatch);
                    }

                    let job_row: JobRow = diesel::insert_into(jobs::table)
                        .values(&new_job)
                        .returning(JobRow::as_returning())
                        .get_result(conn)
                        .await?;
                    let item_values: Vec<NewJobItemRow<'_>> = job
                        .items
                        .iter()
                        .zip(positions)
                        .map(|(item, position)| NewJobItemRow {
                            job_id: job_row.id,
                            description: &item.description,
                            products_used: item.products_used.as_deref(),
                            intake_position: position,
                        })
                        .collect();
                    let item_rows: Vec<JobItemRow> = diesel::insert_into(job_items::table)
                        .values(&item_values)
                        .returning(JobItemRow::as_returning())
                        .get_results(conn)
                        .await?;
                    Ok((job_row, item_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(JobRepositoryError::from)?;

        Ok((
            row_to_job(job_row),
            item_rows.into_iter().map(row_to_job_item).collect(),
        ))
    }

    async fn delete(&self, id: &JobId) -> Result<bool, JobRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // job_items rows go with the job through ON DELETE CASCADE.
        let deleted = diesel::delete(jobs::table.filter(jobs::id.eq(id.as_uuid())))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(deleted > 0)
    }
}
