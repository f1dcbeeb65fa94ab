//! PostgreSQL-backed `CustomerRepository` implementation using Diesel ORM.
//!
//! The customer row and its unit rows are inserted in one transaction, so a
//! failed unit insert leaves no orphaned customer behind.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::AsyncConnection as _;
use diesel_async::RunQueryDsl;
use diesel_async::scoped_futures::ScopedFutureExt as _;

use crate::domain::ports::{CustomerRepository, CustomerRepositoryError};
use crate::domain::{Customer, CustomerFields, CustomerId, NewUnit, Unit, UserId};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{CustomerRow, CustomerUpdate, NewCustomerRow, NewUnitRow, UnitRow};
use super::pool::{DbPool, PoolError};
use super::row_mapping::{row_to_customer, row_to_unit};
use super::schema::{customers, units};

/// Diesel-backed implementation of the customer repository port.
#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerRepositoryError {
    map_basic_pool_error(error, |message| {
        CustomerRepositoryError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CustomerRepositoryError {
    map_basic_diesel_error(
        error,
        CustomerRepositoryError::query,
        CustomerRepositoryError::connection,
    )
}

fn to_customer(row: CustomerRow) -> Result<Customer, CustomerRepositoryError> {
    row_to_customer(row).map_err(CustomerRepositoryError::query)
}

fn middle_initial_text(fields: &CustomerFields) -> Option<String> {
    fields
        .middle_initial()
        .map(|initial| initial.as_char().to_string())
}

#[async_trait]
impl CustomerRepository for DieselCustomerRepository {
    async fn create_with_units(
        &self,
        fields: &CustomerFields,
        new_units: &[NewUnit],
        created_by: &UserId,
    ) -> Result<(Customer, Vec<Unit>), CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_customer = NewCustomerRow {
            first_name: fields.first_name(),
            last_name: fields.last_name(),
            middle_initial: middle_initial_text(fields),
            address: fields.address(),
            phone_number: fields.phone_number(),
            email: fields.email(),
            created_by: *created_by.as_uuid(),
        };

        let positions = (0..new_units.len())
            .map(i32::try_from)
            .collect::<Result<Vec<i32>, _>>()
            .map_err(|_| CustomerRepositoryError::query("too many units in one intake"))?;

        let (customer_row, unit_rows) = conn
            .transaction(|conn| {
                async move {
                    let customer_row: CustomerRow = diesel::insert_into(customers::table)
                        .values(&new_customer)
                        .returning(CustomerRow::as_returning())
                        .get_result(conn)
                        .await?;
                    let unit_values: Vec<NewUnitRow<'_>> = new_units
                        .iter()
                        .zip(positions)
                        .map(|(unit, position)| NewUnitRow {
                            customer_id: customer_row.id,
                            brand: &unit.brand,
                            model: &unit.model,
                            year: unit.year.get(),
                            plate_number: unit.plate_number.as_str(),
                            intake_position: position,
                        })
                        .collect();
                    let unit_rows: Vec<UnitRow> = diesel::insert_into(units::table)
                        .values(&unit_values)
                        .returning(UnitRow::as_returning())
                        .get_results(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>((customer_row, unit_rows))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        let customer = to_customer(customer_row)?;
        Ok((customer, unit_rows.into_iter().map(row_to_unit).collect()))
    }

    async fn find_by_id(
        &self,
        id: &CustomerId,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = customers::table
            .filter(customers::id.eq(id.as_uuid()))
            .select(CustomerRow::as_select())
            .first::<CustomerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_customer).transpose()
    }

    async fn units_for_customer(
        &self,
        id: &CustomerId,
    ) -> Result<Vec<Unit>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<UnitRow> = units::table
            .filter(units::customer_id.eq(id.as_uuid()))
            .order((
                units::created_at.asc(),
                units::intake_position.asc(),
                units::id.asc(),
            ))
            .select(UnitRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(row_to_unit).collect())
    }

    async fn update_fields(
        &self,
        id: &CustomerId,
        fields: &CustomerFields,
    ) -> Result<Option<Customer>, CustomerRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let changes = CustomerUpdate {
            first_name: fields.first_name(),
            last_name: fields.last_name(),
            middle_initial: middle_initial_text(fields),
            address: fields.address(),
            phone_number: fields.phone_number(),
            email: fields.email(),
            updated_at: Utc::now(),
        };

        let row = diesel::update(customers::table.filter(customers::id.eq(id.as_uuid())))
            .set(&changes)
            .returning(CustomerRow::as_returning())
            .get_result::<CustomerRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(to_customer).transpose()
    }
}
