//! Customer search through the `search_customers` SQL function.
//!
//! Matching and ordering are decided by the function; this adapter only binds
//! the query and converts rows.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::Text;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomerSearch, CustomerSearchError};
use crate::domain::CustomerSearchResult;

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::CustomerSearchRow;
use super::pool::{DbPool, PoolError};
use super::row_mapping::row_to_customer;

const SEARCH_SQL: &str = r#"
SELECT id, first_name, last_name, middle_initial, address, phone_number, email,
       created_at, updated_at, created_by, unit_count
FROM search_customers($1)
"#;

/// Diesel-backed implementation of the customer search port.
#[derive(Clone)]
pub struct DieselCustomerSearch {
    pool: DbPool,
}

impl DieselCustomerSearch {
    /// Create a new adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerSearchError {
    map_basic_pool_error(error, |message| CustomerSearchError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> CustomerSearchError {
    map_basic_diesel_error(
        error,
        CustomerSearchError::query,
        CustomerSearchError::connection,
    )
}

#[async_trait]
impl CustomerSearch for DieselCustomerSearch {
    async fn search(&self, query: &str) -> Result<Vec<CustomerSearchResult>, CustomerSearchError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CustomerSearchRow> = sql_query(SEARCH_SQL)
            .bind::<Text, _>(query)
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter()
            .map(|row| {
                let (customer, unit_count) = row.into_parts();
                row_to_customer(customer).map(|customer| CustomerSearchResult {
                    customer,
                    unit_count,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(CustomerSearchError::query)
    }
}
