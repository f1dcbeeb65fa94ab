//! Customer profile aggregate through the `get_customer_profile` SQL function.

use async_trait::async_trait;
use diesel::sql_query;
use diesel::sql_types::Uuid as SqlUuid;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CustomerProfileSource, CustomerProfileSourceError};
use crate::domain::{CustomerId, CustomerProfile};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::ProfileDocumentRow;
use super::pool::{DbPool, PoolError};
use super::row_mapping::decode_profile_document;

const PROFILE_SQL: &str = "SELECT get_customer_profile($1) AS profile";

/// Diesel-backed implementation of the profile source port.
#[derive(Clone)]
pub struct DieselCustomerProfileSource {
    pool: DbPool,
}

impl DieselCustomerProfileSource {
    /// Create a new adapter with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CustomerProfileSourceError {
    map_basic_pool_error(error, |message| {
        CustomerProfileSourceError::connection(message)
    })
}

fn map_diesel_error(error: diesel::result::Error) -> CustomerProfileSourceError {
    map_basic_diesel_error(
        error,
        CustomerProfileSourceError::query,
        CustomerProfileSourceError::connection,
    )
}

#[async_trait]
impl CustomerProfileSource for DieselCustomerProfileSource {
    async fn fetch(
        &self,
        id: &CustomerId,
    ) -> Result<Option<CustomerProfile>, CustomerProfileSourceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: ProfileDocumentRow = sql_query(PROFILE_SQL)
            .bind::<SqlUuid, _>(id.as_uuid())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row.profile
            .map(decode_profile_document)
            .transpose()
            .map_err(CustomerProfileSourceError::query)
    }
}
