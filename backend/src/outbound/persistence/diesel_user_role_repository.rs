//! PostgreSQL-backed `UserRoleRepository`.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserRoleRepository, UserRoleRepositoryError};
use crate::domain::{UserId, UserRole, UserRoleRecord};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::UserRoleRow;
use super::pool::{DbPool, PoolError};
use super::schema::user_roles;

/// Diesel-backed implementation of the role repository port.
#[derive(Clone)]
pub struct DieselUserRoleRepository {
    pool: DbPool,
}

impl DieselUserRoleRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserRoleRepositoryError {
    map_basic_pool_error(error, |message| UserRoleRepositoryError::connection(message))
}

fn map_diesel_error(error: diesel::result::Error) -> UserRoleRepositoryError {
    map_basic_diesel_error(
        error,
        UserRoleRepositoryError::query,
        UserRoleRepositoryError::connection,
    )
}

fn row_to_record(row: UserRoleRow) -> Result<UserRoleRecord, UserRoleRepositoryError> {
    let role = UserRole::from_str(&row.role)
        .map_err(|err| UserRoleRepositoryError::query(err.to_string()))?;
    Ok(UserRoleRecord {
        id: UserId::from_uuid(row.id),
        role,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl UserRoleRepository for DieselUserRoleRepository {
    async fn find(
        &self,
        user_id: &UserId,
    ) -> Result<Option<UserRoleRecord>, UserRoleRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = user_roles::table
            .filter(user_roles::id.eq(user_id.as_uuid()))
            .select(UserRoleRow::as_select())
            .first::<UserRoleRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_record).transpose()
    }
}
