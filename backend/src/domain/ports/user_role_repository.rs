//! Port for role lookups.

use async_trait::async_trait;

use crate::domain::{UserId, UserRoleRecord};

use super::define_port_error;

define_port_error! {
    /// Errors raised by role repository adapters.
    pub enum UserRoleRepositoryError {
        /// Store connection could not be established.
        Connection { message: String } =>
            "role repository connection failed: {message}",
        /// Lookup failed or the stored role was not recognised.
        Query { message: String } =>
            "role repository query failed: {message}",
    }
}

/// Read access to identity-to-role rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRoleRepository: Send + Sync {
    /// The role row for `user_id`, if one exists.
    async fn find(&self, user_id: &UserId)
    -> Result<Option<UserRoleRecord>, UserRoleRepositoryError>;
}
