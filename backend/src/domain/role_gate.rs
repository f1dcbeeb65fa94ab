//! Per-request role resolution.
//!
//! The gate never caches: each call performs a fresh lookup so a role change
//! takes effect on the next request. Lookup failures and missing rows both
//! resolve to "no role", the least privileged display state.

use std::sync::Arc;

use tracing::warn;

use super::ports::UserRoleRepository;
use super::{Error, UserId, UserRole};

/// Resolves the caller's role from the role store.
#[derive(Clone)]
pub struct RoleGate {
    roles: Arc<dyn UserRoleRepository>,
}

impl RoleGate {
    /// Build a gate over a role repository.
    pub fn new(roles: Arc<dyn UserRoleRepository>) -> Self {
        Self { roles }
    }

    /// Role of `identity`, or `None` when there is no identity, no row, or
    /// the lookup fails.
    pub async fn resolve(&self, identity: Option<&UserId>) -> Option<UserRole> {
        let user_id = identity?;
        match self.roles.find(user_id).await {
            Ok(record) => record.map(|record| record.role),
            Err(error) => {
                warn!(%user_id, %error, "role lookup failed; treating caller as having no role");
                None
            }
        }
    }

    /// Fail with `forbidden` unless `identity` resolves to admin.
    pub async fn require_admin(&self, identity: &UserId) -> Result<(), Error> {
        match self.resolve(Some(identity)).await {
            Some(UserRole::Admin) => Ok(()),
            _ => Err(Error::forbidden("admin role required")),
        }
    }
}
