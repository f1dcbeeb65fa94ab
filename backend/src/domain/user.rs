//! Staff identities and their roles.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for user identity values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier was blank.
    #[error("user id must not be empty")]
    EmptyId,
    /// Identifier was not a UUID.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Role text was not one of the known roles.
    #[error("unknown role: {0}")]
    UnknownRole(String),
}

/// Opaque identity key issued by the identity provider.
///
/// # Examples
/// ```
/// use avmoto_crm::domain::UserId;
///
/// let id = UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").unwrap();
/// assert_eq!(id.to_string(), "3fa85f64-5717-4562-b3fc-2c963f66afa6");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse an identifier from text.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref().trim();
        if raw.is_empty() {
            return Err(UserValidationError::EmptyId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Borrow the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Role granted to a staff account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Front-desk and workshop staff.
    Staff,
    /// Administrators may edit customers and delete jobs.
    Admin,
}

impl UserRole {
    /// Storage representation of the role.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }

    /// Whether this role unlocks admin-only affordances.
    pub fn is_admin(self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Dashboard label for an optional role. No role renders as staff.
    ///
    /// # Examples
    /// ```
    /// use avmoto_crm::domain::UserRole;
    ///
    /// assert_eq!(UserRole::label(Some(UserRole::Admin)), "Admin");
    /// assert_eq!(UserRole::label(None), "Staff");
    /// ```
    pub fn label(role: Option<Self>) -> &'static str {
        match role {
            Some(Self::Admin) => "Admin",
            Some(Self::Staff) | None => "Staff",
        }
    }
}

impl FromStr for UserRole {
    type Err = UserValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            other => Err(UserValidationError::UnknownRole(other.to_owned())),
        }
    }
}

/// Row mapping an identity to a role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRoleRecord {
    /// Identity the role belongs to.
    pub id: UserId,
    /// Granted role.
    pub role: UserRole,
    /// Row creation time.
    pub created_at: DateTime<Utc>,
    /// Last change time.
    pub updated_at: DateTime<Utc>,
}
