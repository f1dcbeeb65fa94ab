//! Customer records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::UserId;

/// Store-assigned customer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(Uuid);

impl CustomerId {
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

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Required customer fields, named for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    FirstName,
    LastName,
    Address,
    PhoneNumber,
    Email,
}

impl CustomerField {
    /// Wire name used in request payloads.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Address => "address",
            Self::PhoneNumber => "phoneNumber",
            Self::Email => "email",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::FirstName => "first name",
            Self::LastName => "last name",
            Self::Address => "address",
            Self::PhoneNumber => "phone number",
            Self::Email => "email",
        }
    }
}

/// Validation failures for customer scalar fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomerValidationError {
    /// A required field was blank.
    #[error("{} must not be empty", .0.label())]
    EmptyField(CustomerField),
}

/// Optional single-character middle initial.
///
/// Input longer than one character keeps only its first character, matching
/// a one-character form input.
///
/// # Examples
/// ```
/// use avmoto_crm::domain::MiddleInitial;
///
/// assert_eq!(MiddleInitial::parse("Santos").map(|m| m.as_char()), Some('S'));
/// assert!(MiddleInitial::parse("  ").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MiddleInitial(char);

impl MiddleInitial {
    /// Keep the first non-blank character, if any.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().chars().next().map(Self)
    }

    /// The initial character.
    pub fn as_char(self) -> char {
        self.0
    }
}

impl fmt::Display for MiddleInitial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Raw customer form values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerFieldsDraft {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
}

/// Validated, trimmed customer scalar fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerFields {
    first_name: String,
    last_name: String,
    middle_initial: Option<MiddleInitial>,
    address: String,
    phone_number: String,
    email: String,
}

fn required(value: &str, field: CustomerField) -> Result<String, CustomerValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(CustomerValidationError::EmptyField(field))
    } else {
        Ok(trimmed.to_owned())
    }
}

impl CustomerFields {
    /// Accessor for the first name.
    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    /// Accessor for the last name.
    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// Accessor for the middle initial.
    pub fn middle_initial(&self) -> Option<MiddleInitial> {
        self.middle_initial
    }

    /// Accessor for the postal address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Accessor for the phone number.
    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    /// Accessor for the email address.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Full name with the middle initial when present, e.g. `Ana M. Cruz`.
    pub fn display_name(&self) -> String {
        match self.middle_initial {
            Some(initial) => format!("{} {initial}. {}", self.first_name, self.last_name),
            None => format!("{} {}", self.first_name, self.last_name),
        }
    }

    /// First and last name only, as shown in the job form search box.
    pub fn short_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

impl TryFrom<CustomerFieldsDraft> for CustomerFields {
    type Error = CustomerValidationError;

    fn try_from(draft: CustomerFieldsDraft) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: required(&draft.first_name, CustomerField::FirstName)?,
            last_name: required(&draft.last_name, CustomerField::LastName)?,
            middle_initial: MiddleInitial::parse(&draft.middle_initial),
            address: required(&draft.address, CustomerField::Address)?,
            phone_number: required(&draft.phone_number, CustomerField::PhoneNumber)?,
            email: required(&draft.email, CustomerField::Email)?,
        })
    }
}

/// Persisted customer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub id: CustomerId,
    pub fields: CustomerFields,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<UserId>,
}

impl Customer {
    /// Full display name, see [`CustomerFields::display_name`].
    pub fn display_name(&self) -> String {
        self.fields.display_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn draft() -> CustomerFieldsDraft {
        CustomerFieldsDraft {
            first_name: " Ana ".to_owned(),
            last_name: "Cruz".to_owned(),
            middle_initial: String::new(),
            address: "12 Rizal St".to_owned(),
            phone_number: "09171234567".to_owned(),
            email: "a@b.com".to_owned(),
        }
    }

    #[rstest]
    fn trims_required_fields(draft: CustomerFieldsDraft) {
        let fields = CustomerFields::try_from(draft).expect("valid fields");
        assert_eq!(fields.first_name(), "Ana");
        assert_eq!(fields.display_name(), "Ana Cruz");
    }

    #[rstest]
    fn display_name_includes_initial(mut draft: CustomerFieldsDraft) {
        draft.middle_initial = "m".to_owned();
        let fields = CustomerFields::try_from(draft).expect("valid fields");
        assert_eq!(fields.display_name(), "Ana m. Cruz");
        assert_eq!(fields.short_name(), "Ana Cruz");
    }

    #[rstest]
    #[case(CustomerField::FirstName)]
    #[case(CustomerField::LastName)]
    #[case(CustomerField::Address)]
    #[case(CustomerField::PhoneNumber)]
    #[case(CustomerField::Email)]
    fn blank_required_field_is_rejected(mut draft: CustomerFieldsDraft, #[case] field: CustomerField) {
        let slot = match field {
            CustomerField::FirstName => &mut draft.first_name,
            CustomerField::LastName => &mut draft.last_name,
            CustomerField::Address => &mut draft.address,
            CustomerField::PhoneNumber => &mut draft.phone_number,
            CustomerField::Email => &mut draft.email,
        };
        *slot = "  ".to_owned();
        assert_eq!(
            CustomerFields::try_from(draft),
            Err(CustomerValidationError::EmptyField(field))
        );
    }

    #[rstest]
    fn error_message_names_field() {
        let err = CustomerValidationError::EmptyField(CustomerField::PhoneNumber);
        assert_eq!(err.to_string(), "phone number must not be empty");
    }
}
