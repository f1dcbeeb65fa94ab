//! Motorcycle units owned by customers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::CustomerId;

/// Earliest accepted model year.
pub const MIN_MODEL_YEAR: i32 = 1900;

/// Store-assigned unit identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(Uuid);

impl UnitId {
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

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reasons a complete unit row cannot be accepted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitValidationError {
    /// Year text is not an integer.
    #[error("year must be a whole number, got '{0}'")]
    UnparseableYear(String),
    /// Year lies outside the plausible range.
    #[error("year must be between {min} and {max}, got {year}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

/// Model year bounded to `1900..=current_year + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModelYear(i32);

impl ModelYear {
    /// Parse year text against the current calendar year.
    ///
    /// # Examples
    /// ```
    /// use avmoto_crm::domain::ModelYear;
    ///
    /// assert_eq!(ModelYear::parse("2021", 2025).map(|y| y.get()), Ok(2021));
    /// assert!(ModelYear::parse("2027", 2025).is_err());
    /// assert!(ModelYear::parse("twenty", 2025).is_err());
    /// ```
    pub fn parse(raw: &str, current_year: i32) -> Result<Self, UnitValidationError> {
        let trimmed = raw.trim();
        let year: i32 = trimmed
            .parse()
            .map_err(|_| UnitValidationError::UnparseableYear(trimmed.to_owned()))?;
        let max = current_year.saturating_add(1);
        if !(MIN_MODEL_YEAR..=max).contains(&year) {
            return Err(UnitValidationError::YearOutOfRange {
                year,
                min: MIN_MODEL_YEAR,
                max,
            });
        }
        Ok(Self(year))
    }

    /// The numeric year.
    pub fn get(self) -> i32 {
        self.0
    }
}

/// Plate number normalised to upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlateNumber(String);

impl PlateNumber {
    /// Trim and upper-case a plate.
    ///
    /// # Examples
    /// ```
    /// use avmoto_crm::domain::PlateNumber;
    ///
    /// assert_eq!(PlateNumber::normalise(" abc123 ").as_str(), "ABC123");
    /// ```
    pub fn normalise(raw: &str) -> Self {
        Self(raw.trim().to_uppercase())
    }

    /// Borrow the normalised text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One candidate unit row from the intake form; every field is raw text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UnitDraft {
    pub brand: String,
    pub model: String,
    pub year: String,
    pub plate_number: String,
}

impl UnitDraft {
    /// A row counts only when all four fields hold non-blank text.
    pub fn is_complete(&self) -> bool {
        [&self.brand, &self.model, &self.year, &self.plate_number]
            .iter()
            .all(|value| !value.trim().is_empty())
    }

    /// Convert a complete row into a validated unit.
    pub fn validate(&self, current_year: i32) -> Result<NewUnit, UnitValidationError> {
        Ok(NewUnit {
            brand: self.brand.trim().to_owned(),
            model: self.model.trim().to_owned(),
            year: ModelYear::parse(&self.year, current_year)?,
            plate_number: PlateNumber::normalise(&self.plate_number),
        })
    }
}

/// Validated unit ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUnit {
    pub brand: String,
    pub model: String,
    pub year: ModelYear,
    pub plate_number: PlateNumber,
}

/// Persisted unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub customer_id: CustomerId,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Unit {
    /// `year brand model`, e.g. `2021 Honda Click`.
    pub fn description(&self) -> String {
        format!("{} {} {}", self.year, self.brand, self.model)
    }

    /// Description followed by the plate, e.g. `2021 Honda Click (ABC123)`.
    pub fn description_with_plate(&self) -> String {
        format!("{} ({})", self.description(), self.plate_number)
    }
}
