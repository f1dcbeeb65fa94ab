//! Service jobs and their work items.

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::{CustomerId, UnitId, UserId};

/// Shortest bookable job, in hours.
pub const MIN_DURATION_HOURS: f64 = 0.5;

/// Store-assigned job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobId(Uuid);

impl JobId {
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

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Reasons job detail fields are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobValidationError {
    #[error("work date is required")]
    MissingWorkDate,
    #[error("work date must be YYYY-MM-DD, got '{0}'")]
    InvalidWorkDate(String),
    #[error("duration is required")]
    MissingDuration,
    #[error("duration must be a number, got '{0}'")]
    UnparseableDuration(String),
    #[error("duration must be at least 0.5 hours")]
    DurationTooShort,
}

/// Job duration in hours, at least half an hour.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct DurationHours(f64);

impl DurationHours {
    /// Parse duration text such as `1.5`.
    pub fn parse(raw: &str) -> Result<Self, JobValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(JobValidationError::MissingDuration);
        }
        let hours: f64 = trimmed
            .parse()
            .map_err(|_| JobValidationError::UnparseableDuration(trimmed.to_owned()))?;
        Self::new(hours)
    }

    /// Validate a numeric duration.
    pub fn new(hours: f64) -> Result<Self, JobValidationError> {
        if !hours.is_finite() {
            return Err(JobValidationError::UnparseableDuration(hours.to_string()));
        }
        if hours < MIN_DURATION_HOURS {
            return Err(JobValidationError::DurationTooShort);
        }
        Ok(Self(hours))
    }

    /// Hours as a float.
    pub fn get(self) -> f64 {
        self.0
    }
}

/// Render hours with the matching noun: `1 hour`, `1.5 hours`, `3 hours`.
///
/// # Examples
/// ```
/// use avmoto_crm::domain::format_duration;
///
/// assert_eq!(format_duration(1.0), "1 hour");
/// assert_eq!(format_duration(2.5), "2.5 hours");
/// ```
pub fn format_duration(hours: f64) -> String {
    let noun = if (hours - 1.0).abs() < f64::EPSILON {
        "hour"
    } else {
        "hours"
    };
    format!("{hours} {noun}")
}

/// Long-form date such as `March 5, 2024`.
///
/// # Examples
/// ```
/// use avmoto_crm::domain::format_long_date;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
/// assert_eq!(format_long_date(date), "March 5, 2024");
/// ```
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}

/// Parse an ISO calendar date from form text.
pub fn parse_work_date(raw: &str) -> Result<NaiveDate, JobValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(JobValidationError::MissingWorkDate);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|_| JobValidationError::InvalidWorkDate(trimmed.to_owned()))
}

/// One work-item row from the job form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobItemDraft {
    pub description: String,
    pub products_used: String,
}

impl JobItemDraft {
    /// An item counts only when its description is non-blank.
    pub fn is_complete(&self) -> bool {
        !self.description.trim().is_empty()
    }

    /// Convert into an insertable item when complete.
    pub fn to_new_item(&self) -> Option<NewJobItem> {
        if !self.is_complete() {
            return None;
        }
        let products = self.products_used.trim();
        Some(NewJobItem {
            description: self.description.trim().to_owned(),
            products_used: (!products.is_empty()).then(|| products.to_owned()),
        })
    }
}

/// Work item ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewJobItem {
    pub description: String,
    pub products_used: Option<String>,
}

/// Job plus its items, written together.
#[derive(Debug, Clone, PartialEq)]
pub struct NewJob {
    pub customer_id: CustomerId,
    pub unit_id: UnitId,
    pub work_date: NaiveDate,
    pub duration: DurationHours,
    pub remarks: Option<String>,
    pub created_by: UserId,
    pub items: Vec<NewJobItem>,
}

/// Persisted job row.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: JobId,
    pub customer_id: CustomerId,
    pub unit_id: UnitId,
    pub work_date: NaiveDate,
    pub duration_hours: f64,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: UserId,
}

/// Persisted work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobItem {
    pub id: Uuid,
    pub job_id: JobId,
    pub description: String,
    pub products_used: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1.0, "1 hour")]
    #[case(0.5, "0.5 hours")]
    #[case(2.0, "2 hours")]
    #[case(1.5, "1.5 hours")]
    fn duration_noun_matches_quantity(#[case] hours: f64, #[case] expected: &str) {
        assert_eq!(format_duration(hours), expected);
    }

    #[rstest]
    #[case("", JobValidationError::MissingDuration)]
    #[case("abc", JobValidationError::UnparseableDuration("abc".to_owned()))]
    #[case("0.25", JobValidationError::DurationTooShort)]
    #[case("-1", JobValidationError::DurationTooShort)]
    fn invalid_durations_are_rejected(#[case] raw: &str, #[case] expected: JobValidationError) {
        assert_eq!(DurationHours::parse(raw), Err(expected));
    }

    #[rstest]
    fn half_hour_is_accepted() {
        assert_eq!(DurationHours::parse("0.5").map(DurationHours::get), Ok(0.5));
    }

    #[rstest]
    #[case("", JobValidationError::MissingWorkDate)]
    #[case("05/03/2024", JobValidationError::InvalidWorkDate("05/03/2024".to_owned()))]
    fn invalid_work_dates_are_rejected(#[case] raw: &str, #[case] expected: JobValidationError) {
        assert_eq!(parse_work_date(raw), Err(expected));
    }

    #[rstest]
    #[case("Fork rebuild", "", true)]
    #[case("   ", "Fork oil 10W", false)]
    #[case("", "", false)]
    fn items_need_a_description(
        #[case] description: &str,
        #[case] products: &str,
        #[case] expected: bool,
    ) {
        let item = JobItemDraft {
            description: description.to_owned(),
            products_used: products.to_owned(),
        };
        assert_eq!(item.is_complete(), expected);
        assert_eq!(item.to_new_item().is_some(), expected);
    }

    #[rstest]
    fn blank_products_become_none() {
        let item = JobItemDraft {
            description: "Shock service".to_owned(),
            products_used: "  ".to_owned(),
        }
        .to_new_item()
        .expect("complete item");
        assert_eq!(item.products_used, None);
    }

    #[rstest]
    fn long_date_has_no_zero_padding() {
        let date = NaiveDate::from_ymd_opt(2024, 11, 2).expect("valid date");
        assert_eq!(format_long_date(date), "November 2, 2024");
    }
}
