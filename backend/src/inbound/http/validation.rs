//! Shared validation helpers for inbound HTTP adapters.
//!
//! Path and body identifiers arrive as strings; these helpers turn malformed
//! values into `invalid_request` errors carrying the offending field.

use serde_json::json;
use uuid::Uuid;

use crate::domain::{CustomerId, Error, JobId, UnitId};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidUuid,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidUuid => "invalid_uuid",
        }
    }
}

pub(crate) fn missing_field_error(field: &str) -> Error {
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_uuid_error(field: &str, value: &str) -> Error {
    Error::invalid_request(format!("{field} must be a valid UUID")).with_details(json!({
        "field": field,
        "value": value,
        "code": ErrorCode::InvalidUuid.as_str(),
    }))
}

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, Error> {
    Uuid::parse_str(value.trim()).map_err(|_| invalid_uuid_error(field, value))
}

pub(crate) fn parse_customer_id(value: &str, field: &str) -> Result<CustomerId, Error> {
    parse_uuid(value, field).map(CustomerId::from_uuid)
}

pub(crate) fn parse_unit_id(value: &str, field: &str) -> Result<UnitId, Error> {
    parse_uuid(value, field).map(UnitId::from_uuid)
}

pub(crate) fn parse_job_id(value: &str, field: &str) -> Result<JobId, Error> {
    parse_uuid(value, field).map(JobId::from_uuid)
}

/// Parse an optional identifier; blank strings count as absent.
pub(crate) fn parse_optional<T>(
    value: Option<&str>,
    field: &str,
    parse: impl FnOnce(&str, &str) -> Result<T, Error>,
) -> Result<Option<T>, Error> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse(raw, field).map(Some),
    }
}
