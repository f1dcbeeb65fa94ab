//! Customer intake: the draft form and the service that persists it.
//!
//! The form is a plain mutable record with one setter per field. Submission
//! works on an immutable snapshot: incomplete unit rows are dropped without
//! comment, and a snapshot with no complete unit is rejected before the store
//! is touched.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Datelike;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use super::ports::{
    CustomerIntakeCommand, CustomerIntakeOutcome, CustomerIntakeSubmission, CustomerRepository,
    CustomerRepositoryError,
};
use super::{
    CustomerFields, CustomerFieldsDraft, CustomerValidationError, Error, NewUnit, Redirect,
    UnitDraft, UnitValidationError, UserId,
};

/// Message shown when no unit row is complete.
pub const NO_COMPLETE_UNITS_MESSAGE: &str = "Please add at least one complete motorcycle unit";

/// Editable field of a unit row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitField {
    Brand,
    Model,
    Year,
    PlateNumber,
}

/// Mutable draft behind the new-customer form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerIntakeForm {
    fields: CustomerFieldsDraft,
    units: Vec<UnitDraft>,
}

impl Default for CustomerIntakeForm {
    fn default() -> Self {
        Self {
            fields: CustomerFieldsDraft::default(),
            units: vec![UnitDraft::default()],
        }
    }
}

impl CustomerIntakeForm {
    /// Empty form with a single blank unit row.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_first_name(&mut self, value: impl Into<String>) {
        self.fields.first_name = value.into();
    }

    pub fn set_last_name(&mut self, value: impl Into<String>) {
        self.fields.last_name = value.into();
    }

    /// Only the first character is kept.
    pub fn set_middle_initial(&mut self, value: &str) {
        self.fields.middle_initial = value.chars().take(1).collect();
    }

    pub fn set_address(&mut self, value: impl Into<String>) {
        self.fields.address = value.into();
    }

    pub fn set_phone_number(&mut self, value: impl Into<String>) {
        self.fields.phone_number = value.into();
    }

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.fields.email = value.into();
    }

    /// Append a blank unit row and return its index.
    pub fn add_unit(&mut self) -> usize {
        self.units.push(UnitDraft::default());
        self.units.len() - 1
    }

    /// Remove a unit row. The last remaining row is never removed.
    pub fn remove_unit(&mut self, index: usize) -> bool {
        if self.units.len() <= 1 || index >= self.units.len() {
            return false;
        }
        self.units.remove(index);
        true
    }

    /// Update one field of a unit row. Plates are upper-cased as typed.
    pub fn update_unit(&mut self, index: usize, field: UnitField, value: &str) -> bool {
        let Some(unit) = self.units.get_mut(index) else {
            return false;
        };
        match field {
            UnitField::Brand => unit.brand = value.to_owned(),
            UnitField::Model => unit.model = value.to_owned(),
            UnitField::Year => unit.year = value.to_owned(),
            UnitField::PlateNumber => unit.plate_number = value.to_uppercase(),
        }
        true
    }

    /// Current unit rows.
    pub fn units(&self) -> &[UnitDraft] {
        &self.units
    }

    /// Freeze the current values for submission.
    pub fn snapshot(&self) -> CustomerIntakeSubmission {
        CustomerIntakeSubmission {
            fields: self.fields.clone(),
            units: self.units.clone(),
        }
    }
}

pub(crate) fn map_repository_error(error: CustomerRepositoryError) -> Error {
    match error {
        CustomerRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("customer store unavailable: {message}"))
        }
        CustomerRepositoryError::Query { message } => {
            Error::internal(format!("customer store error: {message}"))
        }
    }
}

pub(crate) fn map_customer_validation_error(error: CustomerValidationError) -> Error {
    let CustomerValidationError::EmptyField(field) = &error;
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": field.wire_name(),
        "code": "empty_field",
    }))
}

fn map_unit_validation_error(index: usize, error: UnitValidationError) -> Error {
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "units",
        "index": index,
        "code": "invalid_year",
    }))
}

/// Select complete unit rows and validate them, keeping original row indices
/// in error details.
fn validate_units(units: &[UnitDraft], current_year: i32) -> Result<Vec<NewUnit>, Error> {
    let valid: Vec<NewUnit> = units
        .iter()
        .enumerate()
        .filter(|(_, unit)| unit.is_complete())
        .map(|(index, unit)| {
            unit.validate(current_year)
                .map_err(|err| map_unit_validation_error(index, err))
        })
        .collect::<Result<_, _>>()?;
    if valid.is_empty() {
        return Err(
            Error::invalid_request(NO_COMPLETE_UNITS_MESSAGE).with_details(json!({
                "field": "units",
                "code": "no_complete_units",
            })),
        );
    }
    Ok(valid)
}

/// Customer intake service implementing [`CustomerIntakeCommand`].
#[derive(Clone)]
pub struct CustomerIntakeService<R> {
    customers: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CustomerIntakeService<R> {
    /// Create the service over a customer repository and a clock used for the
    /// model-year bound.
    pub fn new(customers: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { customers, clock }
    }
}

#[async_trait]
impl<R> CustomerIntakeCommand for CustomerIntakeService<R>
where
    R: CustomerRepository,
{
    async fn submit(
        &self,
        actor: &UserId,
        submission: CustomerIntakeSubmission,
    ) -> Result<CustomerIntakeOutcome, Error> {
        let CustomerIntakeSubmission { fields, units } = submission;
        let units = validate_units(&units, self.clock.utc().year())?;
        let fields = CustomerFields::try_from(fields).map_err(map_customer_validation_error)?;

        let (customer, units) = self
            .customers
            .create_with_units(&fields, &units, actor)
            .await
            .map_err(map_repository_error)?;

        info!(customer_id = %customer.id, units = units.len(), "customer created");
        Ok(CustomerIntakeOutcome {
            customer,
            units,
            redirect: Redirect::to_customer_list(),
        })
    }
}

#[cfg(test)]
#[path = "customer_intake_tests.rs"]
mod tests;
