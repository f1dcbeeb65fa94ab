//! Job form state: customer resolution, cascading unit selection and the
//! work-item rows.

use crate::domain::ports::JobIntakeSubmission;
use crate::domain::{CustomerId, JobItemDraft, Unit, UnitId};

use super::search::{CustomerSearchResult, SearchOutcome};

/// Editable field of a work-item row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Description,
    ProductsUsed,
}

/// Handle for one dependent unit fetch. Only the ticket from the most recent
/// customer selection is accepted by [`JobIntakeForm::apply_units`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitFetchTicket {
    generation: u64,
    customer_id: CustomerId,
}

impl UnitFetchTicket {
    /// Customer whose units should be fetched.
    pub fn customer_id(&self) -> CustomerId {
        self.customer_id
    }
}

/// Mutable draft behind the new-job form.
#[derive(Debug, Clone, PartialEq)]
pub struct JobIntakeForm {
    query: String,
    results: Vec<CustomerSearchResult>,
    customer: Option<CustomerId>,
    units: Vec<Unit>,
    unit: Option<UnitId>,
    unit_fetches: u64,
    work_date: String,
    duration_hours: String,
    remarks: String,
    items: Vec<JobItemDraft>,
}

impl Default for JobIntakeForm {
    fn default() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            customer: None,
            units: Vec::new(),
            unit: None,
            unit_fetches: 0,
            work_date: String::new(),
            duration_hours: String::new(),
            remarks: String::new(),
            items: vec![JobItemDraft::default()],
        }
    }
}

impl JobIntakeForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Visible search text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Change the search text. Any customer and unit selection is dropped.
    pub fn set_query(&mut self, value: impl Into<String>) {
        self.query = value.into();
        self.customer = None;
        self.units.clear();
        self.unit = None;
        // Invalidate any unit fetch still in flight.
        self.unit_fetches += 1;
    }

    /// Show the rows of a search that was still current when it returned.
    ///
    /// Rows arriving after a customer was selected are dropped; the list
    /// stays closed until the search text changes again.
    pub fn apply_search(&mut self, outcome: SearchOutcome) {
        if self.customer.is_some() {
            return;
        }
        if let SearchOutcome::Applied(results) = outcome {
            self.results = results;
        }
    }

    /// Rows currently listed under the search box.
    pub fn results(&self) -> &[CustomerSearchResult] {
        &self.results
    }

    /// Lock in a customer from the result list and start a unit fetch.
    pub fn select_customer(&mut self, result: &CustomerSearchResult) -> UnitFetchTicket {
        self.query = result.customer.fields.short_name();
        self.results.clear();
        self.customer = Some(result.customer.id);
        self.units.clear();
        self.unit = None;
        self.unit_fetches += 1;
        UnitFetchTicket {
            generation: self.unit_fetches,
            customer_id: result.customer.id,
        }
    }

    /// Install fetched units if `ticket` is still the latest fetch. A single
    /// unit is selected automatically.
    pub fn apply_units(&mut self, ticket: UnitFetchTicket, units: Vec<Unit>) -> bool {
        if ticket.generation != self.unit_fetches || self.customer != Some(ticket.customer_id) {
            return false;
        }
        self.unit = match units.as_slice() {
            [only] => Some(only.id),
            _ => None,
        };
        self.units = units;
        true
    }

    pub fn selected_customer(&self) -> Option<CustomerId> {
        self.customer
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn selected_unit(&self) -> Option<UnitId> {
        self.unit
    }

    /// Choose one of the loaded units. Unknown ids are ignored.
    pub fn select_unit(&mut self, unit_id: UnitId) -> bool {
        if self.units.iter().any(|unit| unit.id == unit_id) {
            self.unit = Some(unit_id);
            true
        } else {
            false
        }
    }

    /// Job details and work items are only shown once both a customer and a
    /// unit are chosen.
    pub fn details_visible(&self) -> bool {
        self.customer.is_some() && self.unit.is_some()
    }

    pub fn set_work_date(&mut self, value: impl Into<String>) {
        self.work_date = value.into();
    }

    pub fn set_duration_hours(&mut self, value: impl Into<String>) {
        self.duration_hours = value.into();
    }

    pub fn set_remarks(&mut self, value: impl Into<String>) {
        self.remarks = value.into();
    }

    pub fn items(&self) -> &[JobItemDraft] {
        &self.items
    }

    /// Append a blank item row and return its index.
    pub fn add_item(&mut self) -> usize {
        self.items.push(JobItemDraft::default());
        self.items.len() - 1
    }

    /// Remove an item row. The last remaining row is never removed.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if self.items.len() <= 1 || index >= self.items.len() {
            return false;
        }
        self.items.remove(index);
        true
    }

    pub fn update_item(&mut self, index: usize, field: ItemField, value: &str) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        match field {
            ItemField::Description => item.description = value.to_owned(),
            ItemField::ProductsUsed => item.products_used = value.to_owned(),
        }
        true
    }

    /// Freeze the current values for submission.
    pub fn snapshot(&self) -> JobIntakeSubmission {
        JobIntakeSubmission {
            customer_id: self.customer,
            unit_id: self.unit,
            work_date: self.work_date.clone(),
            duration_hours: self.duration_hours.clone(),
            remarks: self.remarks.clone(),
            items: self.items.clone(),
        }
    }
}
