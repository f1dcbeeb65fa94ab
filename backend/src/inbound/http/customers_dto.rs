//! Request and response bodies for the customer endpoints.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Customer, CustomerFieldsDraft, CustomerIntakeForm, CustomerSearchResult, ItemLine, JobCard,
    ProfileView, Redirect, Unit, UnitField, UnitLine,
};

/// One motorcycle row of the intake form. Blank fields are allowed; rows
/// with any blank field are dropped on submit.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UnitRequest {
    #[schema(example = "Honda")]
    pub brand: String,
    #[schema(example = "Click 125i")]
    pub model: String,
    #[schema(example = "2021")]
    pub year: String,
    #[schema(example = "abc123")]
    pub plate_number: String,
}

/// Body of `POST /api/v1/customers`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    #[schema(example = "Ana")]
    pub first_name: String,
    #[schema(example = "Cruz")]
    pub last_name: String,
    #[schema(example = "M")]
    pub middle_initial: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub units: Vec<UnitRequest>,
}

impl CreateCustomerRequest {
    /// Replay the payload through the intake form so request bodies get the
    /// same normalisation as typed input.
    pub fn into_form(self) -> CustomerIntakeForm {
        let mut form = CustomerIntakeForm::new();
        form.set_first_name(self.first_name);
        form.set_last_name(self.last_name);
        form.set_middle_initial(&self.middle_initial);
        form.set_address(self.address);
        form.set_phone_number(self.phone_number);
        form.set_email(self.email);

        for (index, unit) in self.units.iter().enumerate() {
            if index > 0 {
                form.add_unit();
            }
            form.update_unit(index, UnitField::Brand, &unit.brand);
            form.update_unit(index, UnitField::Model, &unit.model);
            form.update_unit(index, UnitField::Year, &unit.year);
            form.update_unit(index, UnitField::PlateNumber, &unit.plate_number);
        }
        form
    }
}

/// Body of `PUT /api/v1/customers/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCustomerRequest {
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
}

impl From<UpdateCustomerRequest> for CustomerFieldsDraft {
    fn from(value: UpdateCustomerRequest) -> Self {
        Self {
            first_name: value.first_name,
            last_name: value.last_name,
            middle_initial: value.middle_initial,
            address: value.address,
            phone_number: value.phone_number,
            email: value.email,
        }
    }
}

/// Post-success navigation instruction.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RedirectResponse {
    #[schema(example = "/dashboard/customers")]
    pub location: String,
    #[schema(example = 2000)]
    pub delay_ms: u64,
}

impl From<Redirect> for RedirectResponse {
    fn from(value: Redirect) -> Self {
        Self {
            location: value.location,
            delay_ms: u64::try_from(value.delay.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Response of `POST /api/v1/customers`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerCreatedResponse {
    pub customer_id: String,
    pub unit_ids: Vec<String>,
    pub redirect: RedirectResponse,
}

/// Stored customer.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub middle_initial: Option<String>,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    #[schema(example = "Ana M. Cruz")]
    pub display_name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Customer> for CustomerResponse {
    fn from(value: &Customer) -> Self {
        let fields = &value.fields;
        Self {
            id: value.id.to_string(),
            first_name: fields.first_name().to_owned(),
            last_name: fields.last_name().to_owned(),
            middle_initial: fields.middle_initial().map(|initial| initial.to_string()),
            address: fields.address().to_owned(),
            phone_number: fields.phone_number().to_owned(),
            email: fields.email().to_owned(),
            display_name: value.display_name(),
            created_at: value.created_at.to_rfc3339(),
            updated_at: value.updated_at.to_rfc3339(),
        }
    }
}

/// Stored motorcycle unit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnitResponse {
    pub id: String,
    pub customer_id: String,
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub plate_number: String,
    #[schema(example = "2021 Honda Click 125i (ABC123)")]
    pub description: String,
}

impl From<&Unit> for UnitResponse {
    fn from(value: &Unit) -> Self {
        Self {
            id: value.id.to_string(),
            customer_id: value.customer_id.to_string(),
            brand: value.brand.clone(),
            model: value.model.clone(),
            year: value.year,
            plate_number: value.plate_number.clone(),
            description: value.description_with_plate(),
        }
    }
}

/// Query string of `GET /api/v1/customers/search`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free text; fewer than two characters after trimming matches nothing.
    pub q: Option<String>,
}

/// One search hit.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSearchResponse {
    pub customer_id: String,
    #[schema(example = "Ana Cruz")]
    pub display_name: String,
    pub phone_number: String,
    pub unit_count: i64,
    #[schema(example = "2 motorcycle units")]
    pub unit_summary: String,
}

impl From<&CustomerSearchResult> for CustomerSearchResponse {
    fn from(value: &CustomerSearchResult) -> Self {
        Self {
            customer_id: value.customer.id.to_string(),
            display_name: value.customer.fields.short_name(),
            phone_number: value.customer.fields.phone_number().to_owned(),
            unit_count: value.unit_count,
            unit_summary: value.unit_summary(),
        }
    }
}

/// Response of `GET /api/v1/customers/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerEditResponse {
    pub customer: CustomerResponse,
    pub units: Vec<UnitResponse>,
}

/// Response of `PUT /api/v1/customers/{id}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdatedResponse {
    pub customer: CustomerResponse,
    pub redirect: RedirectResponse,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUnitResponse {
    pub id: String,
    #[schema(example = "2021 Honda Click 125i")]
    pub description: String,
    pub plate_number: String,
}

impl From<UnitLine> for ProfileUnitResponse {
    fn from(value: UnitLine) -> Self {
        Self {
            id: value.id.to_string(),
            description: value.description,
            plate_number: value.plate_number,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileItemResponse {
    pub description: String,
    pub products_used: Option<String>,
}

impl From<ItemLine> for ProfileItemResponse {
    fn from(value: ItemLine) -> Self {
        Self {
            description: value.description,
            products_used: value.products_used,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileJobResponse {
    pub id: String,
    #[schema(example = "March 5, 2025")]
    pub work_date: String,
    #[schema(example = "1.5 hours")]
    pub duration: String,
    pub unit: String,
    pub items: Vec<ProfileItemResponse>,
    pub remarks: Option<String>,
    pub created_at: String,
}

impl From<JobCard> for ProfileJobResponse {
    fn from(value: JobCard) -> Self {
        Self {
            id: value.id.to_string(),
            work_date: value.work_date,
            duration: value.duration,
            unit: value.unit,
            items: value.items.into_iter().map(Into::into).collect(),
            remarks: value.remarks,
            created_at: value.created_at,
        }
    }
}

/// Response of `GET /api/v1/customers/{id}/profile`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub customer_id: String,
    pub display_name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub units: Vec<ProfileUnitResponse>,
    pub jobs: Vec<ProfileJobResponse>,
    pub edit_path: Option<String>,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl From<ProfileView> for ProfileResponse {
    fn from(value: ProfileView) -> Self {
        Self {
            customer_id: value.customer_id.to_string(),
            display_name: value.display_name,
            address: value.address,
            phone_number: value.phone_number,
            email: value.email,
            units: value.units.into_iter().map(Into::into).collect(),
            jobs: value.jobs.into_iter().map(Into::into).collect(),
            can_edit: value.edit_path.is_some(),
            edit_path: value.edit_path,
            can_delete: value.can_delete_jobs,
        }
    }
}
