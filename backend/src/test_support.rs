//! Shared fixtures for unit tests inside the crate.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Customer, CustomerFields, CustomerFieldsDraft, CustomerId, Unit, UnitDraft, UnitId, UserId,
};

/// Clock frozen at a fixed instant.
pub struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

/// Noon on 1 June of `year`.
pub fn clock_in_year(year: i32) -> Arc<dyn Clock> {
    let utc_now = Utc
        .with_ymd_and_hms(year, 6, 1, 12, 0, 0)
        .single()
        .expect("valid fixture timestamp");
    Arc::new(FixtureClock { utc_now })
}

pub fn ana_cruz_draft() -> CustomerFieldsDraft {
    CustomerFieldsDraft {
        first_name: "Ana".to_owned(),
        last_name: "Cruz".to_owned(),
        middle_initial: String::new(),
        address: "12 Rizal St, Quezon City".to_owned(),
        phone_number: "09171234567".to_owned(),
        email: "a@b.com".to_owned(),
    }
}

pub fn honda_click_draft() -> UnitDraft {
    UnitDraft {
        brand: "Honda".to_owned(),
        model: "Click".to_owned(),
        year: "2021".to_owned(),
        plate_number: "abc123".to_owned(),
    }
}

pub fn customer(id: CustomerId) -> Customer {
    Customer {
        id,
        fields: CustomerFields::try_from(ana_cruz_draft()).expect("fixture fields are valid"),
        created_at: Utc::now(),
        updated_at: Utc::now(),
        created_by: Some(UserId::random()),
    }
}

pub fn unit(customer_id: CustomerId, plate: &str) -> Unit {
    Unit {
        id: UnitId::random(),
        customer_id,
        brand: "Honda".to_owned(),
        model: "Click".to_owned(),
        year: 2021,
        plate_number: plate.to_owned(),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}
