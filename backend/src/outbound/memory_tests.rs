use chrono::NaiveDate;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{DurationHours, ModelYear, NewJobItem, PlateNumber};
use crate::test_support::{ana_cruz_draft, clock_in_year};

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new(clock_in_year(2025))
}

fn fields() -> CustomerFields {
    CustomerFields::try_from(ana_cruz_draft()).expect("fixture fields are valid")
}

fn new_unit(plate: &str) -> NewUnit {
    NewUnit {
        brand: "Honda".to_owned(),
        model: "Click".to_owned(),
        year: ModelYear::parse("2021", 2025).expect("valid year"),
        plate_number: PlateNumber::normalise(plate),
    }
}

fn new_job(customer_id: CustomerId, unit_id: UnitId, day: u32) -> NewJob {
    NewJob {
        customer_id,
        unit_id,
        work_date: NaiveDate::from_ymd_opt(2025, 3, day).expect("valid date"),
        duration: DurationHours::new(1.5).expect("valid duration"),
        remarks: None,
        created_by: UserId::random(),
        items: vec![NewJobItem {
            description: "Oil change".to_owned(),
            products_used: Some("Motul 10W-40".to_owned()),
        }],
    }
}

async fn seeded(store: &MemoryStore, plates: &[&str]) -> (Customer, Vec<Unit>) {
    let units: Vec<NewUnit> = plates.iter().map(|plate| new_unit(plate)).collect();
    store
        .create_with_units(&fields(), &units, &UserId::random())
        .await
        .expect("create customer")
}

#[rstest]
#[tokio::test]
async fn created_units_are_listed_in_insert_order(store: MemoryStore) {
    let (customer, units) = seeded(&store, &["abc123", "xyz789"]).await;

    let listed = store
        .units_for_customer(&customer.id)
        .await
        .expect("list units");

    assert_eq!(listed, units);
    assert_eq!(listed[0].plate_number, "ABC123");
    assert!(listed.iter().all(|unit| unit.customer_id == customer.id));
}

#[rstest]
#[tokio::test]
async fn job_for_foreign_unit_is_rejected(store: MemoryStore) {
    let (owner, _) = seeded(&store, &["abc123"]).await;
    let (_, other_units) = seeded(&store, &["xyz789"]).await;

    let err = store
        .create_with_items(&new_job(owner.id, other_units[0].id, 1))
        .await
        .expect_err("foreign unit must be rejected");

    assert_eq!(err, JobRepositoryError::unit_mismatch());
    let profile = store.fetch(&owner.id).await.expect("fetch").expect("exists");
    assert!(profile.jobs.is_empty());
}

#[rstest]
#[tokio::test]
async fn profile_lists_newest_job_first_with_items(store: MemoryStore) {
    let (customer, units) = seeded(&store, &["abc123"]).await;
    store
        .create_with_items(&new_job(customer.id, units[0].id, 1))
        .await
        .expect("older job");
    let (newer, _) = store
        .create_with_items(&new_job(customer.id, units[0].id, 20))
        .await
        .expect("newer job");

    let profile = store
        .fetch(&customer.id)
        .await
        .expect("fetch")
        .expect("customer exists");

    assert_eq!(profile.jobs.len(), 2);
    assert_eq!(profile.jobs[0].id, newer.id);
    assert_eq!(profile.jobs[0].unit.plate_number, "ABC123");
    assert_eq!(profile.jobs[0].items[0].description, "Oil change");
}

#[rstest]
#[tokio::test]
async fn deleting_a_job_removes_its_items(store: MemoryStore) {
    let (customer, units) = seeded(&store, &["abc123"]).await;
    let (job, _) = store
        .create_with_items(&new_job(customer.id, units[0].id, 1))
        .await
        .expect("job");

    assert!(store.delete(&job.id).await.expect("delete"));
    assert!(!store.delete(&job.id).await.expect("second delete"));

    let tables = store.lock().expect("lock");
    assert!(tables.items.is_empty());
}

#[rstest]
#[case("cruz", 1)]
#[case("ANA C", 1)]
#[case("0917", 1)]
#[case("abc1", 1)]
#[case("nobody", 0)]
#[tokio::test]
async fn search_matches_names_contacts_and_plates(
    store: MemoryStore,
    #[case] query: &str,
    #[case] expected: usize,
) {
    seeded(&store, &["abc123", "xyz789"]).await;

    let hits = store.search(query).await.expect("search");

    assert_eq!(hits.len(), expected);
    if let Some(hit) = hits.first() {
        assert_eq!(hit.unit_count, 2);
    }
}

#[rstest]
#[tokio::test]
async fn unknown_customer_has_no_profile(store: MemoryStore) {
    let profile = store.fetch(&CustomerId::random()).await.expect("fetch");
    assert!(profile.is_none());
}

#[rstest]
#[tokio::test]
async fn update_replaces_fields_of_known_customers_only(store: MemoryStore) {
    let (customer, _) = seeded(&store, &["abc123"]).await;
    let mut draft = ana_cruz_draft();
    draft.last_name = "Reyes".to_owned();
    let changed = CustomerFields::try_from(draft).expect("valid");

    let updated = store
        .update_fields(&customer.id, &changed)
        .await
        .expect("update")
        .expect("customer exists");
    let missing = store
        .update_fields(&CustomerId::random(), &changed)
        .await
        .expect("update");

    assert_eq!(updated.fields.last_name(), "Reyes");
    assert!(missing.is_none());
}

#[rstest]
#[tokio::test]
async fn seeded_roles_are_found(store: MemoryStore) {
    let admin = UserId::random();
    store.seed_role(admin, UserRole::Admin).expect("seed");

    let found = store.find(&admin).await.expect("find");
    let missing = store.find(&UserId::random()).await.expect("find");

    assert_eq!(found.map(|record| record.role), Some(UserRole::Admin));
    assert!(missing.is_none());
}
