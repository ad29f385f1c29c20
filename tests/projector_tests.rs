mod common;

use std::path::Path;

use common::MockDocumentStore;
use form781_filler::document::json::TemplateSpec;
use form781_filler::fill::projector::project;
use form781_filler::index::{builder, IndexTable};
use form781_filler::record::{samples, CrewMember, FlightLeg, FormRecord};

async fn blank_table() -> IndexTable {
    let store = MockDocumentStore::blank();
    builder::build(&store, Path::new("t.json")).await.unwrap()
}

fn record_with_crew(count: usize) -> FormRecord {
    let mut record = samples::normal_record();
    record.crew_members = (0..count)
        .map(|i| CrewMember {
            last_name: format!("Crew{i}"),
            ssan_last4: format!("{i:04}"),
            duty_code: "MP".to_string(),
            organization: "0016".to_string(),
            ..CrewMember::default()
        })
        .collect();
    record
}

#[tokio::test]
async fn test_normal_record_write_counts_and_pages() {
    let table = blank_table().await;
    let projection = project(&samples::normal_record(), &table);

    assert!(projection.missing.is_empty());
    // 7 header + 1 flight * 12 + 3 crew * 19
    assert_eq!(projection.writes.len(), 7 + 12 + 3 * 19);
    assert!(projection.writes.iter().all(|w| w.location.page == 0));
}

#[tokio::test]
async fn test_flight_rows_beyond_capacity_are_dropped() {
    let table = blank_table().await;
    let mut record = samples::normal_record();
    record.flights = (0..9).map(|_| FlightLeg::default()).collect();

    let projection = project(&record, &table);
    assert!(projection.missing.is_empty());
    let flight_writes = projection
        .writes
        .iter()
        .filter(|w| w.name.starts_with("mission_number_"))
        .count();
    assert_eq!(flight_writes, 6);
    assert!(!projection.writes.iter().any(|w| w.name == "from_icao_6"));
}

#[tokio::test]
async fn test_crew_overflow_splits_across_pages_with_unshifted_suffixes() {
    let table = blank_table().await;
    let projection = project(&samples::full_record(), &table);

    assert!(projection.missing.is_empty());
    let front: Vec<_> = projection
        .writes
        .iter()
        .filter(|w| w.name.starts_with("last_name_") && w.location.page == 0)
        .collect();
    let back: Vec<_> = projection
        .writes
        .iter()
        .filter(|w| w.name.starts_with("last_name_") && w.location.page == 1)
        .collect();
    assert_eq!(front.len(), 15);
    assert_eq!(back.len(), 20);
    // the back page keeps the global row numbering
    assert!(back.iter().any(|w| w.name == "last_name_15"));
    assert!(back.iter().any(|w| w.name == "last_name_34"));
    assert!(!back.iter().any(|w| w.name == "last_name_0"));
}

#[tokio::test]
async fn test_crew_rows_beyond_capacity_are_dropped() {
    let table = blank_table().await;
    let projection = project(&record_with_crew(40), &table);

    assert!(projection.missing.is_empty());
    let crew_writes = projection
        .writes
        .iter()
        .filter(|w| w.name.starts_with("ssan_"))
        .count();
    assert_eq!(crew_writes, 35);
    assert!(!projection.writes.iter().any(|w| w.name == "ssan_35"));
}

#[tokio::test]
async fn test_fourteen_crew_rows_stay_on_the_front_page() {
    let table = blank_table().await;
    let projection = project(&record_with_crew(14), &table);

    assert!(projection.writes.iter().all(|w| w.location.page == 0));
}

#[tokio::test]
async fn test_absent_optionals_become_empty_text() {
    let table = blank_table().await;
    let projection = project(&record_with_crew(1), &table);

    let nvg = projection
        .writes
        .iter()
        .find(|w| w.name == "fc_nvg_0")
        .unwrap();
    assert_eq!(nvg.value, "");
}

#[tokio::test]
async fn test_projection_is_deterministic() {
    let table = blank_table().await;
    let record = samples::full_record();

    let first = project(&record, &table);
    let second = project(&record, &table);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_fields_are_aggregated_not_fatal() {
    let mut template = TemplateSpec::form781_blank();
    template.remove_field("mds");
    template.remove_field("last_name_2");
    let store = MockDocumentStore::new(template);
    let table = builder::build(&store, Path::new("t.json")).await.unwrap();

    let projection = project(&samples::normal_record(), &table);
    assert_eq!(
        projection.missing,
        vec!["mds".to_string(), "last_name_2".to_string()]
    );
    // every other write still resolved
    assert_eq!(projection.writes.len(), 7 + 12 + 3 * 19 - 2);
}

#[tokio::test]
async fn test_header_values_land_in_their_fields() {
    let table = blank_table().await;
    let record = samples::normal_record();
    let projection = project(&record, &table);

    let by_name = |name: &str| {
        projection
            .writes
            .iter()
            .find(|w| w.name == name)
            .unwrap()
            .value
            .clone()
    };
    assert_eq!(by_name("date"), record.date);
    assert_eq!(by_name("serial"), record.serial_number);
    assert_eq!(by_name("flight_auth"), record.flight_auth_number);
    assert_eq!(by_name("mission_symbol_0"), "Q1");
    assert_eq!(by_name("last_name_1"), "Chugtai");
    assert_eq!(by_name("resv_status_2"), "33");
}
