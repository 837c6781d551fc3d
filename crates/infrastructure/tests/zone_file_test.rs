use gtld_census_application::ports::ZoneSource;
use gtld_census_application::use_cases::BuildZoneUseCase;
use gtld_census_domain::DomainError;
use gtld_census_infrastructure::zone_file::ZoneFileReader;
use std::path::Path;
use std::sync::Arc;

mod helpers;
use helpers::{write_temp_file, SAMPLE_ZONE};

#[test]
fn test_reader_extracts_delegations_below_apex() {
    // Arrange
    let file = write_temp_file(SAMPLE_ZONE);

    // Act
    let zone = ZoneFileReader::new().read_zone(file.path(), "test.").unwrap();

    // Assert
    assert_eq!(zone.origin, "test.");
    assert_eq!(zone.soa_serial, Some(2024031501));
    assert_eq!(zone.delegations.len(), 6);
    assert!(zone
        .delegations
        .iter()
        .all(|d| &*d.owner != "test." && d.owner.ends_with(".test.")));
}

#[test]
fn test_build_zone_tallies_shared_nameservers() {
    // Arrange
    let file = write_temp_file(SAMPLE_ZONE);
    let use_case = BuildZoneUseCase::new(Arc::new(ZoneFileReader::new()));

    // Act
    let snapshot = use_case.execute(file.path(), "test").unwrap();

    // Assert
    assert_eq!(snapshot.domain_count(), 4);
    assert_eq!(snapshot.nameserver_count(), 5);
    assert_eq!(
        snapshot.nameserver("ns1.hoster.example.").unwrap().domain_count(),
        2
    );

    let active = snapshot.domain("active.test.").unwrap();
    assert_eq!(active.nameservers.len(), 2);
    assert!(snapshot.domain("www.active.test.").is_none());
}

#[test]
fn test_missing_file_is_io_error() {
    let err = ZoneFileReader::new()
        .read_zone(Path::new("/nonexistent/zone.txt"), "test.")
        .unwrap_err();

    assert!(matches!(err, DomainError::IoError(_)));
}

#[test]
fn test_include_directive_is_rejected() {
    let file = write_temp_file("$ORIGIN test.\nexample 3600 IN NS ns1.example.net.\n$INCLUDE other\n");

    let err = ZoneFileReader::new()
        .read_zone(file.path(), "test.")
        .unwrap_err();

    assert!(matches!(err, DomainError::ZoneParse(_)));
}

#[test]
fn test_scan_error_carries_line_number() {
    let file = write_temp_file("$TTL 3600\nexample IN NS ns1.example.net.\nbroken IN A 192.0.2.999\n");

    let err = ZoneFileReader::new()
        .read_zone(file.path(), "test.")
        .unwrap_err();

    match err {
        DomainError::ZoneParse(message) => assert!(message.starts_with("3:"), "{}", message),
        other => panic!("unexpected error: {:?}", other),
    }
}
