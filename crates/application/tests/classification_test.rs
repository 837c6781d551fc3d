use gtld_census_application::services::{
    Bucket, ClassificationPatterns, DomainEnricher, PatternList, ZoneProcessor,
};
use gtld_census_application::use_cases::{ClassifyZoneUseCase, EnrichZoneUseCase};
use gtld_census_domain::{PtrEntry, RecordType, ZoneSnapshot};
use std::collections::HashSet;
use std::sync::Arc;

mod helpers;
use helpers::{make_snapshot, MockDnsResolver};

fn list(name: &str, patterns: &[&str]) -> PatternList {
    PatternList::compile(name, patterns.iter().copied()).unwrap()
}

fn full_patterns() -> ClassificationPatterns {
    ClassificationPatterns {
        parked_nameservers: list("parked_nameservers", &["parking", "sedoparking"]),
        blocked_nameservers: list("blocked_nameservers", &[r"^ns\d\.blocked\."]),
        parked_ptr: list("parked_ptr", &[r"\.parked-ptr\."]),
        expired_ptr: list("expired_ptr", &["expired"]),
        other_inactive_nameservers: list("other_inactive_nameservers", &["suspended"]),
    }
}

/// One domain per bucket, plus a few that match several lists.
fn mixed_zone() -> ZoneSnapshot {
    let mut zone = make_snapshot(&[
        ("parked.test.", "ns1.parkingcrew.net."),
        ("parked-and-blocked.test.", "ns1.blocked.example."),
        ("parked-and-blocked.test.", "ns2.sedoparking.com."),
        ("blocked.test.", "ns2.blocked.example."),
        ("rparked.test.", "ns1.host.example."),
        ("rexpired.test.", "ns1.host.example."),
        ("inactive.test.", "ns.suspended.example."),
        ("bare.test.", "ns1.host.example."),
        ("live.test.", "ns1.host.example."),
    ]);

    for name in [
        "parked.test.",
        "parked-and-blocked.test.",
        "blocked.test.",
        "inactive.test.",
        "live.test.",
    ] {
        zone.domain_mut(name)
            .unwrap()
            .push_record(RecordType::A, "192.0.2.10");
    }

    let rparked = zone.domain_mut("rparked.test.").unwrap();
    rparked.push_record(RecordType::A, "192.0.2.20");
    rparked.ptrs.insert(PtrEntry::new(
        "192.0.2.20".parse().unwrap(),
        "host.parked-ptr.example.",
    ));

    let rexpired = zone.domain_mut("rexpired.test.").unwrap();
    rexpired.push_record(RecordType::A, "192.0.2.30");
    rexpired.ptrs.insert(PtrEntry::new(
        "192.0.2.30".parse().unwrap(),
        "expired.hosting.example.",
    ));

    zone
}

#[test]
fn test_buckets_partition_the_zone() {
    let zone = mixed_zone();
    let pattern_sets = [
        ClassificationPatterns::default(),
        full_patterns(),
        ClassificationPatterns {
            parked_nameservers: list("parked_nameservers", &["."]),
            ..ClassificationPatterns::default()
        },
        ClassificationPatterns {
            expired_ptr: list("expired_ptr", &["."]),
            other_inactive_nameservers: list("other_inactive_nameservers", &["host"]),
            ..ClassificationPatterns::default()
        },
    ];

    for patterns in pattern_sets {
        let result = ZoneProcessor::new(patterns).process_zone_data(zone.domain_map());

        let mut seen = HashSet::new();
        for (_, members) in result.iter() {
            for name in members {
                assert!(seen.insert(name.clone()), "{} in two buckets", name);
            }
        }
        let expected: HashSet<_> = zone.domain_map().keys().cloned().collect();
        assert_eq!(seen, expected);
        assert!(result.check_partition(zone.domain_map()).is_ok());
    }
}

#[test]
fn test_each_rule_claims_its_domain() {
    let zone = mixed_zone();
    let result = ZoneProcessor::new(full_patterns()).process_zone_data(zone.domain_map());

    assert_eq!(result.bucket_of("parked.test."), Some(Bucket::Parked));
    assert_eq!(result.bucket_of("parked-and-blocked.test."), Some(Bucket::Parked));
    assert_eq!(result.bucket_of("blocked.test."), Some(Bucket::Blocked));
    assert_eq!(result.bucket_of("rparked.test."), Some(Bucket::ReverseParked));
    assert_eq!(result.bucket_of("rexpired.test."), Some(Bucket::ReverseExpired));
    assert_eq!(result.bucket_of("inactive.test."), Some(Bucket::OtherInactive));
    assert_eq!(result.bucket_of("bare.test."), Some(Bucket::NoRdata));
    assert_eq!(result.bucket_of("live.test."), Some(Bucket::Unknown));
    assert_eq!(result.total(), 8);
}

#[test]
fn test_classification_is_repeatable_with_different_lists() {
    let zone = mixed_zone();

    let with_lists = ZoneProcessor::new(full_patterns()).process_zone_data(zone.domain_map());
    let without = ZoneProcessor::new(ClassificationPatterns::default())
        .process_zone_data(zone.domain_map());

    assert_eq!(with_lists.count(Bucket::Parked), 2);
    assert_eq!(without.count(Bucket::Parked), 0);
    // bare.test. has no records at all
    assert_eq!(without.count(Bucket::NoRdata), 1);
    assert_eq!(without.count(Bucket::Unknown), 7);
    assert_eq!(zone.domain_count(), 8);
}

#[tokio::test]
async fn test_enrich_then_classify_zone() {
    // Arrange - one domain whose PTR points at a parking host
    let resolver = MockDnsResolver::new();
    resolver
        .set_answer("landing.test.", RecordType::A, &["198.51.100.7"])
        .await;
    resolver
        .set_answer(
            "7.100.51.198.in-addr.arpa.",
            RecordType::PTR,
            &["lb.parked-ptr.example."],
        )
        .await;
    let mut zone = make_snapshot(&[
        ("landing.test.", "ns1.host.example."),
        ("gone.test.", "ns1.host.example."),
    ]);

    let enrich = EnrichZoneUseCase::new(Arc::new(DomainEnricher::new(Arc::new(resolver))));
    let classify = ClassifyZoneUseCase::new(ZoneProcessor::new(full_patterns()));

    // Act
    enrich.execute(&mut zone, 4).await;
    let result = classify.execute(&zone).unwrap();

    // Assert
    assert_eq!(result.bucket_of("landing.test."), Some(Bucket::ReverseParked));
    assert_eq!(result.bucket_of("gone.test."), Some(Bucket::NoRdata));

    let report = result.report();
    assert_eq!(report.total, 2);
    assert_eq!(report.pattern_list_sizes.len(), 5);
}
