#![allow(dead_code)]

use async_trait::async_trait;
use gtld_census_application::ports::{
    AbsenceReason, DnsResolver, LookupOutcome, ZoneRepository, ZoneSource, ZoneSummary,
};
use gtld_census_domain::{
    DelegatedDomain, DomainError, NsDelegation, ParsedZone, RecordType, ZoneSnapshot,
};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Mock DnsResolver
// ============================================================================

#[derive(Clone)]
pub struct MockDnsResolver {
    answers: Arc<RwLock<HashMap<(String, RecordType), LookupOutcome>>>,
    failing: Arc<RwLock<HashSet<String>>>,
    queries: Arc<AtomicUsize>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            answers: Arc::new(RwLock::new(HashMap::new())),
            failing: Arc::new(RwLock::new(HashSet::new())),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Answers `name`/`record_type` with the given values from now on.
    pub async fn set_answer(&self, name: &str, record_type: RecordType, values: &[&str]) {
        self.answers.write().await.insert(
            (name.to_string(), record_type),
            LookupOutcome::Found(values.iter().map(|v| v.to_string()).collect()),
        );
    }

    pub async fn set_absent(&self, name: &str, record_type: RecordType, reason: AbsenceReason) {
        self.answers
            .write()
            .await
            .insert((name.to_string(), record_type), LookupOutcome::Absent(reason));
    }

    /// Every query for `name` fails as if the upstream timed out.
    pub async fn set_failing(&self, name: &str) {
        self.failing.write().await.insert(name.to_string());
    }

    pub async fn clear_failing(&self, name: &str) {
        self.failing.write().await.remove(name);
    }

    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

impl Default for MockDnsResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn query(
        &self,
        name: &str,
        record_type: RecordType,
    ) -> Result<LookupOutcome, DomainError> {
        self.queries.fetch_add(1, Ordering::SeqCst);

        if self.failing.read().await.contains(name) {
            return Err(DomainError::TransportTimeout {
                server: "mock".to_string(),
            });
        }

        Ok(self
            .answers
            .read()
            .await
            .get(&(name.to_string(), record_type))
            .cloned()
            .unwrap_or(LookupOutcome::Absent(AbsenceReason::NxDomain)))
    }
}

// ============================================================================
// Mock ZoneRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockZoneRepository {
    zones: Arc<RwLock<Vec<ZoneSnapshot>>>,
    domains: Arc<RwLock<Vec<(i64, DelegatedDomain)>>>,
}

impl MockZoneRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn zone_count(&self) -> usize {
        self.zones.read().await.len()
    }
}

#[async_trait]
impl ZoneRepository for MockZoneRepository {
    async fn save_zone(&self, zone: &mut ZoneSnapshot) -> Result<i64, DomainError> {
        let mut zones = self.zones.write().await;
        let id = zones.len() as i64 + 1;
        zone.id = Some(id);
        for domain in zone.domains_mut() {
            domain.zone_id = Some(id);
        }
        zones.push(zone.clone());
        Ok(id)
    }

    async fn load_zone(&self, id: i64) -> Result<Option<ZoneSnapshot>, DomainError> {
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .find(|z| z.id == Some(id))
            .cloned())
    }

    async fn save_domain(
        &self,
        zone_id: i64,
        domain: &mut DelegatedDomain,
    ) -> Result<i64, DomainError> {
        let mut domains = self.domains.write().await;
        let id = domains.len() as i64 + 1;
        domain.id = Some(id);
        domain.zone_id = Some(zone_id);
        domains.push((zone_id, domain.clone()));
        Ok(id)
    }

    async fn load_domain(&self, id: i64) -> Result<Option<DelegatedDomain>, DomainError> {
        Ok(self
            .domains
            .read()
            .await
            .iter()
            .find(|(_, d)| d.id == Some(id))
            .map(|(_, d)| d.clone()))
    }

    async fn list_zones(&self) -> Result<Vec<ZoneSummary>, DomainError> {
        Ok(self
            .zones
            .read()
            .await
            .iter()
            .filter_map(|z| {
                Some(ZoneSummary {
                    id: z.id?,
                    origin: z.origin.to_string(),
                    soa_serial: z.soa_serial,
                    domain_count: z.domain_count() as u64,
                })
            })
            .collect())
    }
}

// ============================================================================
// Mock ZoneSource
// ============================================================================

pub struct MockZoneSource {
    zone: ParsedZone,
}

impl MockZoneSource {
    pub fn with_delegations(origin: &str, delegations: &[(&str, &str)]) -> Self {
        Self {
            zone: ParsedZone {
                origin: origin.to_string(),
                soa_serial: Some(2024010101),
                delegations: delegations
                    .iter()
                    .map(|(owner, ns)| NsDelegation::new(*owner, *ns))
                    .collect(),
            },
        }
    }
}

impl ZoneSource for MockZoneSource {
    fn read_zone(&self, _path: &Path, _origin: &str) -> Result<ParsedZone, DomainError> {
        Ok(self.zone.clone())
    }
}

// ============================================================================
// Builders
// ============================================================================

pub fn make_snapshot(delegations: &[(&str, &str)]) -> ZoneSnapshot {
    ZoneSnapshot::from_parsed(ParsedZone {
        origin: "test.".to_string(),
        soa_serial: Some(1),
        delegations: delegations
            .iter()
            .map(|(owner, ns)| NsDelegation::new(*owner, *ns))
            .collect(),
    })
}
