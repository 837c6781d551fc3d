use rustc_hash::{FxHashMap, FxHashSet};
use std::sync::Arc;

use crate::{DelegatedDomain, DomainError, Nameserver, ParsedZone};

/// Every domain delegated by one zone load, plus the zone-wide nameserver tally.
///
/// The domain set is fixed once loading completes; individual domains may
/// still fill their record caches through enrichment.
#[derive(Debug, Clone, Default)]
pub struct ZoneSnapshot {
    pub id: Option<i64>,
    pub origin: Arc<str>,
    pub soa_serial: Option<u32>,
    domains: FxHashMap<Arc<str>, DelegatedDomain>,
    nameservers: FxHashMap<Arc<str>, Nameserver>,
}

impl ZoneSnapshot {
    pub fn new(origin: impl Into<Arc<str>>, soa_serial: Option<u32>) -> Self {
        Self {
            id: None,
            origin: origin.into(),
            soa_serial,
            domains: FxHashMap::default(),
            nameservers: FxHashMap::default(),
        }
    }

    /// Builds the snapshot from parsed NS delegations.
    ///
    /// The first pass tallies every nameserver once per delegating domain so
    /// each name ends up as a single shared entry; the second pass attaches
    /// those shared names to their domains.
    pub fn from_parsed(parsed: ParsedZone) -> Self {
        let mut snapshot = Self::new(parsed.origin.as_str(), parsed.soa_serial);

        let mut seen: FxHashSet<(&str, &str)> = FxHashSet::default();
        for delegation in &parsed.delegations {
            if !seen.insert((&*delegation.owner, &*delegation.nameserver)) {
                continue;
            }
            snapshot
                .nameservers
                .entry(Arc::clone(&delegation.nameserver))
                .or_insert_with(|| Nameserver::new(Arc::clone(&delegation.nameserver)))
                .record_delegation();
        }

        for delegation in &parsed.delegations {
            let shared = match snapshot.nameservers.get(&delegation.nameserver) {
                Some(ns) => Arc::clone(&ns.name),
                None => continue,
            };
            snapshot
                .domains
                .entry(Arc::clone(&delegation.owner))
                .or_insert_with(|| DelegatedDomain::new(Arc::clone(&delegation.owner)))
                .add_nameserver(shared);
        }

        snapshot
    }

    /// Adds a domain read back from storage. Names are unique per zone.
    pub fn insert_domain(&mut self, domain: DelegatedDomain) -> Result<(), DomainError> {
        if self.domains.contains_key(&domain.name) {
            return Err(DomainError::InvariantViolation(format!(
                "domain {} already present in zone {}",
                domain.name, self.origin
            )));
        }
        self.domains.insert(Arc::clone(&domain.name), domain);
        Ok(())
    }

    /// Adds a nameserver read back from storage. Names are unique per zone.
    pub fn insert_nameserver(&mut self, nameserver: Nameserver) -> Result<(), DomainError> {
        if self.nameservers.contains_key(&nameserver.name) {
            return Err(DomainError::InvariantViolation(format!(
                "nameserver {} already present in zone {}",
                nameserver.name, self.origin
            )));
        }
        self.nameservers
            .insert(Arc::clone(&nameserver.name), nameserver);
        Ok(())
    }

    pub fn domain(&self, name: &str) -> Option<&DelegatedDomain> {
        self.domains.get(name)
    }

    pub fn domain_mut(&mut self, name: &str) -> Option<&mut DelegatedDomain> {
        self.domains.get_mut(name)
    }

    pub fn domains(&self) -> impl Iterator<Item = &DelegatedDomain> {
        self.domains.values()
    }

    pub fn domains_mut(&mut self) -> impl Iterator<Item = &mut DelegatedDomain> {
        self.domains.values_mut()
    }

    pub fn domain_map(&self) -> &FxHashMap<Arc<str>, DelegatedDomain> {
        &self.domains
    }

    pub fn domain_count(&self) -> usize {
        self.domains.len()
    }

    pub fn nameserver(&self, name: &str) -> Option<&Nameserver> {
        self.nameservers.get(name)
    }

    pub fn nameservers(&self) -> impl Iterator<Item = &Nameserver> {
        self.nameservers.values()
    }

    pub fn nameservers_mut(&mut self) -> impl Iterator<Item = &mut Nameserver> {
        self.nameservers.values_mut()
    }

    pub fn nameserver_count(&self) -> usize {
        self.nameservers.len()
    }

    /// Nameservers ordered by how many domains delegate to them, busiest
    /// first; ties are broken by name so the order is stable.
    pub fn nameservers_by_count(&self) -> Vec<&Nameserver> {
        let mut sorted: Vec<_> = self.nameservers.values().collect();
        sorted.sort_by(|a, b| {
            b.domain_count()
                .cmp(&a.domain_count())
                .then_with(|| a.name.cmp(&b.name))
        });
        sorted
    }
}
