use gtld_census_domain::{DelegatedDomain, DomainError, PtrEntry, RecordType};
use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::ports::{DnsResolver, LookupOutcome};

/// Live DNS lookups that fill a domain's record cache and PTR set.
///
/// Every operation works on one domain and awaits its queries one after
/// another; throughput across a zone comes from running many domains at once
/// (see `EnrichZoneUseCase`).
pub struct DomainEnricher {
    resolver: Arc<dyn DnsResolver>,
}

impl DomainEnricher {
    pub fn new(resolver: Arc<dyn DnsResolver>) -> Self {
        Self { resolver }
    }

    /// Returns the cached answer for `record_type`, querying upstream only
    /// when nothing is cached yet or `refresh` is set.
    ///
    /// An absent answer is cached as an empty set and stops later lookups
    /// just like a real answer does. Transport failures leave the cache
    /// untouched and are returned to the caller.
    pub async fn get_records(
        &self,
        domain: &mut DelegatedDomain,
        record_type: RecordType,
        refresh: bool,
    ) -> Result<BTreeSet<String>, DomainError> {
        if !refresh {
            if let Some(cached) = domain.cached_records(record_type) {
                return Ok(cached.clone());
            }
        }

        let name = Arc::clone(&domain.name);
        let values = match self.resolver.query(&name, record_type).await? {
            LookupOutcome::Found(values) => values.into_iter().collect(),
            LookupOutcome::Absent(reason) => {
                debug!(domain = %name, record_type = %record_type, reason = %reason, "No records");
                BTreeSet::new()
            }
        };

        Ok(domain.cache_records(record_type, values).clone())
    }

    /// Resolves PTR names for every address the domain points at.
    ///
    /// An existing non-empty PTR set is returned as is unless `refresh` is
    /// set. Addresses whose PTR lookup comes back empty are skipped. If any
    /// PTR lookup fails the domain's PTR set is left as it was.
    pub async fn reverse_lookup<'d>(
        &self,
        domain: &'d mut DelegatedDomain,
        refresh: bool,
    ) -> Result<&'d BTreeSet<PtrEntry>, DomainError> {
        if !refresh && !domain.ptrs.is_empty() {
            return Ok(&domain.ptrs);
        }

        for record_type in [RecordType::A, RecordType::AAAA] {
            self.get_records(domain, record_type, refresh).await?;
        }

        let mut addresses = BTreeSet::new();
        for value in domain.cached_addresses() {
            match value.parse::<IpAddr>() {
                Ok(ip) => {
                    addresses.insert(ip);
                }
                Err(_) => {
                    warn!(domain = %domain.name, value = %value, "Skipping unparseable address");
                }
            }
        }

        // Nothing is attached until every address has answered
        let mut found = BTreeSet::new();
        for ip in addresses {
            let reverse = self.resolver.reverse_name(ip);
            match self.resolver.query(&reverse, RecordType::PTR).await? {
                LookupOutcome::Found(names) => {
                    found.extend(names.into_iter().map(|name| PtrEntry::new(ip, name)));
                }
                LookupOutcome::Absent(reason) => {
                    debug!(domain = %domain.name, ip = %ip, reason = %reason, "No PTR record");
                }
            }
        }
        domain.ptrs.extend(found);

        Ok(&domain.ptrs)
    }

    /// Asks upstream for the domain's NS records and attaches them. Used for
    /// domains that did not come from a zone file. Returns how many
    /// nameservers were new.
    pub async fn lookup_nameservers(
        &self,
        domain: &mut DelegatedDomain,
    ) -> Result<usize, DomainError> {
        let values = self.get_records(domain, RecordType::NS, true).await?;
        let added = values
            .into_iter()
            .filter(|ns| domain.add_nameserver(Arc::from(ns.as_str())))
            .count();
        Ok(added)
    }
}
