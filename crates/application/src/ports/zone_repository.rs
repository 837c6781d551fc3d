use async_trait::async_trait;
use gtld_census_domain::{DelegatedDomain, DomainError, ZoneSnapshot};

/// A stored zone load, without its domains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSummary {
    pub id: i64,
    pub origin: String,
    pub soa_serial: Option<u32>,
    pub domain_count: u64,
}

#[async_trait]
pub trait ZoneRepository: Send + Sync {
    /// Stores a whole zone load in a single transaction and writes the
    /// generated ids back into the snapshot and its entities.
    async fn save_zone(&self, zone: &mut ZoneSnapshot) -> Result<i64, DomainError>;

    /// Rebuilds a snapshot with every domain, nameserver, PTR and cached record.
    async fn load_zone(&self, id: i64) -> Result<Option<ZoneSnapshot>, DomainError>;

    /// Stores one domain (and its links) under an existing zone in a single
    /// transaction.
    async fn save_domain(
        &self,
        zone_id: i64,
        domain: &mut DelegatedDomain,
    ) -> Result<i64, DomainError>;

    async fn load_domain(&self, id: i64) -> Result<Option<DelegatedDomain>, DomainError>;

    async fn list_zones(&self) -> Result<Vec<ZoneSummary>, DomainError>;
}
