use gtld_census_domain::{DomainError, ZoneSnapshot};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::ZoneSource;

pub struct BuildZoneUseCase {
    source: Arc<dyn ZoneSource>,
}

impl BuildZoneUseCase {
    pub fn new(source: Arc<dyn ZoneSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self))]
    pub fn execute(&self, path: &Path, origin: &str) -> Result<ZoneSnapshot, DomainError> {
        let parsed = self.source.read_zone(path, origin)?;
        let delegations = parsed.delegations.len();
        let snapshot = ZoneSnapshot::from_parsed(parsed);

        info!(
            origin = %snapshot.origin,
            serial = ?snapshot.soa_serial,
            delegations = delegations,
            domains = snapshot.domain_count(),
            nameservers = snapshot.nameserver_count(),
            "Zone snapshot built"
        );

        Ok(snapshot)
    }
}
