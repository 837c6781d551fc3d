use gtld_census_domain::{DomainError, ZoneSnapshot};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::ZoneRepository;

pub struct SaveZoneUseCase {
    zone_repo: Arc<dyn ZoneRepository>,
}

impl SaveZoneUseCase {
    pub fn new(zone_repo: Arc<dyn ZoneRepository>) -> Self {
        Self { zone_repo }
    }

    #[instrument(skip(self, zone), fields(origin = %zone.origin))]
    pub async fn execute(&self, zone: &mut ZoneSnapshot) -> Result<i64, DomainError> {
        let id = self.zone_repo.save_zone(zone).await?;

        info!(
            zone_id = id,
            domains = zone.domain_count(),
            nameservers = zone.nameserver_count(),
            "Zone stored"
        );

        Ok(id)
    }
}
