use gtld_census_domain::{DomainError, ZoneSnapshot};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::ports::ZoneRepository;

pub struct LoadZoneUseCase {
    zone_repo: Arc<dyn ZoneRepository>,
}

impl LoadZoneUseCase {
    pub fn new(zone_repo: Arc<dyn ZoneRepository>) -> Self {
        Self { zone_repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self, id: i64) -> Result<ZoneSnapshot, DomainError> {
        let zone = self
            .zone_repo
            .load_zone(id)
            .await?
            .ok_or_else(|| DomainError::NotFound(format!("zone {}", id)))?;

        info!(
            zone_id = id,
            origin = %zone.origin,
            domains = zone.domain_count(),
            "Zone reloaded from storage"
        );

        Ok(zone)
    }
}
