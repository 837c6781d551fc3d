use gtld_census_domain::DomainError;
use std::sync::Arc;
use tracing::instrument;

use crate::ports::{ZoneRepository, ZoneSummary};

pub struct ListZonesUseCase {
    zone_repo: Arc<dyn ZoneRepository>,
}

impl ListZonesUseCase {
    pub fn new(zone_repo: Arc<dyn ZoneRepository>) -> Self {
        Self { zone_repo }
    }

    #[instrument(skip(self))]
    pub async fn execute(&self) -> Result<Vec<ZoneSummary>, DomainError> {
        self.zone_repo.list_zones().await
    }
}
