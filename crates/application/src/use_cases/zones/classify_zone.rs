use gtld_census_domain::{DomainError, ZoneSnapshot};
use tracing::{info, instrument};

use crate::services::{ZoneClassification, ZoneProcessor};

pub struct ClassifyZoneUseCase {
    processor: ZoneProcessor,
}

impl ClassifyZoneUseCase {
    pub fn new(processor: ZoneProcessor) -> Self {
        Self { processor }
    }

    #[instrument(skip(self, zone), fields(origin = %zone.origin))]
    pub fn execute(&self, zone: &ZoneSnapshot) -> Result<ZoneClassification, DomainError> {
        let classification = self.processor.process_zone_data(zone.domain_map());
        classification.check_partition(zone.domain_map())?;

        for list in self.processor.patterns().lists() {
            info!(list = list.name(), patterns = list.len(), "Pattern list");
        }
        for (bucket, members) in classification.iter() {
            info!(bucket = %bucket, domains = members.len(), "Bucket");
        }
        info!(domains = classification.total(), "Zone classified");

        Ok(classification)
    }
}
