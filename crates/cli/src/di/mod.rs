use gtld_census_application::services::{DomainEnricher, ZoneProcessor};
use gtld_census_application::use_cases::{
    BuildZoneUseCase, ClassifyZoneUseCase, EnrichZoneUseCase, ListZonesUseCase, LoadZoneUseCase,
    SaveZoneUseCase,
};
use gtld_census_domain::Config;
use gtld_census_infrastructure::dns::UpstreamResolver;
use gtld_census_infrastructure::patterns::load_classification_patterns;
use gtld_census_infrastructure::repositories::SqliteZoneRepository;
use gtld_census_infrastructure::zone_file::ZoneFileReader;
use std::sync::Arc;
use tracing::info;

use crate::bootstrap::init_database;

/// Zone reading and live DNS, needed by every command that starts from a
/// zone file.
pub struct ZoneServices {
    pub build_zone: BuildZoneUseCase,
    pub enrich_zone: EnrichZoneUseCase,
    pub concurrency: usize,
}

impl ZoneServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let resolver = UpstreamResolver::from_config(&config.dns)?;
        info!(upstreams = resolver.servers().len(), "Upstream resolver ready");

        let enricher = Arc::new(DomainEnricher::new(Arc::new(resolver)));

        Ok(Self {
            build_zone: BuildZoneUseCase::new(Arc::new(ZoneFileReader::new())),
            enrich_zone: EnrichZoneUseCase::new(enricher),
            concurrency: config.dns.enrichment_concurrency,
        })
    }
}

/// Use cases backed by the SQLite store.
pub struct Storage {
    pub save_zone: SaveZoneUseCase,
    pub load_zone: LoadZoneUseCase,
    pub list_zones: ListZonesUseCase,
}

impl Storage {
    pub async fn connect(config: &Config) -> anyhow::Result<Self> {
        let pool = init_database(&config.database).await?;
        let repo = Arc::new(SqliteZoneRepository::new(pool));

        Ok(Self {
            save_zone: SaveZoneUseCase::new(repo.clone()),
            load_zone: LoadZoneUseCase::new(repo.clone()),
            list_zones: ListZonesUseCase::new(repo),
        })
    }
}

pub fn classifier(config: &Config) -> anyhow::Result<ClassifyZoneUseCase> {
    let patterns = load_classification_patterns(&config.patterns)?;
    Ok(ClassifyZoneUseCase::new(ZoneProcessor::new(patterns)))
}
