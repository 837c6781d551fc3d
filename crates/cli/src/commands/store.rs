use gtld_census_domain::Config;
use std::path::Path;
use tracing::info;

use super::log_enrichment;
use crate::di::{Storage, ZoneServices};

pub async fn create_data(
    config: &Config,
    zonefile: &Path,
    origin: &str,
    skip_reverse: bool,
) -> anyhow::Result<()> {
    let services = ZoneServices::new(config)?;
    let storage = Storage::connect(config).await?;

    let mut zone = services.build_zone.execute(zonefile, origin)?;
    if skip_reverse {
        info!("Skipping reverse lookups");
    } else {
        let summary = services
            .enrich_zone
            .execute(&mut zone, services.concurrency)
            .await;
        log_enrichment(&summary);
    }

    let zone_id = storage.save_zone.execute(&mut zone).await?;
    println!("{}", zone_id);
    Ok(())
}

pub async fn list_zones(config: &Config) -> anyhow::Result<()> {
    let storage = Storage::connect(config).await?;

    for zone in storage.list_zones.execute().await? {
        let serial = zone
            .soa_serial
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{}\t{}\t{}\t{}", zone.id, zone.origin, serial, zone.domain_count);
    }
    Ok(())
}
