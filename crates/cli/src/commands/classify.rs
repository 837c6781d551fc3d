use gtld_census_application::services::ZoneClassification;
use gtld_census_domain::{Config, ZoneSnapshot};
use gtld_census_infrastructure::report::write_buckets;
use std::io::Write;
use std::path::Path;

use super::log_enrichment;
use crate::di::{self, Storage, ZoneServices};
use crate::OutputFormat;

pub async fn process_zone(
    config: &Config,
    zonefile: &Path,
    origin: &str,
    enrich: bool,
    output: Option<OutputFormat>,
) -> anyhow::Result<()> {
    let classify = di::classifier(config)?;
    let services = ZoneServices::new(config)?;

    let mut zone = services.build_zone.execute(zonefile, origin)?;
    if enrich {
        let summary = services
            .enrich_zone
            .execute(&mut zone, services.concurrency)
            .await;
        log_enrichment(&summary);
    }

    let classification = classify.execute(&zone)?;
    print_results(&zone, &classification, output)
}

pub async fn classify_stored(
    config: &Config,
    zone_id: i64,
    output: Option<OutputFormat>,
) -> anyhow::Result<()> {
    let classify = di::classifier(config)?;
    let storage = Storage::connect(config).await?;

    let zone = storage.load_zone.execute(zone_id).await?;
    let classification = classify.execute(&zone)?;
    print_results(&zone, &classification, output)
}

fn print_results(
    zone: &ZoneSnapshot,
    classification: &ZoneClassification,
    output: Option<OutputFormat>,
) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();

    writeln!(stdout, "zone: {}", zone.origin)?;
    write!(stdout, "{}", classification.report())?;

    if let Some(OutputFormat::Csv) = output {
        write_buckets(&mut stdout, classification)?;
    }
    stdout.flush()?;
    Ok(())
}
