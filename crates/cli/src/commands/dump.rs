use gtld_census_domain::Config;
use gtld_census_infrastructure::report::{write_nameservers, write_reverse_zone};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

use super::log_enrichment;
use crate::di::ZoneServices;

pub fn dump_nameservers(
    config: &Config,
    zonefile: &Path,
    outfile: &Path,
    origin: &str,
) -> anyhow::Result<()> {
    let services = ZoneServices::new(config)?;
    let zone = services.build_zone.execute(zonefile, origin)?;

    let mut out = BufWriter::new(File::create(outfile)?);
    let rows = write_nameservers(&mut out, &zone)?;
    out.flush()?;

    info!(outfile = %outfile.display(), rows = rows, "Nameserver tally written");
    Ok(())
}

pub async fn dump_reverse_zone(
    config: &Config,
    zonefile: &Path,
    outfile: &Path,
    origin: &str,
) -> anyhow::Result<()> {
    let services = ZoneServices::new(config)?;
    let mut zone = services.build_zone.execute(zonefile, origin)?;

    let summary = services
        .enrich_zone
        .execute(&mut zone, services.concurrency)
        .await;
    log_enrichment(&summary);

    let mut out = BufWriter::new(File::create(outfile)?);
    let rows = write_reverse_zone(&mut out, &zone)?;
    out.flush()?;

    info!(outfile = %outfile.display(), rows = rows, "Reverse zone written");
    Ok(())
}
