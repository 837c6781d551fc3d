mod classify;
mod dump;
mod store;

pub use classify::{classify_stored, process_zone};
pub use dump::{dump_nameservers, dump_reverse_zone};
pub use store::{create_data, list_zones};

use gtld_census_application::use_cases::EnrichmentSummary;
use tracing::{info, warn};

fn log_enrichment(summary: &EnrichmentSummary) {
    if summary.failed > 0 {
        warn!(
            failed = summary.failed,
            domains = summary.domains,
            "Some domains could not be enriched"
        );
    }
    info!(
        domains = summary.domains,
        enriched = summary.enriched,
        with_ptrs = summary.with_ptrs,
        failed = summary.failed,
        "Enrichment finished"
    );
}
